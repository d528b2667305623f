use crate::error::ServiceError;

/// A German federal state as modelled by the Lehrplan ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundesland {
    /// Canonical two-letter code, always upper case.
    pub code: &'static str,
    /// Ontology URI of the state.
    pub uri: &'static str,
    /// German display name.
    pub name: &'static str,
}

macro_rules! bundesland {
    ($code:literal, $name:literal) => {
        Bundesland {
            code: $code,
            uri: concat!("https://w3id.org/lehrplan/bundesland#", $code),
            name: $name,
        }
    };
}

/// The 16 federal states. The code → URI mapping is a total bijection.
pub const BUNDESLAENDER: [Bundesland; 16] = [
    bundesland!("BW", "Baden-Württemberg"),
    bundesland!("BY", "Bayern"),
    bundesland!("BE", "Berlin"),
    bundesland!("BB", "Brandenburg"),
    bundesland!("HB", "Bremen"),
    bundesland!("HH", "Hamburg"),
    bundesland!("HE", "Hessen"),
    bundesland!("MV", "Mecklenburg-Vorpommern"),
    bundesland!("NI", "Niedersachsen"),
    bundesland!("NW", "Nordrhein-Westfalen"),
    bundesland!("RP", "Rheinland-Pfalz"),
    bundesland!("SL", "Saarland"),
    bundesland!("SN", "Sachsen"),
    bundesland!("ST", "Sachsen-Anhalt"),
    bundesland!("SH", "Schleswig-Holstein"),
    bundesland!("TH", "Thüringen"),
];

/// The outcome of resolving free-form Bundesland input.
///
/// `code` is `None` only for URIs that are not part of the known table; such
/// states can still be queried, but without a state graph in scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBundesland {
    pub code: Option<String>,
    pub uri: String,
}

impl ResolvedBundesland {
    fn known(entry: &Bundesland) -> Self {
        Self {
            code: Some(entry.code.to_owned()),
            uri: entry.uri.to_owned(),
        }
    }
}

fn looks_like_iri(input: &str) -> bool {
    let Some((scheme, rest)) = input.split_once(':') else {
        return false;
    };
    !rest.is_empty()
        && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves a code, a German state name or a URI to a canonical (code, URI) pair.
///
/// Matching is exact after trimming and case folding. Unknown input is an
/// error, never a silent default.
pub fn resolve_bundesland(input: &str) -> Result<ResolvedBundesland, ServiceError> {
    let trimmed = input.trim();

    if let Some(entry) = BUNDESLAENDER
        .iter()
        .find(|b| b.code.eq_ignore_ascii_case(trimmed))
    {
        return Ok(ResolvedBundesland::known(entry));
    }

    let folded = trimmed.to_lowercase();
    if let Some(entry) = BUNDESLAENDER
        .iter()
        .find(|b| b.name.to_lowercase() == folded)
    {
        return Ok(ResolvedBundesland::known(entry));
    }

    if looks_like_iri(trimmed) {
        return Ok(match BUNDESLAENDER.iter().find(|b| b.uri == trimmed) {
            Some(entry) => ResolvedBundesland::known(entry),
            None => ResolvedBundesland {
                code: None,
                uri: trimmed.to_owned(),
            },
        });
    }

    Err(ServiceError::UnknownBundesland(trimmed.to_owned()))
}

/// Looks a state up by its two-letter code, case-insensitively.
pub fn bundesland_by_code(code: &str) -> Option<&'static Bundesland> {
    BUNDESLAENDER.iter().find(|b| b.code.eq_ignore_ascii_case(code))
}
