//! Synthesis of the fixed repertoire of SPARQL query shapes.
//!
//! Every function is a pure function of its arguments to query text. Graph
//! scoping is injected as one `FROM` clause per graph immediately after the
//! `SELECT` line; a single query never mixes scopes. Caller-influenced values
//! pass through [`crate::escape`] at every interpolation point.

use crate::escape::{bracketed_iri, quoted_literal};
use crate::vocab;
use itertools::Itertools;
use lehrplan_model::ServiceError;
use oxrdf::NamedNodeRef;

/// Row cap shared by the curriculum search and full-text search shapes.
pub const RESULT_LIMIT: usize = 50;

fn term(node: NamedNodeRef<'_>) -> String {
    format!("<{}>", node.as_str())
}

fn from_clauses(graphs: &[String]) -> String {
    graphs.iter().map(|g| format!("FROM <{g}>")).join("\n")
}

/// Lists every state that curricula are recorded for, with a sampled label.
pub fn list_bundeslaender(graphs: &[String]) -> String {
    format!(
        "SELECT ?bundesland (SAMPLE(?l) AS ?label)\n\
         {}\n\
         WHERE {{\n\
         \x20 ?lehrplan {} ?bundesland .\n\
         \x20 OPTIONAL {{ ?bundesland {} ?l }}\n\
         }}\n\
         GROUP BY ?bundesland\n\
         ORDER BY ?label",
        from_clauses(graphs),
        term(vocab::HAT_BUNDESLAND),
        term(vocab::RDFS_LABEL),
    )
}

fn list_entities(
    graphs: &[String],
    entity_var: &str,
    link: NamedNodeRef<'_>,
    bundesland_iri: &str,
) -> Result<String, ServiceError> {
    Ok(format!(
        "SELECT ?{entity_var} (SAMPLE(?l) AS ?label)\n\
         {}\n\
         WHERE {{\n\
         \x20 ?lehrplan {} ?{entity_var} .\n\
         \x20 ?{entity_var} {} ?l .\n\
         \x20 ?lehrplan {} {} .\n\
         }}\n\
         GROUP BY ?{entity_var}\n\
         ORDER BY ?label",
        from_clauses(graphs),
        term(link),
        term(vocab::RDFS_LABEL),
        term(vocab::HAT_BUNDESLAND),
        bracketed_iri(bundesland_iri)?,
    ))
}

/// Lists the subjects taught in one state.
pub fn list_schulfaecher(graphs: &[String], bundesland_iri: &str) -> Result<String, ServiceError> {
    list_entities(graphs, "schulfach", vocab::HAT_SCHULFACH, bundesland_iri)
}

/// Lists the school types of one state.
pub fn list_schularten(graphs: &[String], bundesland_iri: &str) -> Result<String, ServiceError> {
    list_entities(graphs, "schulart", vocab::HAT_SCHULART, bundesland_iri)
}

/// Resolves a human-readable entity label to its URI within one state.
///
/// Label comparison is case-insensitive exact equality. Ambiguous labels
/// resolve to the lexicographically smallest URI via the explicit ordering.
pub fn resolve_entity(
    graphs: &[String],
    link: NamedNodeRef<'_>,
    label: &str,
    bundesland_iri: &str,
) -> Result<String, ServiceError> {
    Ok(format!(
        "SELECT ?entity\n\
         {}\n\
         WHERE {{\n\
         \x20 ?lehrplan {} ?entity .\n\
         \x20 ?entity {} ?label .\n\
         \x20 ?lehrplan {} {} .\n\
         \x20 FILTER(LCASE(STR(?label)) = LCASE({}))\n\
         }}\n\
         ORDER BY ?entity\n\
         LIMIT 1",
        from_clauses(graphs),
        term(link),
        term(vocab::RDFS_LABEL),
        term(vocab::HAT_BUNDESLAND),
        bracketed_iri(bundesland_iri)?,
        quoted_literal(label),
    ))
}

/// Equality filters of the curriculum search; every set field contributes
/// exactly one triple pattern. All values are already-resolved IRIs.
#[derive(Debug, Default)]
pub struct LehrplanFilter {
    pub bundesland: Option<String>,
    pub schulfach: Option<String>,
    pub schulart: Option<String>,
    pub jahrgangsstufe: Option<String>,
}

/// Finds curricula matching the filter, capped at [`RESULT_LIMIT`] rows.
///
/// A curriculum is anything typed as a transitive subclass of the root
/// curriculum class.
pub fn find_lehrplaene(graphs: &[String], filter: &LehrplanFilter) -> Result<String, ServiceError> {
    let mut patterns = vec![
        "  ?lehrplan a ?typ .".to_owned(),
        format!(
            "  ?typ {}* {} .",
            term(vocab::RDFS_SUB_CLASS_OF),
            term(vocab::LEHRPLAN)
        ),
    ];
    let filters = [
        (vocab::HAT_BUNDESLAND, &filter.bundesland),
        (vocab::HAT_SCHULFACH, &filter.schulfach),
        (vocab::HAT_SCHULART, &filter.schulart),
        (vocab::HAT_JAHRGANGSSTUFE, &filter.jahrgangsstufe),
    ];
    for (predicate, value) in filters {
        if let Some(iri) = value {
            patterns.push(format!(
                "  ?lehrplan {} {} .",
                term(predicate),
                bracketed_iri(iri)?
            ));
        }
    }
    patterns.push(format!(
        "  OPTIONAL {{ ?lehrplan {} ?label }}",
        term(vocab::RDFS_LABEL)
    ));

    Ok(format!(
        "SELECT DISTINCT ?lehrplan ?label\n\
         {}\n\
         WHERE {{\n\
         {}\n\
         }}\n\
         ORDER BY ?label\n\
         LIMIT {RESULT_LIMIT}",
        from_clauses(graphs),
        patterns.join("\n"),
    ))
}

/// All parent → child edges reachable within `depth` hops of `root`.
///
/// One UNION branch per level: branch *k* chains *k*−1 fixed hops from the
/// root before binding the final hop's source as `?parent`, so the union
/// covers every level from 1 to `depth`, not only the deepest one. The
/// hierarchy is treated as a DAG; there is no cycle guard.
pub fn tree_edges(graphs: &[String], root_iri: &str, depth: u8) -> Result<String, ServiceError> {
    let root = bracketed_iri(root_iri)?;
    let hat_teil = term(vocab::HAT_TEIL);

    let mut branches = Vec::with_capacity(usize::from(depth));
    for level in 1..=depth {
        let mut lines = vec!["    {".to_owned()];
        if level == 1 {
            lines.push(format!("      BIND({root} AS ?parent)"));
        } else {
            let mut subject = root.clone();
            for hop in 1..level {
                lines.push(format!("      {subject} {hat_teil} ?z{hop} ."));
                subject = format!("?z{hop}");
            }
            lines.push(format!("      BIND(?z{} AS ?parent)", level - 1));
        }
        lines.push(format!("      ?parent {hat_teil} ?child ."));
        lines.push("    }".to_owned());
        branches.push(lines.join("\n"));
    }

    Ok(format!(
        "SELECT DISTINCT ?parent ?parentLabel ?child ?childLabel\n\
         {}\n\
         WHERE {{\n\
         \x20 {{\n\
         {}\n\
         \x20 }}\n\
         \x20 OPTIONAL {{ ?parent {} ?parentLabel }}\n\
         \x20 OPTIONAL {{ ?child {} ?childLabel }}\n\
         }}\n\
         ORDER BY ?parent ?child",
        from_clauses(graphs),
        branches.join("\n    UNION\n"),
        term(vocab::RDFS_LABEL),
        term(vocab::RDFS_LABEL),
    ))
}

/// The direct children of one node.
pub fn children(graphs: &[String], node_iri: &str) -> Result<String, ServiceError> {
    Ok(format!(
        "SELECT ?child ?label\n\
         {}\n\
         WHERE {{\n\
         \x20 {} {} ?child .\n\
         \x20 OPTIONAL {{ ?child {} ?label }}\n\
         }}\n\
         ORDER BY ?child",
        from_clauses(graphs),
        bracketed_iri(node_iri)?,
        term(vocab::HAT_TEIL),
        term(vocab::RDFS_LABEL),
    ))
}

/// Tokenizes free text into the store's text-match expression.
///
/// Whitespace-separated tokens become prefix-match terms joined by AND.
/// Quote characters are removed from each token so the expression cannot
/// terminate the enclosing string of the `bif:contains` call.
pub fn text_match_expression(input: &str) -> Option<String> {
    let terms: Vec<String> = input
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| !matches!(c, '\'' | '"' | '\\'))
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .map(|token| format!("'{token}*'"))
        .collect();
    (!terms.is_empty()).then(|| terms.join(" AND "))
}

/// Full-text search over labels, returning each hit with its immediate
/// parent if any. `expression` must come from [`text_match_expression`].
pub fn search(graphs: &[String], expression: &str) -> String {
    format!(
        "SELECT DISTINCT ?treffer ?label ?parent\n\
         {}\n\
         WHERE {{\n\
         \x20 ?treffer {} ?label .\n\
         \x20 ?label bif:contains \"{expression}\" .\n\
         \x20 OPTIONAL {{ ?parent {} ?treffer }}\n\
         }}\n\
         ORDER BY ?treffer\n\
         LIMIT {RESULT_LIMIT}",
        from_clauses(graphs),
        term(vocab::RDFS_LABEL),
        term(vocab::HAT_TEIL),
    )
}

/// Full-text search restricted to one subject: the hit's curriculum
/// ancestor, reached through the transitive part-of closure, must carry the
/// given subject.
pub fn search_in_schulfach(
    graphs: &[String],
    expression: &str,
    schulfach_iri: &str,
) -> Result<String, ServiceError> {
    Ok(format!(
        "SELECT DISTINCT ?treffer ?label ?parent\n\
         {}\n\
         WHERE {{\n\
         \x20 ?treffer {} ?label .\n\
         \x20 ?label bif:contains \"{expression}\" .\n\
         \x20 ?lehrplan a ?typ .\n\
         \x20 ?typ {}* {} .\n\
         \x20 ?lehrplan {} {} .\n\
         \x20 ?lehrplan {}* ?treffer .\n\
         \x20 OPTIONAL {{ ?parent {} ?treffer }}\n\
         }}\n\
         ORDER BY ?treffer\n\
         LIMIT {RESULT_LIMIT}",
        from_clauses(graphs),
        term(vocab::RDFS_LABEL),
        term(vocab::RDFS_SUB_CLASS_OF),
        term(vocab::LEHRPLAN),
        term(vocab::HAT_SCHULFACH),
        bracketed_iri(schulfach_iri)?,
        term(vocab::HAT_TEIL),
        term(vocab::RDFS_LABEL),
    ))
}
