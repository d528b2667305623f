//! Escaping applied at every interpolation point of the query builder.
//!
//! Caller-influenced values reach query text only through these two
//! functions, never through direct interpolation.

use lehrplan_model::ServiceError;
use oxiri::Iri;

/// Renders a string as a quoted SPARQL literal.
///
/// Characters that could terminate the literal are escaped, so the result is
/// always a single well-formed token.
pub fn quoted_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Validates an IRI and renders it in angle brackets.
///
/// Angle brackets, whitespace and quotes are not valid IRI characters, so a
/// value that parses cannot break out of the brackets.
pub fn bracketed_iri(value: &str) -> Result<String, ServiceError> {
    let iri = Iri::parse(value)
        .map_err(|e| ServiceError::validation(format!("invalid IRI '{value}': {e}")))?;
    Ok(format!("<{}>", iri.as_str()))
}
