//! Rendering of result sets as stable tabular text.

use itertools::Itertools;
use lehrplan_model::{term_value, QueryResponse, QueryResultSet, Variable};

const COLUMN_SEPARATOR: &str = " | ";
const HEADER_DIVIDER: &str = "---";

/// Sentinel text rendered for an empty result set.
pub const NO_RESULTS: &str = "No results.";

/// Renders a result set: variable names, a divider, then one line per row
/// with raw term values (no brackets, language tags or datatypes).
pub fn format_result_set(results: &QueryResultSet) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_owned();
    }

    let mut lines = Vec::with_capacity(results.len() + 2);
    lines.push(
        results
            .variables()
            .iter()
            .map(Variable::as_str)
            .join(COLUMN_SEPARATOR),
    );
    lines.push(HEADER_DIVIDER.to_owned());
    for solution in results.solutions() {
        lines.push(
            results
                .variables()
                .iter()
                .map(|v| solution.get(v.as_str()).map_or("", term_value))
                .join(COLUMN_SEPARATOR),
        );
    }
    lines.join("\n")
}

/// Renders any endpoint response; ASK answers become `true` / `false`.
pub fn format_response(response: &QueryResponse) -> String {
    match response {
        QueryResponse::Solutions(results) => format_result_set(results),
        QueryResponse::Boolean(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(body: &str) -> QueryResultSet {
        QueryResponse::from_json(body.as_bytes())
            .unwrap()
            .into_solutions()
            .unwrap()
    }

    #[test]
    fn empty_set_renders_the_sentinel() {
        let results = parsed(r#"{"head": {"vars": ["a"]}, "results": {"bindings": []}}"#);
        assert_eq!(format_result_set(&results), "No results.");
    }

    #[test]
    fn first_line_is_the_pipe_joined_header() {
        let results = parsed(
            r#"{
                "head": {"vars": ["lehrplan", "label"]},
                "results": {"bindings": [
                    {
                        "lehrplan": {"type": "uri", "value": "urn:lp:1"},
                        "label": {"type": "literal", "value": "Biologie Kl. 5", "xml:lang": "de"}
                    }
                ]}
            }"#,
        );
        let text = format_result_set(&results);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("lehrplan | label"));
        assert_eq!(lines.next(), Some("---"));
        assert_eq!(lines.next(), Some("urn:lp:1 | Biologie Kl. 5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn unbound_values_render_empty() {
        let results = parsed(
            r#"{
                "head": {"vars": ["child", "label"]},
                "results": {"bindings": [
                    {"child": {"type": "uri", "value": "urn:c"}}
                ]}
            }"#,
        );
        assert_eq!(format_result_set(&results), "child | label\n---\nurn:c | ");
    }

    #[test]
    fn ask_answers_format_as_booleans() {
        let response = QueryResponse::from_json(br#"{"head": {}, "boolean": false}"#).unwrap();
        assert_eq!(format_response(&response), "false");
    }
}
