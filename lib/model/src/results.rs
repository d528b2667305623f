use crate::error::ServiceError;
use oxrdf::{Term, Variable};
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};

/// An eagerly collected SELECT result set: ordered variables plus rows.
///
/// Produced once per query execution and consumed exactly once, either by the
/// formatter or by the tree shape analysis.
#[derive(Debug)]
pub struct QueryResultSet {
    variables: Vec<Variable>,
    solutions: Vec<QuerySolution>,
}

impl QueryResultSet {
    pub fn new(variables: Vec<Variable>, solutions: Vec<QuerySolution>) -> Self {
        Self {
            variables,
            solutions,
        }
    }

    /// The head of the result set, in SELECT order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn solutions(&self) -> &[QuerySolution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

/// A parsed endpoint response: either SELECT solutions or an ASK boolean.
#[derive(Debug)]
pub enum QueryResponse {
    Solutions(QueryResultSet),
    Boolean(bool),
}

impl QueryResponse {
    /// Parses an `application/sparql-results+json` body.
    pub fn from_json(body: &[u8]) -> Result<Self, ServiceError> {
        let parser = QueryResultsParser::from_format(QueryResultsFormat::Json);
        match parser.for_reader(body)? {
            ReaderQueryResultsParserOutput::Solutions(reader) => {
                let variables = reader.variables().to_vec();
                let solutions = reader.collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Solutions(QueryResultSet::new(variables, solutions)))
            }
            ReaderQueryResultsParserOutput::Boolean(value) => Ok(Self::Boolean(value)),
        }
    }

    /// Unwraps the SELECT result set; internal queries never issue ASK.
    pub fn into_solutions(self) -> Result<QueryResultSet, ServiceError> {
        match self {
            Self::Solutions(results) => Ok(results),
            Self::Boolean(_) => Err(ServiceError::UnexpectedAsk),
        }
    }
}

/// The raw lexical value of a term: no angle brackets, no language tag, no
/// datatype annotation.
pub fn term_value(term: &Term) -> &str {
    match term {
        Term::NamedNode(node) => node.as_str(),
        Term::BlankNode(node) => node.as_str(),
        Term::Literal(literal) => literal.value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTIONS_JSON: &str = r#"{
        "head": {"vars": ["fach", "label"]},
        "results": {"bindings": [
            {
                "fach": {"type": "uri", "value": "https://w3id.org/lehrplan/schulfach#Biologie"},
                "label": {"type": "literal", "value": "Biologie", "xml:lang": "de"}
            },
            {
                "fach": {"type": "uri", "value": "https://w3id.org/lehrplan/schulfach#Chemie"}
            }
        ]}
    }"#;

    #[test]
    fn parses_select_solutions() {
        let results = QueryResponse::from_json(SOLUTIONS_JSON.as_bytes())
            .unwrap()
            .into_solutions()
            .unwrap();
        assert_eq!(
            results
                .variables()
                .iter()
                .map(Variable::as_str)
                .collect::<Vec<_>>(),
            vec!["fach", "label"]
        );
        assert_eq!(results.len(), 2);

        let first = &results.solutions()[0];
        assert_eq!(
            first.get("fach").map(term_value),
            Some("https://w3id.org/lehrplan/schulfach#Biologie")
        );
        // Language tags are kept on the term but not part of the raw value.
        assert_eq!(first.get("label").map(term_value), Some("Biologie"));

        let second = &results.solutions()[1];
        assert_eq!(second.get("label"), None);
    }

    #[test]
    fn parses_ask_response() {
        let body = br#"{"head": {}, "boolean": true}"#;
        match QueryResponse::from_json(body).unwrap() {
            QueryResponse::Boolean(value) => assert!(value),
            QueryResponse::Solutions(_) => panic!("expected an ASK response"),
        }
    }

    #[test]
    fn ask_is_rejected_where_solutions_are_required() {
        let body = br#"{"head": {}, "boolean": false}"#;
        let err = QueryResponse::from_json(body)
            .unwrap()
            .into_solutions()
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnexpectedAsk));
    }

    #[test]
    fn malformed_bodies_are_parse_errors() {
        let err = QueryResponse::from_json(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ServiceError::Results(_)));
    }
}
