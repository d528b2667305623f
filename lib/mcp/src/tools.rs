//! The tool catalog announced via `tools/list`.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn no_arguments() -> Value {
    json!({"type": "object", "properties": {}, "required": []})
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "sparql_query",
            description: "Execute an arbitrary SPARQL query against the Lehrplan endpoint.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "SPARQL query text"}
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "list_bundeslaender",
            description: "List the federal states curricula are available for.",
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "list_schulfaecher",
            description: "List the school subjects of one federal state.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "bundesland": {
                        "type": "string",
                        "description": "State code (e.g. 'SN'), German name or URI"
                    }
                },
                "required": ["bundesland"]
            }),
        },
        ToolDefinition {
            name: "list_schularten",
            description: "List the school types of one federal state.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "bundesland": {
                        "type": "string",
                        "description": "State code (e.g. 'SN'), German name or URI"
                    }
                },
                "required": ["bundesland"]
            }),
        },
        ToolDefinition {
            name: "find_lehrplaene",
            description: "Find curricula by state, subject, school type and grade level.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "bundesland": {
                        "type": "string",
                        "description": "State code, German name or URI; required when schulfach or schulart is given"
                    },
                    "schulfach": {"type": "string", "description": "Subject name, e.g. 'Biologie'"},
                    "schulart": {"type": "string", "description": "School type name, e.g. 'Gymnasium'"},
                    "jahrgangsstufe": {
                        "type": "integer", "minimum": 1, "maximum": 13,
                        "description": "Grade level 1-13"
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "get_lehrplan_tree",
            description: "Walk the curriculum tree under a node, down to a bounded depth.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "uri": {"type": "string", "description": "URI of the root node"},
                    "depth": {
                        "type": "integer", "minimum": 1, "maximum": 10, "default": 2,
                        "description": "Number of levels to descend"
                    }
                },
                "required": ["uri"]
            }),
        },
        ToolDefinition {
            name: "get_children",
            description: "List the direct children of one curriculum node.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "uri": {"type": "string", "description": "URI of the node"}
                },
                "required": ["uri"]
            }),
        },
        ToolDefinition {
            name: "search_lehrplaene",
            description: "Full-text search over curriculum content, optionally scoped to a state and subject.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "suchtext": {"type": "string", "description": "Words to search for"},
                    "bundesland": {
                        "type": "string",
                        "description": "State code, German name or URI; required when schulfach is given"
                    },
                    "schulfach": {"type": "string", "description": "Subject name to restrict hits to"}
                },
                "required": ["suchtext"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = definitions().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 8);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn schemas_serialize_with_camel_case_key() {
        let value = serde_json::to_value(&definitions()[0]).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert_eq!(value["name"], "sparql_query");
    }
}
