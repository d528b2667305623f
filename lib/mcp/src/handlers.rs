//! Request dispatch and the tool-call boundary.

use crate::protocol::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::tools;
use lehrplan_client::SparqlBackend;
use lehrplan_engine::LehrplanService;
use lehrplan_model::ServiceError;
use serde_json::{json, Value};
use tracing::debug;

/// Dispatches JSON-RPC requests into the query service.
///
/// Shared by the stdio and HTTP transports.
pub struct Handlers<B> {
    service: LehrplanService<B>,
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {"tools": {}},
        "serverInfo": {
            "name": "lehrplan-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ServiceError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ServiceError::validation(format!("missing required argument '{key}'")))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn optional_u8(args: &Value, key: &str) -> Result<Option<u8>, ServiceError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                ServiceError::validation(format!("argument '{key}' must be a small positive integer"))
            }),
    }
}

impl<B: SparqlBackend> Handlers<B> {
    pub fn new(service: LehrplanService<B>) -> Self {
        Self { service }
    }

    /// Handles one request. Returns `None` for notifications, which must not
    /// be answered.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let notification = request.is_notification();
        let id = request.id.clone();

        let outcome: Result<Value, (i32, String)> = if request.jsonrpc == "2.0" {
            match request.method.as_str() {
                "initialize" => Ok(initialize_result()),
                "ping" => Ok(json!({})),
                method if method.starts_with("notifications/") => return None,
                "tools/list" => Ok(json!({"tools": tools::definitions()})),
                "tools/call" => {
                    self.call_tool(request.params.unwrap_or(Value::Null)).await
                }
                other => Err((
                    error_codes::METHOD_NOT_FOUND,
                    format!("method '{other}' is not supported"),
                )),
            }
        } else {
            Err((
                error_codes::INVALID_REQUEST,
                "invalid JSON-RPC version".to_owned(),
            ))
        };

        if notification {
            return None;
        }
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (i32, String)> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                (
                    error_codes::INVALID_PARAMS,
                    "tools/call requires a tool name".to_owned(),
                )
            })?;
        if !tools::definitions().iter().any(|tool| tool.name == name) {
            return Err((
                error_codes::INVALID_PARAMS,
                format!("unknown tool '{name}'"),
            ));
        }
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        debug!(tool = name, "calling tool");

        // Every error is converted to a tool-level failure here; nothing
        // propagates to the protocol layer.
        Ok(match self.run_tool(name, &args).await {
            Ok(text) => json!({"content": [{"type": "text", "text": text}]}),
            Err(e) => json!({
                "content": [{"type": "text", "text": e.to_string()}],
                "isError": true,
            }),
        })
    }

    async fn run_tool(&self, name: &str, args: &Value) -> Result<String, ServiceError> {
        match name {
            "sparql_query" => self.service.raw_query(required_str(args, "query")?).await,
            "list_bundeslaender" => self.service.list_bundeslaender().await,
            "list_schulfaecher" => {
                self.service
                    .list_schulfaecher(required_str(args, "bundesland")?)
                    .await
            }
            "list_schularten" => {
                self.service
                    .list_schularten(required_str(args, "bundesland")?)
                    .await
            }
            "find_lehrplaene" => {
                self.service
                    .find_lehrplaene(
                        optional_str(args, "bundesland"),
                        optional_str(args, "schulfach"),
                        optional_str(args, "schulart"),
                        optional_u8(args, "jahrgangsstufe")?,
                    )
                    .await
            }
            "get_lehrplan_tree" => {
                self.service
                    .lehrplan_tree(required_str(args, "uri")?, optional_u8(args, "depth")?)
                    .await
            }
            "get_children" => self.service.children(required_str(args, "uri")?).await,
            "search_lehrplaene" => {
                self.service
                    .search(
                        required_str(args, "suchtext")?,
                        optional_str(args, "bundesland"),
                        optional_str(args, "schulfach"),
                    )
                    .await
            }
            other => Err(ServiceError::validation(format!("unknown tool '{other}'"))),
        }
    }
}
