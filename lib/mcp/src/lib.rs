//! MCP server for the Lehrplan query service.
//!
//! Exposes the query operations as tools over JSON-RPC 2.0, either as
//! newline-delimited messages on stdio or as an HTTP POST endpoint. Both
//! transports dispatch into the same handler set.

mod config;
mod handlers;
mod protocol;
mod server;
mod tools;

pub use config::ServerConfig;
pub use handlers::Handlers;
pub use protocol::{error_codes, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
pub use server::{serve_http, serve_stdio};
