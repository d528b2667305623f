use async_trait::async_trait;
use lehrplan_model::{QueryResponse, ServiceError};
use tracing::debug;
use url::Url;

/// Maximum number of characters of an error body kept for diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// The single operation the query layer consumes: execute query text against
/// the store and hand back the structured result.
///
/// The production implementation is [`SparqlClient`]; tests substitute a stub.
#[async_trait]
pub trait SparqlBackend: Send + Sync {
    async fn execute(&self, query: &str) -> Result<QueryResponse, ServiceError>;
}

/// Executes SPARQL queries against a remote endpoint via HTTP POST.
///
/// No retry, no caching, no timeout beyond what the transport imposes: a
/// failed round trip surfaces immediately as an error.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SparqlClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SparqlBackend for SparqlClient {
    async fn execute(&self, query: &str) -> Result<QueryResponse, ServiceError> {
        debug!(endpoint = %self.endpoint, query_len = query.len(), "executing SPARQL query");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", "application/sparql-query")
            .header("Accept", "application/sparql-results+json")
            .body(query.to_owned())
            .send()
            .await
            .map_err(|e| ServiceError::Transport(Box::new(e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(Box::new(e)))?;

        if !status.is_success() {
            return Err(ServiceError::Endpoint {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        QueryResponse::from_json(&body)
    }
}

fn truncate_body(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect()
}
