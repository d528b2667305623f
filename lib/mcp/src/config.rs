use lehrplan_model::{ConfigError, GraphRegistry};
use url::Url;

/// Configuration key naming the SPARQL endpoint.
pub const SPARQL_ENDPOINT: &str = "SPARQL_ENDPOINT";

/// Holds the configuration for a Lehrplan server.
///
/// Built once at startup and passed by value into the serve functions; the
/// contained registry is frozen from then on.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The SPARQL endpoint queries are POSTed to.
    pub endpoint: Url,
    /// The named graphs the service may query.
    pub registry: GraphRegistry,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(SPARQL_ENDPOINT)
            .map_err(|_| ConfigError::MissingVariable(SPARQL_ENDPOINT))?;
        let endpoint = Url::parse(&raw).map_err(|e| ConfigError::InvalidVariable {
            variable: SPARQL_ENDPOINT.to_owned(),
            message: e.to_string(),
        })?;
        Ok(Self {
            endpoint,
            registry: GraphRegistry::from_env()?,
        })
    }
}
