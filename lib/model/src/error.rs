use sparesults::QueryResultsParseError;
use std::error::Error;

/// An error raised while loading the service configuration.
///
/// Configuration errors are fatal: they prevent startup and are never
/// surfaced to a connected client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required configuration variable is absent.
    #[error("missing required environment variable {0}")]
    MissingVariable(&'static str),
    /// A configuration variable is present but unusable.
    #[error("invalid value for {variable}: {message}")]
    InvalidVariable { variable: String, message: String },
}

/// An error raised while answering a single query operation.
///
/// All variants are non-fatal and are reported back to the caller as a
/// structured failure, never as a crash of the serving process.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The given Bundesland input matched neither a code, a name nor a known URI.
    #[error("Unknown Bundesland '{0}'. Use a two-letter code (e.g. 'SN'), a German state name (e.g. 'Sachsen') or a Bundesland URI.")]
    UnknownBundesland(String),
    /// A Schulfach or Schulart label did not resolve within the queried scope.
    #[error("{kind} '{label}' not found for the selected Bundesland. Use the corresponding listing tool to discover valid names.")]
    EntityNotFound { kind: &'static str, label: String },
    /// An argument was rejected before any query was built.
    #[error("{0}")]
    Validation(String),
    /// The endpoint answered with a non-success status.
    #[error("SPARQL endpoint returned HTTP {status}: {body}")]
    Endpoint { status: u16, body: String },
    /// The request never produced an HTTP response.
    #[error("SPARQL request failed: {0}")]
    Transport(#[source] Box<dyn Error + Send + Sync>),
    /// The endpoint's response body was not valid `application/sparql-results+json`.
    #[error("could not parse SPARQL results: {0}")]
    Results(#[from] QueryResultsParseError),
    /// An ASK response arrived where a SELECT result set was required.
    #[error("expected a SELECT result set, got an ASK response")]
    UnexpectedAsk,
}

impl ServiceError {
    /// Builds a validation error from a printable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
