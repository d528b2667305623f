use crate::error::ConfigError;
use std::collections::BTreeMap;

/// Configuration key for the ontology infrastructure graph.
pub const GRAPH_ONTOLOGIE: &str = "GRAPH_ONTOLOGIE";
/// Configuration key for the subject taxonomy infrastructure graph.
pub const GRAPH_SCHULFAECHER: &str = "GRAPH_SCHULFAECHER";
/// Configuration key for the school-type taxonomy infrastructure graph.
pub const GRAPH_SCHULARTEN: &str = "GRAPH_SCHULARTEN";
/// Prefix of the per-state graph configuration keys, e.g. `GRAPH_STATE_SN`.
pub const GRAPH_STATE_PREFIX: &str = "GRAPH_STATE_";

/// The named graphs the service may query.
///
/// Infrastructure graphs (ontology and the two taxonomies) are always in
/// scope. State graphs are discovered from configuration at startup and keyed
/// by upper-case two-letter code. The registry is frozen once constructed.
#[derive(Debug, Clone)]
pub struct GraphRegistry {
    infrastructure: Vec<String>,
    states: BTreeMap<String, String>,
}

impl GraphRegistry {
    /// Builds a registry from configuration pairs.
    ///
    /// The three infrastructure keys are required; every `GRAPH_STATE_<CODE>`
    /// pair with a non-empty code and value contributes one state graph.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut ontologie = None;
        let mut schulfaecher = None;
        let mut schularten = None;
        let mut states = BTreeMap::new();

        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                GRAPH_ONTOLOGIE => ontologie = Some(value),
                GRAPH_SCHULFAECHER => schulfaecher = Some(value),
                GRAPH_SCHULARTEN => schularten = Some(value),
                _ => {
                    if let Some(code) = key.strip_prefix(GRAPH_STATE_PREFIX) {
                        if !code.is_empty() {
                            states.insert(code.to_ascii_uppercase(), value);
                        }
                    }
                }
            }
        }

        let infrastructure = vec![
            ontologie.ok_or(ConfigError::MissingVariable(GRAPH_ONTOLOGIE))?,
            schulfaecher.ok_or(ConfigError::MissingVariable(GRAPH_SCHULFAECHER))?,
            schularten.ok_or(ConfigError::MissingVariable(GRAPH_SCHULARTEN))?,
        ];
        Ok(Self {
            infrastructure,
            states,
        })
    }

    /// Builds a registry from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// The fixed infrastructure graphs, in configuration order.
    pub fn infrastructure(&self) -> &[String] {
        &self.infrastructure
    }

    /// The discovered code → graph URI map for state graphs.
    pub fn states(&self) -> &BTreeMap<String, String> {
        &self.states
    }

    /// Infrastructure graphs plus the one graph of `code`, if configured.
    pub fn scope_for(&self, code: &str) -> Vec<String> {
        let mut graphs = self.infrastructure.clone();
        if let Some(state_graph) = self.states.get(&code.to_ascii_uppercase()) {
            graphs.push(state_graph.clone());
        }
        graphs
    }

    /// Infrastructure graphs plus every discovered state graph.
    pub fn all_graphs(&self) -> Vec<String> {
        let mut graphs = self.infrastructure.clone();
        graphs.extend(self.states.values().cloned());
        graphs
    }
}
