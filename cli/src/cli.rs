use clap::{Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(about, version, name = "lehrplan")]
/// Lehrplan command line toolkit and MCP server
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Lehrplan MCP server
    ///
    /// Reads the endpoint and graph configuration from the environment
    /// (SPARQL_ENDPOINT, GRAPH_ONTOLOGIE, GRAPH_SCHULFAECHER,
    /// GRAPH_SCHULARTEN and any GRAPH_STATE_<CODE> variables).
    Serve {
        /// Host and port to listen to
        ///
        /// If no address is given, the server speaks JSON-RPC on stdio.
        #[arg(short, long, value_hint = ValueHint::Hostname)]
        bind: Option<String>,
    },
    /// Execute one SPARQL query against the configured endpoint
    Query {
        /// Query text
        ///
        /// If no query is given, stdin is read.
        #[arg(short, long)]
        query: Option<String>,
    },
}
