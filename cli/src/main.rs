use crate::cli::{Args, Command};
use anyhow::Context;
use clap::Parser;
use lehrplan_client::SparqlClient;
use lehrplan_engine::LehrplanService;
use lehrplan_mcp::ServerConfig;
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    // stdout is reserved for protocol messages and query output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_env().context("invalid server configuration")?;

    match args.command {
        Command::Serve { bind } => match bind {
            Some(bind) => lehrplan_mcp::serve_http(config, &bind).await,
            None => lehrplan_mcp::serve_stdio(config).await,
        },
        Command::Query { query } => {
            let query = match query {
                Some(query) => query,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("could not read query from stdin")?;
                    buffer
                }
            };
            let service = LehrplanService::new(
                SparqlClient::new(config.endpoint),
                Arc::new(config.registry),
            );
            let text = service.raw_query(&query).await?;
            println!("{text}");
            Ok(())
        }
    }
}
