//! NodeQueue - durable priority queue of nodes served over HTTP.
//!
//! Main entry point for the NodeQueue CLI and server.

mod cli;
mod server;

use clap::Parser;

use nodequeue_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};
use crate::server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    cli.overrides.apply(&mut config);

    match cli.command {
        Some(Commands::CheckConfig) => {
            let result = ConfigValidator::validate(&config);
            for warning in &result.warnings {
                println!("warning: {}: {}", warning.path, warning.message);
            }
            for error in &result.errors {
                println!("error: {}: {}", error.path, error.message);
            }
            if !result.is_valid() {
                return Err(format!("{} configuration error(s)", result.errors.len()).into());
            }
            println!("{}: ok", cli.config.display());
            Ok(())
        }
        Some(Commands::Serve) | None => {
            init_tracing(&config.logging)?;
            run_server(config).await
        }
    }
}
