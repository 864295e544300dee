//! CLI definitions for NodeQueue.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use nodequeue_config::Config;

/// NodeQueue CLI.
#[derive(Parser)]
#[command(name = "nodequeue")]
#[command(about = "Durable priority queue of nodes served over HTTP")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "NODEQUEUE_CONFIG",
        default_value = "nodequeue.toml",
        global = true
    )]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Serve,

    /// Validate the configuration and exit
    CheckConfig,
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Debug, Default)]
pub(crate) struct Overrides {
    /// Server host
    #[arg(long, env = "NODEQUEUE_HOST", global = true)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "NODEQUEUE_PORT", global = true)]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(long, env = "NODEQUEUE_DB", global = true)]
    pub db: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(db) = self.db {
            config.storage.path = db;
        }
    }
}
