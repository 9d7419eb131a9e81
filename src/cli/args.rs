//! CLI argument definitions using clap
//!
//! Commands:
//! - roster serve [--host] [--port] [--store] [--cors-origin]...
//! - roster client [--url]

use clap::{Parser, Subcommand};

/// Roster - student record service and terminal client
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the record API server
    Serve {
        /// Address to listen on
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,

        /// Storage connection string: memory://, file://<dir> or a directory path
        #[arg(long, env = "STORE_URI", default_value = "memory://")]
        store: String,

        /// Allowed CORS origin; repeat for several. Any origin when unset.
        #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
        cors_origins: Vec<String>,
    },

    /// Open the interactive terminal client
    Client {
        /// Base URL of the record API server
        #[arg(long, env = "ROSTER_API_URL", default_value = "http://localhost:5000")]
        url: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
