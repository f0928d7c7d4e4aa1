//! CLI command definitions for the `chatbot` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the REST/SSE
//! API; `list` inspects stored conversations without starting a server.

pub mod list;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Conversational AI chat backend.
#[derive(Parser)]
#[command(name = "chatbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides `server.port`).
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to (overrides `server.host`).
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// List conversations, most recently updated first.
    #[command(alias = "ls")]
    List {
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Conversations per page (at most 100).
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
