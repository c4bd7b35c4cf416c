use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// webhook-notify – post CI build fields to a webhook
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Destination webhook URL
    #[arg(long, env = "webhook_url", value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Newline-delimited `key|value` pairs
    #[arg(long, env = "fields", value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "debug", global = true)]
    pub log_level: String,

    /// Print the JSON payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print build information
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
