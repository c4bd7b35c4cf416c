use std::io::IsTerminal;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use webhook_notify::cli::{Cli, Commands};
use webhook_notify::config::{FileConfig, Settings};
use webhook_notify::fields::parse_fields;
use webhook_notify::payload::Envelope;
use webhook_notify::sink::post_webhook;

const SUCCESS_MESSAGE: &str = "Workflow successfully triggered! 🚀";

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = run(cli) {
        error!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    // Dependencies stay at warn unless RUST_LOG says otherwise.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,webhook_notify={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Commands::Version { json }) = cli.command {
        print_version(json)?;
        return Ok(());
    }

    let file = FileConfig::load(cli.config)?;
    let settings = Settings::resolve(cli.webhook_url, cli.fields, file)?;
    let envelope = Envelope::new(parse_fields(&settings.fields));

    if cli.dry_run {
        let json = serde_json::to_string_pretty(&envelope).context("Serializing payload")?;
        println!("{json}");
        return Ok(());
    }

    let rt = Runtime::new()?;
    rt.block_on(post_webhook(&settings.webhook_url, &envelope))?;

    info!("{SUCCESS_MESSAGE}");
    println!("{}", SUCCESS_MESSAGE.green());
    Ok(())
}

fn print_version(json: bool) -> anyhow::Result<()> {
    let commit = option_env!("GIT_SHA").unwrap_or("unknown");
    let build_date = option_env!("BUILD_DATE").unwrap_or("unknown");
    if json {
        let info = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "commit": commit,
            "build_date": build_date,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "webhook-notify {} (commit: {}, built: {})",
            env!("CARGO_PKG_VERSION"),
            commit,
            build_date,
        );
    }
    Ok(())
}
