use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use edusched::cli::Cli;
use edusched::config::Config;
use edusched::utils::error::report_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Ensure configuration exists and load it
    if cli.config.is_none() {
        Config::ensure_config_exists()?;
    }

    let config = if let Some(config_path) = &cli.config {
        Config::load_custom(config_path)?
    } else {
        Config::load()?
    };

    if !config.general.color {
        colored::control::set_override(false);
    }

    let invocation = cli.invocation(config);
    if let Err(err) = cli.command.execute(invocation).await {
        report_error(&err);
        std::process::exit(1);
    }

    Ok(())
}

/// `--debug` wins over `RUST_LOG`; the default keeps the grid output clean
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("edusched=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
