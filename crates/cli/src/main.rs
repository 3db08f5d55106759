use anyhow::Context;
use clap::Parser;

use stockroom_cli::{AppConfig, CliArgs};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_args(CliArgs::parse())?;
    stockroom_observability::init(&config.tracing);

    if config.uses_default_password() {
        tracing::warn!("STOCKROOM_PASSWORD not set; using insecure built-in default");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    stockroom_cli::run(&config, stdin.lock(), stdout.lock()).context("session ended")?;
    Ok(())
}
