//! index-unifieddb binary
//!
//! Writes the JSON index of a UnifiedDB architecture folder to standard output.

use anyhow::Context;
use clap::Parser;
use std::process;
use unifieddb_index::logging::init_logging;
use unifieddb_index::tooling::cli::{Cli, CliContext, USAGE};

async fn run(cli: Cli) -> anyhow::Result<()> {
    // The usage path must not depend on configuration being loadable.
    let Some(root) = cli.root.clone() else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let context = CliContext::new(cwd, cli.config.clone()).context("Failed to load configuration")?;

    init_logging(&context.config().logging, &cli.log_overrides())
        .context("Failed to initialize logging")?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    context
        .execute(&cli, &mut stdout.lock(), &mut stderr.lock())
        .await
        .with_context(|| format!("Failed to index {}", root.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
