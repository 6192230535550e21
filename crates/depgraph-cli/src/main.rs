use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use depgraph_cli::{Command, run_command};

#[derive(Parser, Debug)]
#[command(
    name = "depgraph",
    about = "depgraph: render resolved dependency trees as DOT or GML graphs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

pub fn run(args: Cli) -> anyhow::Result<()> {
    let start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let report = args.command.options().report.display().to_string();
    let path = run_command(&args.command)
        .with_context(|| format!("unable to create dependency graph from {report}"))?;

    let total_secs = start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    eprintln!("Graph written to {}", path.display());
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    run(args)
}
