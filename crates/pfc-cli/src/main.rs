use clap::Parser;
use pfc_cli::{commands, Cli, Commands};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Stdout carries the per-case summary lines only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(cli.log_level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Commands::Compare {
            catalog,
            cases,
            manifest,
        } => commands::compare(catalog, cases, manifest.as_deref()),
        Commands::Catalog { catalog } => commands::catalog(catalog),
    }
}
