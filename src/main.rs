mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Log to stderr so stdout carries only the rendered triples
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Extract {
            input,
            source_url,
            format,
            policy,
            keep_trivial,
        } => commands::extract::run(
            &input,
            source_url.as_deref(),
            &format,
            policy.extraction_options(keep_trivial),
        )?,
        cli::Commands::Summary {
            input,
            format,
            all,
            dedup,
        } => commands::summary::run(&input, &format, all, dedup.policy())?,
    }

    Ok(())
}
