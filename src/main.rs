mod cli;
mod config;
mod llm;
mod markdown;
mod pipeline;
mod report;
mod serpapi;
mod table;
#[cfg(test)]
mod test_support;

pub const USER_AGENT: &str = concat!("dossier/", env!("CARGO_PKG_VERSION"));

use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();

    let directive = if args.verbose {
        "dossier=debug"
    } else {
        "dossier=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    info!(input = %args.input.display(), column = %args.column, "starting dossier");

    let config = config::Config::from_env();
    cli::run(&args, &config)
        .await
        .inspect_err(|e| tracing::error!("run failed: {e}"))?;

    Ok(())
}
