//! # texmark Main Entry Point
//!
//! Markdown/LaTeX editor server and its command-line controller.

use anyhow::Result;
use texmark::cli;
use texmark::cmd_args::CommandLineArgs;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Dependencies whose logs stay at `warn` whatever the level
const QUIET_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "tokio",
    "tower",
    "tower_http",
    "rustls",
    "tokio_rustls",
    "tracing",
    "tracing_subscriber",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    cli::run(cmd_args).await
}

fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let mut filter = EnvFilter::from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ));
    if verbose {
        filter = filter.add_directive("texmark=debug".parse()?);
    }
    for target in QUIET_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_subscriber_should_initialize_logging_without_panic() {
        init_tracing_subscriber(true).unwrap();
    }
}
