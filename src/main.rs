use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cartograph::app::AppContext;
use cartograph::cli::{commands, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cartograph=info")))
        .init();

    let cli = Cli::parse();
    let mut ctx = AppContext::new(cli.config.as_deref())?;
    cli.apply_overrides(&mut ctx.config);

    commands::scrape(&ctx, &cli.search, cli.total, &cli.output).await?;

    Ok(())
}
