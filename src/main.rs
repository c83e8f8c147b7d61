use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clarity::app::AppContext;
use clarity::cli::{commands, Cli, Commands};
use clarity::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr, away from the TUI and command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            clarity::tui::run(Arc::new(ctx)).await?;
        }
        Some(Commands::Search { query }) => {
            commands::search(&ctx, &query).await?;
        }
        Some(Commands::Articles { category }) => {
            commands::list_articles(&ctx, category.as_deref()).await?;
        }
    }

    Ok(())
}
