mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands};
use freshcritic::config;
use freshcritic::item::{MediaItem, PROVIDER_IMDB};
use freshcritic::metadata::enrichment::MovieEnricher;
use freshcritic::rotten::RottenTomatoesClient;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "freshcritic=trace,reqwest=debug".to_string()
        } else {
            "freshcritic=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Refresh {
            title,
            imdb_id,
            force,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(refresh_one(cli.config.as_deref(), title, imdb_id, force))
        }
        Commands::Version => {
            println!("freshcritic {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn refresh_one(
    config_path: Option<&Path>,
    title: String,
    imdb_id: Option<String>,
    force: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    anyhow::ensure!(
        !config.rotten_tomatoes.api_key.is_empty(),
        "no Rotten Tomatoes API key configured"
    );

    let client = RottenTomatoesClient::with_base_url(
        config.rotten_tomatoes.api_key,
        config.rotten_tomatoes.base_url,
    );
    let enricher = MovieEnricher::new(Arc::new(client));

    let mut item = MediaItem::new(title);
    if let Some(id) = imdb_id {
        item.set_provider_id(PROVIDER_IMDB, id);
    }

    // Ctrl-C aborts the attempt without committing any refresh state.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let changed = enricher.refresh(&mut item, force, &cancel).await?;
    tracing::info!(item = %item.name, changed, "refresh finished");

    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}
