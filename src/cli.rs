use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freshcritic")]
#[command(author, version, about = "Critic rating and review enrichment for media libraries")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a movie against the catalog and print the enriched item
    Refresh {
        /// Movie title to resolve
        #[arg(required = true)]
        title: String,

        /// Known IMDb id; skips the title search
        #[arg(long)]
        imdb_id: Option<String>,

        /// Run even if the stored fingerprint is unchanged
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,
}
