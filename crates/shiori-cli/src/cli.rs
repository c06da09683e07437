use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shiori_api::AnimeSeason;

/// Browse the anime catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "shiori", version, about)]
pub struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print catalog documents as JSON instead of cards.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for anime by title.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show what is trending right now.
    Trending {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Browse a season's lineup (defaults to the current season).
    Season {
        season: Option<AnimeSeason>,
        year: Option<u32>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a single entry by catalog id.
    Show { id: i64 },
    /// Parse catalog documents from a file, or stdin when omitted.
    Parse { file: Option<PathBuf> },
    /// Print the config file location and the effective configuration.
    Config,
}
