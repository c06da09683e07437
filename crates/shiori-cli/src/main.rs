mod cli;
mod format;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use serde_json::Value;
use shiori_api::{AniListClient, AnimeSeason, CatalogService, PreviewPage};
use shiori_core::config::AppConfig;
use shiori_core::ingest::parse_previews;
use shiori_core::AnimePreview;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging.filter)?;

    let client = AniListClient::from_config(&config.catalog);
    run(&client, &config, cli.command, cli.json).await
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(configured: &str) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), configured)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. A malformed directive is an error
/// rather than a silent fallback.
fn build_filter(rust_log: Option<&str>, configured: &str) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid RUST_LOG filter `{directives}`")),
        None => EnvFilter::try_new(configured)
            .with_context(|| format!("invalid logging.filter `{configured}` in config")),
    }
}

async fn run<S: CatalogService>(
    service: &S,
    config: &AppConfig,
    command: Command,
    json: bool,
) -> Result<()> {
    match command {
        Command::Search { query, page } => {
            let result = service.search(&query, page).await?;
            print_page(&result, page, json);
        }
        Command::Trending { page } => {
            let result = service.trending(page).await?;
            print_page(&result, page, json);
        }
        Command::Season { season, year, page } => {
            let season = season.unwrap_or_else(AnimeSeason::current);
            let year = year.unwrap_or_else(current_year);
            tracing::info!(%season, year, page, "browsing season");
            let result = service.browse_season(season, year, page).await?;
            print_page(&result, page, json);
        }
        Command::Show { id } => {
            let preview = service.get_preview(id).await?;
            print_previews(std::slice::from_ref(&preview), json);
        }
        Command::Parse { file } => {
            let input = read_input(file.as_deref())?;
            let previews = previews_from_str(&input)?;
            print_previews(&previews, json);
        }
        Command::Config => {
            println!("# {}", AppConfig::config_path().display());
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}

fn current_year() -> u32 {
    u32::try_from(chrono::Utc::now().year()).unwrap_or_default()
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

/// Accept either one catalog document or an array of them. Every document is
/// kept, duplicates included.
fn previews_from_str(input: &str) -> Result<Vec<AnimePreview>> {
    let value: Value = serde_json::from_str(input).context("input is not valid JSON")?;
    let previews = match &value {
        Value::Array(docs) => parse_previews(docs)?,
        doc => vec![AnimePreview::from_document(doc)?],
    };
    Ok(previews)
}

fn print_page(page: &PreviewPage, number: u32, json: bool) {
    print_previews(&page.items, json);
    if !json && page.has_next {
        println!("\n-- more results: --page {}", next_page(number));
    }
}

fn next_page(number: u32) -> u32 {
    number.max(1).saturating_add(1)
}

fn print_previews(previews: &[AnimePreview], json: bool) {
    if json {
        println!("{}", format::documents(previews));
        return;
    }
    if previews.is_empty() {
        println!("No results.");
        return;
    }
    for (i, preview) in previews.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format::card(preview));
    }
}
