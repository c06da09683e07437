//! Service-agnostic catalog interface.
//!
//! The CLI only talks to [`CatalogService`], so another catalog backend can be
//! dropped in without touching callers.

use std::future::Future;
use std::str::FromStr;

use chrono::Datelike;
use shiori_core::AnimePreview;

/// A read-only anime catalog that yields preview records.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search for anime by title.
    fn search(
        &self,
        query: &str,
        page: u32,
    ) -> impl Future<Output = Result<PreviewPage, Self::Error>> + Send;

    /// Currently trending anime.
    fn trending(&self, page: u32) -> impl Future<Output = Result<PreviewPage, Self::Error>> + Send;

    /// Browse a season's lineup, most popular first.
    fn browse_season(
        &self,
        season: AnimeSeason,
        year: u32,
        page: u32,
    ) -> impl Future<Output = Result<PreviewPage, Self::Error>> + Send;

    /// Fetch a single entry by catalog id.
    fn get_preview(&self, id: i64) -> impl Future<Output = Result<AnimePreview, Self::Error>> + Send;
}

/// One page of previews, deduplicated by catalog id.
#[derive(Debug, Clone, Default)]
pub struct PreviewPage {
    pub items: Vec<AnimePreview>,
    pub has_next: bool,
}

/// Anime season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl AnimeSeason {
    pub const ALL: &[AnimeSeason] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    /// Convert to AniList GraphQL `MediaSeason` enum value.
    pub fn to_anilist_str(self) -> &'static str {
        match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Fall => "FALL",
        }
    }

    /// Determine the current anime season from the current month.
    pub fn current() -> Self {
        Self::from_month(chrono::Utc::now().month())
    }

    fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

impl FromStr for AnimeSeason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            other => Err(format!("unknown season `{other}`")),
        }
    }
}

impl std::fmt::Display for AnimeSeason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winter => write!(f, "Winter"),
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}
