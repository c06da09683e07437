use serde::Deserialize;
use serde_json::Value;

use shiori_core::ingest::{dedup_by_id, parse_previews};
use shiori_core::AnimePreview;

use super::error::AniListError;
use crate::traits::PreviewPage;

// ── GraphQL response wrappers ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl GraphQLResponse {
    /// Unwrap `data`, turning a non-empty `errors` array into an error.
    pub fn into_data(self) -> Result<Value, AniListError> {
        if !self.errors.is_empty() {
            let message = self
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AniListError::GraphQL(message));
        }
        self.data
            .ok_or_else(|| AniListError::Parse("response has neither data nor errors".into()))
    }
}

// ── Page / single media envelopes ────────────────────────────────
//
// Media objects stay untyped here; `AnimePreview` owns their parsing.

#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(rename = "Page")]
    page: PageData,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "pageInfo")]
    page_info: Option<PageInfo>,
    #[serde(default)]
    media: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(rename = "hasNextPage", default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    #[serde(rename = "Media")]
    media: Value,
}

/// Convert the `data` of a `Page { pageInfo media }` query into previews.
pub fn page_from_data(data: Value) -> Result<PreviewPage, AniListError> {
    let resp: PageResponse =
        serde_json::from_value(data).map_err(|e| AniListError::Parse(e.to_string()))?;
    let items = dedup_by_id(parse_previews(&resp.page.media)?);
    Ok(PreviewPage {
        items,
        has_next: resp.page.page_info.is_some_and(|p| p.has_next_page),
    })
}

/// Convert the `data` of a `Media(id:)` query into a preview.
pub fn media_from_data(data: Value) -> Result<AnimePreview, AniListError> {
    let resp: MediaResponse =
        serde_json::from_value(data).map_err(|e| AniListError::Parse(e.to_string()))?;
    Ok(AnimePreview::from_document(&resp.media)?)
}
