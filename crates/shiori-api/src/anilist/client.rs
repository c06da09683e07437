use reqwest::Client;
use shiori_core::config::CatalogConfig;
use shiori_core::AnimePreview;

use super::error::AniListError;
use super::types::{media_from_data, page_from_data, GraphQLResponse};
use crate::traits::{AnimeSeason, CatalogService, PreviewPage};

pub const DEFAULT_API_URL: &str = "https://graphql.anilist.co";

const SEARCH_QUERY: &str = r#"
query ($search: String, $page: Int, $perPage: Int) {
    Page(page: $page, perPage: $perPage) {
        pageInfo { hasNextPage }
        media(search: $search, type: ANIME) {
            id
            title { romaji english }
            coverImage { medium large }
            averageScore
            startDate { year }
            episodes
            format
        }
    }
}
"#;

const TRENDING_QUERY: &str = r#"
query ($page: Int, $perPage: Int) {
    Page(page: $page, perPage: $perPage) {
        pageInfo { hasNextPage }
        media(type: ANIME, sort: TRENDING_DESC) {
            id
            title { romaji english }
            coverImage { medium large }
            averageScore
            startDate { year }
            episodes
            format
        }
    }
}
"#;

const SEASON_BROWSE_QUERY: &str = r#"
query ($season: MediaSeason, $seasonYear: Int, $page: Int, $perPage: Int) {
    Page(page: $page, perPage: $perPage) {
        pageInfo { hasNextPage }
        media(season: $season, seasonYear: $seasonYear, type: ANIME, sort: POPULARITY_DESC) {
            id
            title { romaji english }
            coverImage { medium large }
            averageScore
            startDate { year }
            episodes
            format
        }
    }
}
"#;

const GET_PREVIEW_QUERY: &str = r#"
query ($id: Int) {
    Media(id: $id, type: ANIME) {
        id
        title { romaji english }
        coverImage { medium large }
        averageScore
        startDate { year }
        episodes
        format
    }
}
"#;

/// AniList GraphQL API client. Catalog queries are public, so no token is sent.
pub struct AniListClient {
    api_url: String,
    per_page: u32,
    http: Client,
}

impl AniListClient {
    pub fn new(api_url: impl Into<String>, per_page: u32) -> Self {
        Self {
            api_url: api_url.into(),
            per_page: per_page.max(1),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.api_url.clone(), config.per_page)
    }

    async fn graphql_request(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, AniListError> {
        tracing::debug!(operation, "AniList GraphQL request");

        let resp = self
            .http
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(operation, status = status_code, "AniList API error");
            return Err(AniListError::Api {
                status: status_code,
                message: body,
            });
        }

        tracing::debug!(operation, status = %status, "AniList response received");
        resp.json::<GraphQLResponse>()
            .await
            .map_err(|e| AniListError::Parse(e.to_string()))?
            .into_data()
    }

    async fn fetch_page(
        &self,
        operation: &str,
        query: &str,
        mut variables: serde_json::Value,
        page: u32,
    ) -> Result<PreviewPage, AniListError> {
        variables["page"] = serde_json::json!(page.max(1));
        variables["perPage"] = serde_json::json!(self.per_page);
        let data = self.graphql_request(operation, query, variables).await?;
        let page = page_from_data(data)?;
        tracing::debug!(operation, items = page.items.len(), has_next = page.has_next, "page mapped");
        Ok(page)
    }
}

impl CatalogService for AniListClient {
    type Error = AniListError;

    async fn search(&self, query: &str, page: u32) -> Result<PreviewPage, AniListError> {
        self.fetch_page(
            "Search",
            SEARCH_QUERY,
            serde_json::json!({ "search": query }),
            page,
        )
        .await
    }

    async fn trending(&self, page: u32) -> Result<PreviewPage, AniListError> {
        self.fetch_page("Trending", TRENDING_QUERY, serde_json::json!({}), page)
            .await
    }

    async fn browse_season(
        &self,
        season: AnimeSeason,
        year: u32,
        page: u32,
    ) -> Result<PreviewPage, AniListError> {
        self.fetch_page(
            "SeasonBrowse",
            SEASON_BROWSE_QUERY,
            serde_json::json!({
                "season": season.to_anilist_str(),
                "seasonYear": year,
            }),
            page,
        )
        .await
    }

    async fn get_preview(&self, id: i64) -> Result<AnimePreview, AniListError> {
        let data = self
            .graphql_request("GetPreview", GET_PREVIEW_QUERY, serde_json::json!({ "id": id }))
            .await?;
        media_from_data(data)
    }
}
