use shiori_core::CoreError;
use thiserror::Error;

/// Errors from the AniList GraphQL client.
#[derive(Debug, Error)]
pub enum AniListError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    GraphQL(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Preview(#[from] CoreError),
}
