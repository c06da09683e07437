pub mod config;
pub mod error;
pub mod ingest;
pub mod models;

pub use error::CoreError;
pub use models::AnimePreview;
