pub mod anilist;
pub mod traits;

pub use anilist::{AniListClient, AniListError};
pub use traits::{AnimeSeason, CatalogService, PreviewPage};
