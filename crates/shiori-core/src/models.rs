mod preview;

pub use preview::AnimePreview;
