//! Terminal rendering of preview records.

use serde_json::Value;
use shiori_core::AnimePreview;

/// Render a preview as a short multi-line card.
pub fn card(preview: &AnimePreview) -> String {
    let mut out = preview.display_title().to_string();
    if let Some(english) = preview.title_english() {
        if english != preview.display_title() {
            out.push_str(&format!(" ({english})"));
        }
    }
    out.push_str(&format!(
        "\n  #{} \u{b7} {} \u{b7} {} \u{b7} {} eps \u{b7} score {}",
        preview.id(),
        preview.format_display(),
        preview.year_display(),
        preview.episodes_display(),
        preview.score_display(),
    ));
    let cover = preview.cover_image();
    if !cover.is_empty() {
        out.push_str(&format!("\n  {cover}"));
    }
    out
}

/// Render previews back into the nested catalog document shape.
pub fn documents(previews: &[AnimePreview]) -> String {
    let docs = Value::Array(previews.iter().map(AnimePreview::to_document).collect());
    format!("{docs:#}")
}
