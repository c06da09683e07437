//! Flat, typed projection of a catalog `Media` document for list and grid display.
//!
//! The nested document is only touched at the boundary: [`AnimePreview::from_document`]
//! reads it, [`AnimePreview::to_document`] writes it back for consumers that still
//! expect the raw shape.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::CoreError;

const UNKNOWN_TITLE: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";
const NO_YEAR: &str = "\u{2014}";
const DEFAULT_FORMAT: &str = "TV";

/// Preview record for a single catalog entry.
///
/// Equality and hashing consider **only** [`id`](Self::id). Two previews with the
/// same id compare equal even when every other field differs, so a `HashSet`
/// keeps whichever instance it saw first.
///
/// Fields cannot be mutated; the `with_*` methods consume the value and return a
/// new one.
#[derive(Debug, Clone)]
pub struct AnimePreview {
    id: i64,
    title: String,
    title_english: Option<String>,
    cover_image_medium: Option<String>,
    cover_image_large: Option<String>,
    average_score: Option<i64>,
    start_year: Option<i64>,
    episodes: Option<i64>,
    format: Option<String>,
}

impl AnimePreview {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            title_english: None,
            cover_image_medium: None,
            cover_image_large: None,
            average_score: None,
            start_year: None,
            episodes: None,
            format: None,
        }
    }

    pub fn with_title_english(self, title: impl Into<String>) -> Self {
        Self {
            title_english: Some(title.into()),
            ..self
        }
    }

    pub fn with_cover_images(self, medium: Option<String>, large: Option<String>) -> Self {
        Self {
            cover_image_medium: medium,
            cover_image_large: large,
            ..self
        }
    }

    pub fn with_average_score(self, score: i64) -> Self {
        Self {
            average_score: Some(score),
            ..self
        }
    }

    pub fn with_start_year(self, year: i64) -> Self {
        Self {
            start_year: Some(year),
            ..self
        }
    }

    pub fn with_episodes(self, episodes: i64) -> Self {
        Self {
            episodes: Some(episodes),
            ..self
        }
    }

    pub fn with_format(self, format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..self
        }
    }

    /// Parse a catalog `Media` document.
    ///
    /// Only the identity key is mandatory. Every other field that is absent, null,
    /// or of an unexpected JSON type is treated as missing.
    pub fn from_document(doc: &Value) -> Result<Self, CoreError> {
        let obj = doc.as_object().ok_or_else(|| {
            CoreError::MalformedInput(format!("expected an object, got {}", json_kind(doc)))
        })?;

        let id = match obj.get("id") {
            None | Some(Value::Null) => {
                return Err(CoreError::MalformedInput("missing `id`".into()));
            }
            Some(raw) => raw.as_i64().ok_or_else(|| {
                CoreError::MalformedInput(format!("`id` is not an integer: {raw}"))
            })?,
        };

        let romaji = string_at(doc, "/title/romaji");
        let title_english = string_at(doc, "/title/english");

        // Empty strings are real values here; only absence falls through.
        let title = match romaji.or_else(|| title_english.clone()) {
            Some(title) => title,
            None => {
                tracing::debug!(id, "document has no title variant, using fallback");
                UNKNOWN_TITLE.to_string()
            }
        };

        Ok(Self {
            id,
            title,
            title_english,
            cover_image_medium: string_at(doc, "/coverImage/medium"),
            cover_image_large: string_at(doc, "/coverImage/large"),
            average_score: int_at(doc, "/averageScore"),
            start_year: int_at(doc, "/startDate/year"),
            episodes: int_at(doc, "/episodes"),
            format: string_at(doc, "/format"),
        })
    }

    /// Re-emit the nested document shape read by [`from_document`](Self::from_document).
    ///
    /// Every key is present, with `null` for missing values. The resolved title is
    /// written to `title.romaji` even when it originally came from `title.english`
    /// or the `"Unknown"` fallback, so that distinction does not survive a round trip.
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "title": {
                "romaji": self.title,
                "english": self.title_english,
            },
            "coverImage": {
                "medium": self.cover_image_medium,
                "large": self.cover_image_large,
            },
            "averageScore": self.average_score,
            "startDate": {
                "year": self.start_year,
            },
            "episodes": self.episodes,
            "format": self.format,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_english(&self) -> Option<&str> {
        self.title_english.as_deref()
    }

    pub fn cover_image_medium(&self) -> Option<&str> {
        self.cover_image_medium.as_deref()
    }

    pub fn cover_image_large(&self) -> Option<&str> {
        self.cover_image_large.as_deref()
    }

    pub fn average_score(&self) -> Option<i64> {
        self.average_score
    }

    pub fn start_year(&self) -> Option<i64> {
        self.start_year
    }

    pub fn episodes(&self) -> Option<i64> {
        self.episodes
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    // ── Display helpers ──────────────────────────────────────────────

    /// Medium cover, then large cover, then an empty string.
    pub fn cover_image(&self) -> &str {
        self.cover_image_medium
            .as_deref()
            .or(self.cover_image_large.as_deref())
            .unwrap_or("")
    }

    /// Title shown on cards. Currently the resolved title as-is.
    pub fn display_title(&self) -> &str {
        &self.title
    }

    pub fn score_display(&self) -> String {
        number_or(self.average_score, NOT_AVAILABLE)
    }

    pub fn year_display(&self) -> String {
        number_or(self.start_year, NO_YEAR)
    }

    pub fn episodes_display(&self) -> String {
        number_or(self.episodes, NOT_AVAILABLE)
    }

    pub fn format_display(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }
}

impl PartialEq for AnimePreview {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnimePreview {}

impl Hash for AnimePreview {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TryFrom<&Value> for AnimePreview {
    type Error = CoreError;

    fn try_from(doc: &Value) -> Result<Self, Self::Error> {
        Self::from_document(doc)
    }
}

impl Serialize for AnimePreview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnimePreview {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = Value::deserialize(deserializer)?;
        Self::from_document(&doc).map_err(serde::de::Error::custom)
    }
}

fn string_at(doc: &Value, pointer: &str) -> Option<String> {
    doc.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn int_at(doc: &Value, pointer: &str) -> Option<i64> {
    doc.pointer(pointer).and_then(Value::as_i64)
}

fn number_or(value: Option<i64>, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_string(), |n| n.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn attack_on_titan() -> Value {
        json!({
            "id": 1,
            "title": { "romaji": "Shingeki", "english": "Attack on Titan" },
            "coverImage": { "medium": "m.jpg", "large": "l.jpg" },
            "averageScore": 85,
            "startDate": { "year": 2013 },
            "episodes": 25,
            "format": "TV"
        })
    }

    #[test]
    fn test_parse_full_document() {
        let preview = AnimePreview::from_document(&attack_on_titan()).unwrap();
        assert_eq!(preview.id(), 1);
        assert_eq!(preview.title(), "Shingeki");
        assert_eq!(preview.title_english(), Some("Attack on Titan"));
        assert_eq!(preview.cover_image_medium(), Some("m.jpg"));
        assert_eq!(preview.cover_image_large(), Some("l.jpg"));
        assert_eq!(preview.average_score(), Some(85));
        assert_eq!(preview.start_year(), Some(2013));
        assert_eq!(preview.episodes(), Some(25));
        assert_eq!(preview.format(), Some("TV"));
    }

    #[test]
    fn test_title_prefers_romaji() {
        let preview = AnimePreview::from_document(&json!({
            "id": 5,
            "title": { "romaji": "Sousou no Frieren", "english": "Frieren: Beyond Journey's End" }
        }))
        .unwrap();
        assert_eq!(preview.title(), "Sousou no Frieren");
        assert_eq!(preview.title_english(), Some("Frieren: Beyond Journey's End"));
    }

    #[test]
    fn test_title_falls_back_to_english() {
        let preview = AnimePreview::from_document(&json!({
            "id": 2,
            "title": { "romaji": null, "english": "Example" }
        }))
        .unwrap();
        assert_eq!(preview.title(), "Example");
        assert_eq!(preview.title_english(), Some("Example"));
    }

    #[test]
    fn test_title_falls_back_to_unknown() {
        for doc in [
            json!({ "id": 3 }),
            json!({ "id": 3, "title": null }),
            json!({ "id": 3, "title": {} }),
            json!({ "id": 3, "title": "not an object" }),
        ] {
            let preview = AnimePreview::from_document(&doc).unwrap();
            assert_eq!(preview.title(), "Unknown", "document: {doc}");
            assert!(preview.title_english().is_none());
        }
    }

    #[test]
    fn test_empty_romaji_is_not_missing() {
        let preview = AnimePreview::from_document(&json!({
            "id": 4,
            "title": { "romaji": "", "english": "Fallback" }
        }))
        .unwrap();
        assert_eq!(preview.title(), "");
    }

    #[test]
    fn test_missing_or_invalid_id_is_malformed() {
        for doc in [
            json!({ "title": { "romaji": "No Id" } }),
            json!({ "id": null }),
            json!({ "id": "1" }),
            json!({ "id": 1.5 }),
            json!({ "id": true }),
            json!([{ "id": 1 }]),
            json!("id"),
        ] {
            let err = AnimePreview::from_document(&doc).unwrap_err();
            assert!(
                matches!(err, CoreError::MalformedInput(_)),
                "document {doc} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_wrong_typed_optional_fields_degrade() {
        let preview = AnimePreview::from_document(&json!({
            "id": 9,
            "averageScore": "85",
            "episodes": 12.5,
            "startDate": 2020,
            "coverImage": ["m.jpg"],
            "format": 7
        }))
        .unwrap();
        assert_eq!(preview.average_score(), None);
        assert_eq!(preview.episodes(), None);
        assert_eq!(preview.start_year(), None);
        assert_eq!(preview.cover_image(), "");
        assert_eq!(preview.format(), None);
    }

    #[test]
    fn test_equality_by_id_only() {
        let a = AnimePreview::new(10, "One").with_average_score(50);
        let b = AnimePreview::new(10, "Two").with_format("MOVIE");
        let c = AnimePreview::new(11, "One").with_average_score(50);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<AnimePreview> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&AnimePreview::new(10, "")).unwrap().title(), "One");
    }

    #[test]
    fn test_score_display() {
        assert_eq!(AnimePreview::new(1, "x").score_display(), "N/A");
        assert_eq!(AnimePreview::new(1, "x").with_average_score(85).score_display(), "85");
        assert_eq!(AnimePreview::new(1, "x").with_average_score(0).score_display(), "0");
    }

    #[test]
    fn test_year_and_episodes_display() {
        let bare = AnimePreview::new(1, "x");
        assert_eq!(bare.year_display(), "\u{2014}");
        assert_eq!(bare.episodes_display(), "N/A");

        let full = bare.with_start_year(2013).with_episodes(25);
        assert_eq!(full.year_display(), "2013");
        assert_eq!(full.episodes_display(), "25");
    }

    #[test]
    fn test_format_and_title_display() {
        let preview = AnimePreview::new(1, "Kimi no Na wa.");
        assert_eq!(preview.format_display(), "TV");
        assert_eq!(preview.display_title(), "Kimi no Na wa.");
        assert_eq!(preview.with_format("MOVIE").format_display(), "MOVIE");
    }

    #[test]
    fn test_cover_image_fallbacks() {
        let both = AnimePreview::new(1, "x")
            .with_cover_images(Some("m.jpg".into()), Some("l.jpg".into()));
        assert_eq!(both.cover_image(), "m.jpg");

        let large_only = AnimePreview::new(1, "x").with_cover_images(None, Some("l.jpg".into()));
        assert_eq!(large_only.cover_image(), "l.jpg");

        assert_eq!(AnimePreview::new(1, "x").cover_image(), "");
    }

    #[test]
    fn test_round_trip_full_document() {
        let doc = attack_on_titan();
        let preview = AnimePreview::from_document(&doc).unwrap();
        assert_eq!(preview.to_document(), doc);
    }

    #[test]
    fn test_round_trip_loses_missing_romaji() {
        let preview = AnimePreview::from_document(&json!({
            "id": 2,
            "title": { "english": "Example" }
        }))
        .unwrap();
        assert_eq!(preview.title(), "Example");

        let doc = preview.to_document();
        assert_eq!(doc["title"]["romaji"], "Example");
        assert_eq!(doc["title"]["english"], "Example");
        assert_eq!(doc["coverImage"]["medium"], Value::Null);
        assert_eq!(doc["startDate"]["year"], Value::Null);
        assert_eq!(doc["format"], Value::Null);
    }

    #[test]
    fn test_serde_uses_document_shape() {
        let preview: AnimePreview = serde_json::from_value(attack_on_titan()).unwrap();
        assert_eq!(preview.title(), "Shingeki");
        assert_eq!(serde_json::to_value(&preview).unwrap(), attack_on_titan());

        let err = serde_json::from_str::<AnimePreview>(r#"{ "title": {} }"#).unwrap_err();
        assert!(err.to_string().contains("missing `id`"));
    }
}
