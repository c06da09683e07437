//! Mapping raw catalog responses into preview records.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::CoreError;
use crate::models::AnimePreview;

/// Parse every document in order.
///
/// Stops at the first malformed document and reports its index; nothing is
/// skipped or recovered here.
pub fn parse_previews<'a, I>(docs: I) -> Result<Vec<AnimePreview>, CoreError>
where
    I: IntoIterator<Item = &'a Value>,
{
    docs.into_iter()
        .enumerate()
        .map(|(index, doc)| {
            AnimePreview::from_document(doc).map_err(|e| {
                tracing::warn!(index, error = %e, "rejecting catalog document");
                match e {
                    CoreError::MalformedInput(reason) => {
                        CoreError::MalformedInput(format!("document {index}: {reason}"))
                    }
                    other => other,
                }
            })
        })
        .collect()
}

/// Drop previews whose id was already seen, keeping the first occurrence and
/// the original order.
pub fn dedup_by_id(previews: Vec<AnimePreview>) -> Vec<AnimePreview> {
    let mut seen = HashSet::with_capacity(previews.len());
    previews
        .into_iter()
        .filter(|p| seen.insert(p.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_previews_in_order() {
        let docs = vec![
            json!({ "id": 1, "title": { "romaji": "A" } }),
            json!({ "id": 2, "title": { "english": "B" } }),
            json!({ "id": 3 }),
        ];
        let previews = parse_previews(&docs).unwrap();
        let titles: Vec<&str> = previews.iter().map(|p| p.title()).collect();
        assert_eq!(titles, ["A", "B", "Unknown"]);
    }

    #[test]
    fn test_parse_previews_reports_failing_index() {
        let docs = vec![
            json!({ "id": 1 }),
            json!({ "id": 2 }),
            json!({ "id": "three" }),
            json!({ "id": 4 }),
        ];
        let err = parse_previews(&docs).unwrap_err();
        match err {
            CoreError::MalformedInput(reason) => assert!(reason.starts_with("document 2:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_previews_empty() {
        assert!(parse_previews(&Vec::<Value>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let previews = vec![
            AnimePreview::new(7, "first"),
            AnimePreview::new(8, "other"),
            AnimePreview::new(7, "second"),
        ];
        let deduped = dedup_by_id(previews);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title(), "first");
        assert_eq!(deduped[1].id(), 8);
    }
}
