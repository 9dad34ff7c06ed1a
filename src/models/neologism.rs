// Allow dead code: API row structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a neologism.
///
/// The set of states is owned by the remote schema; values are serialized
/// exactly as the wire strings and round-tripped unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum NeologismStatus {
    Draft,
    Ready,
    Archived,
}

impl NeologismStatus {
    /// The wire string for this status, as stored by the remote service.
    pub fn as_str(&self) -> &'static str {
        match self {
            NeologismStatus::Draft => "Draft",
            NeologismStatus::Ready => "Ready",
            NeologismStatus::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for NeologismStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invented word as mirrored by the cache.
///
/// `id` and `created_at` are assigned exclusively by the remote service and
/// are never set locally. `category` is a denormalized projection of the
/// category name, recomputed from `category_id` on every fetch; it is never
/// trusted from callers on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Neologism {
    pub id: String,
    pub name: String,
    pub root_words: Vec<String>,
    pub category_id: Option<String>,
    pub category: Option<String>,
    pub definition: String,
    pub image_url: Option<String>,
    pub status: NeologismStatus,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a neologism.
///
/// No id, timestamp, or category name: the server assigns the former two and
/// the category name is derived server-side from `category_id`.
#[derive(Debug, Clone)]
pub struct NeologismDraft {
    pub name: String,
    pub root_words: Vec<String>,
    pub category_id: Option<String>,
    pub definition: String,
    pub image_url: Option<String>,
    pub status: NeologismStatus,
}

// ============================================================================
// Wire rows (PostgREST)
// ============================================================================

/// Embedded `category:categories(name)` object on a neologism row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNameRef {
    pub name: Option<String>,
}

/// A `neologisms` row as returned by the remote service, with the category
/// name joined in via `select=*,category:categories(name)`.
#[derive(Debug, Clone, Deserialize)]
pub struct NeologismRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub root_words: Option<Vec<String>>,
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryNameRef>,
    pub definition: String,
    pub image_url: Option<String>,
    pub status: NeologismStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl NeologismRow {
    /// Convert a wire row to the domain type, flattening the embedded
    /// category name.
    pub fn to_neologism(&self) -> Neologism {
        Neologism {
            id: self.id.clone(),
            name: self.name.clone(),
            root_words: self.root_words.clone().unwrap_or_default(),
            category_id: self.category_id.clone(),
            category: self.category.as_ref().and_then(|c| c.name.clone()),
            definition: self.definition.clone(),
            image_url: self.image_url.clone(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Insert payload for a new neologism. The server assigns id and created_at;
/// `user_id` records the authenticated creator.
#[derive(Debug, Clone, Serialize)]
pub struct NewNeologismRow {
    pub name: String,
    pub root_words: Vec<String>,
    pub category_id: Option<String>,
    pub definition: String,
    pub image_url: Option<String>,
    pub status: NeologismStatus,
    pub user_id: String,
}

impl NewNeologismRow {
    pub fn from_draft(draft: &NeologismDraft, user_id: &str) -> Self {
        Self {
            name: draft.name.clone(),
            root_words: draft.root_words.clone(),
            category_id: draft.category_id.clone(),
            definition: draft.definition.clone(),
            image_url: draft.image_url.clone(),
            status: draft.status,
            user_id: user_id.to_string(),
        }
    }
}

/// Partial update payload: absent fields are left unchanged by the server.
///
/// `category_id` is doubly optional: outer `None` leaves it unchanged,
/// `Some(None)` clears the category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NeologismPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NeologismStatus>,
}

impl NeologismPatch {
    /// Full-record patch, as sent when the caller edits a neologism in place.
    pub fn from_record(record: &Neologism) -> Self {
        Self {
            name: Some(record.name.clone()),
            root_words: Some(record.root_words.clone()),
            category_id: Some(record.category_id.clone()),
            definition: Some(record.definition.clone()),
            image_url: record.image_url.clone(),
            status: Some(record.status),
        }
    }

    /// Status-only patch for workflow transitions.
    pub fn status_only(status: NeologismStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_neologism_row() {
        let json = r#"{
            "id": "b7e2a1c4-0f3d-4e5a-9b8c-1d2e3f4a5b6c",
            "name": "snirkle",
            "root_words": ["snicker", "sparkle"],
            "category_id": "11111111-2222-3333-4444-555555555555",
            "category": {"name": "Emotions"},
            "definition": "To laugh with delight at something shiny",
            "image_url": null,
            "status": "Ready",
            "created_at": "2025-04-02T18:30:00Z",
            "user_id": "99999999-8888-7777-6666-555555555555"
        }"#;

        let row: NeologismRow = serde_json::from_str(json)
            .expect("Failed to parse neologism test JSON");
        let n = row.to_neologism();

        assert_eq!(n.name, "snirkle");
        assert_eq!(n.root_words, vec!["snicker", "sparkle"]);
        assert_eq!(n.category.as_deref(), Some("Emotions"));
        assert_eq!(n.status, NeologismStatus::Ready);
        assert_eq!(n.image_url, None);
    }

    #[test]
    fn test_parse_row_without_category() {
        // Uncategorized words come back with a null join object
        let json = r#"{
            "id": "a1",
            "name": "blurp",
            "root_words": null,
            "category_id": null,
            "category": null,
            "definition": "An unclassifiable sound",
            "image_url": null,
            "status": "Draft",
            "created_at": "2025-04-02T18:30:00Z"
        }"#;

        let row: NeologismRow = serde_json::from_str(json).unwrap();
        let n = row.to_neologism();

        assert!(n.root_words.is_empty());
        assert_eq!(n.category_id, None);
        assert_eq!(n.category, None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            NeologismStatus::Draft,
            NeologismStatus::Ready,
            NeologismStatus::Archived,
        ] {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.as_str()));
            let back: NeologismStatus = serde_json::from_str(&wire).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = NeologismPatch::status_only(NeologismStatus::Archived);
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 1);
        assert_eq!(obj["status"], "Archived");
    }

    #[test]
    fn test_patch_can_clear_category() {
        let patch = NeologismPatch {
            category_id: Some(None),
            ..NeologismPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 1);
        assert!(obj["category_id"].is_null());
    }
}
