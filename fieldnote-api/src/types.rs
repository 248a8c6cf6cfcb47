//! API Request and Response Types
//!
//! Wire-shape structs matching the backend's JSON. The response side is
//! deliberately tolerant: every field is optional and identifiers may arrive
//! as numbers or strings, because payload shape has drifted across backend
//! revisions. The transform layer decides what is actually required.

use fieldnote_core::NoteId;
use serde::{Deserialize, Serialize};

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Backend identifier as it appears on the wire: the JPA entity serializes a
/// numeric id, older revisions sent strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNoteId {
    Num(i64),
    Str(String),
}

impl From<RawNoteId> for NoteId {
    fn from(raw: RawNoteId) -> Self {
        match raw {
            RawNoteId::Num(n) => NoteId::from(n),
            RawNoteId::Str(s) => NoteId::from(s),
        }
    }
}

/// One note as the backend sends it.
///
/// `noteId` and `id` are alternates (the transform requires at least one),
/// as are `isActive` and `active`; Jackson's bean naming has flipped the
/// latter between revisions. Dates arrive as strings, with or without an
/// offset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RawNoteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RawNoteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Body for `POST /notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Body for `PUT /notes/{id}`: content only; the backend derives nothing
/// else from an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub content: String,
}

/// Body for `PATCH /notes/{id}/priority`. The wire speaks pinnedness; the
/// backend maps it back to a priority level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotePriorityRequest {
    pub is_pinned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_request_uses_camel_case() {
        let body = UpdateNotePriorityRequest { is_pinned: true };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"isPinned":true}"#);
    }

    #[test]
    fn create_request_round_trips() {
        let body = CreateNoteRequest {
            title: "New Note".to_string(),
            content: String::new(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"title":"New Note","content":""}"#);
    }

    #[test]
    fn backend_note_accepts_numeric_and_string_ids() {
        let numeric: BackendNote = serde_json::from_str(r#"{"noteId": 7}"#).unwrap();
        assert_eq!(numeric.note_id, Some(RawNoteId::Num(7)));

        let string: BackendNote = serde_json::from_str(r#"{"id": "abc-1"}"#).unwrap();
        assert_eq!(string.id, Some(RawNoteId::Str("abc-1".to_string())));
    }

    #[test]
    fn backend_note_tolerates_unknown_fields() {
        let raw = r#"{"noteId": 1, "content": "x", "schemaVersion": 9}"#;
        let note: BackendNote = serde_json::from_str(raw).unwrap();
        assert_eq!(note.content.as_deref(), Some("x"));
    }

    #[test]
    fn active_flag_variants_both_parse() {
        let new_style: BackendNote = serde_json::from_str(r#"{"noteId": 1, "isActive": false}"#).unwrap();
        assert_eq!(new_style.is_active, Some(false));

        let bean_style: BackendNote = serde_json::from_str(r#"{"noteId": 1, "active": true}"#).unwrap();
        assert_eq!(bean_style.active, Some(true));
    }
}
