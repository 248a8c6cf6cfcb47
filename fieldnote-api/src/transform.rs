//! Backend-to-UI note transform.
//!
//! A thin, tolerant mapping: the only hard requirement is an identifier.
//! Everything else degrades to a sensible default so one malformed field
//! never poisons a payload that is otherwise usable.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use fieldnote_core::{derive_title, generate_preview, Note, NoteId, Priority, Timestamp};
use thiserror::Error;

use crate::types::BackendNote;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("Backend note payload has no identifier")]
    MissingId,
}

/// Convert a backend payload into the client's note shape.
///
/// Fails only when both `noteId` and `id` are absent. `title` and `preview`
/// are derived from `content` here rather than trusted from the payload, so
/// the derivation invariant holds from the moment a note enters the
/// collection. Deletion comes from whichever active flag is present (absence
/// of both means not deleted), with `deleted_at` pinned to the note's
/// last-modified time. Unknown priority strings map to Medium; omitted dates
/// default to now.
pub fn transform(raw: BackendNote) -> Result<Note, TransformError> {
    let id: NoteId = raw
        .note_id
        .or(raw.id)
        .map(NoteId::from)
        .ok_or(TransformError::MissingId)?;

    let content = raw.content.unwrap_or_default();
    let priority = raw
        .priority
        .as_deref()
        .and_then(|s| s.parse::<Priority>().ok())
        .unwrap_or(Priority::Medium);
    let is_deleted = matches!(raw.is_active.or(raw.active), Some(false));

    let now = Utc::now();
    let created_at = parse_backend_timestamp(raw.created_at.as_deref()).unwrap_or(now);
    let last_modified = parse_backend_timestamp(raw.updated_at.as_deref()).unwrap_or(now);
    let deleted_at = is_deleted.then_some(last_modified);

    Ok(Note {
        id,
        title: derive_title(&content),
        preview: generate_preview(&content),
        content,
        priority,
        is_deleted,
        created_at,
        last_modified,
        deleted_at,
        tags: raw.tags.unwrap_or_default(),
        is_selected: false,
    })
}

/// Parse a backend date string. RFC 3339 first; failing that, the naive
/// `YYYY-MM-DDTHH:MM:SS[.frac]` form Jackson emits for `LocalDateTime`,
/// read as UTC.
pub fn parse_backend_timestamp(raw: Option<&str>) -> Option<Timestamp> {
    let raw = raw?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    None
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::types::RawNoteId;
    use proptest::prelude::*;

    proptest! {
        // Any payload carrying an identifier transforms, whatever else it
        // holds.
        #[test]
        fn any_identified_payload_transforms(
            id in any::<i64>(),
            content in "[^\n]{0,40}(\n[^\n]{0,40}){0,3}",
            priority in proptest::option::of("[A-Za-z]{1,8}"),
            active in proptest::option::of(any::<bool>()),
        ) {
            let raw = BackendNote {
                note_id: Some(RawNoteId::Num(id)),
                content: Some(content.clone()),
                priority,
                active,
                ..BackendNote::default()
            };
            let note = transform(raw).unwrap();
            let expected_id = id.to_string();
            prop_assert_eq!(note.id.as_str(), expected_id.as_str());
            prop_assert_eq!(note.content, content);
            prop_assert_eq!(note.is_deleted, active == Some(false));
        }

        // The derivation invariant holds for every transformed note.
        #[test]
        fn derived_fields_match_content(
            content in "[^\n]{0,60}(\n[^\n]{0,60}){0,3}",
        ) {
            let raw = BackendNote {
                note_id: Some(RawNoteId::Num(1)),
                content: Some(content.clone()),
                ..BackendNote::default()
            };
            let note = transform(raw).unwrap();
            prop_assert_eq!(note.title, fieldnote_core::derive_title(&content));
            prop_assert_eq!(note.preview, fieldnote_core::generate_preview(&content));
        }
    }
}
