//! Fieldnote Core - Note Types
//!
//! Pure data structures and derivations with no I/O. The wire layer and the
//! terminal client both depend on this crate; nothing here knows about HTTP
//! or rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Prefix marking identifiers that were synthesized on this client because
/// the backend could not assign one. Such notes never sync.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Opaque note identifier.
///
/// Backend-assigned identifiers are carried verbatim (numeric ids normalize
/// to their decimal string form). Fallback identifiers are generated locally
/// with the [`LOCAL_ID_PREFIX`] and a UUIDv7, keeping them timestamp-sortable
/// and impossible to confuse with backend ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a locally-synthesized fallback identifier.
    pub fn new_local() -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{}", Uuid::now_v7()))
    }

    /// True for identifiers synthesized on this client; such notes have no
    /// backend counterpart and are excluded from sync calls.
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for NoteId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<i64> for NoteId {
    fn from(raw: i64) -> Self {
        Self(raw.to_string())
    }
}

// ============================================================================
// PRIORITY
// ============================================================================

/// Note priority level. `High` is synonymous with "pinned"; `Low` exists for
/// wire compatibility but the UI only ever assigns High/Medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

/// Total mapping from priority to pinnedness. Only `High` pins.
pub fn priority_to_pinned(priority: Priority) -> bool {
    matches!(priority, Priority::High)
}

/// Total mapping from pinnedness to priority. Inverse-consistent with
/// [`priority_to_pinned`]: `priority_to_pinned(pinned_to_priority(x)) == x`.
pub fn pinned_to_priority(pinned: bool) -> Priority {
    if pinned {
        Priority::High
    } else {
        Priority::Medium
    }
}

// ============================================================================
// CONTENT DERIVATIONS
// ============================================================================

/// Title shown for notes whose content has no first line yet.
pub const DEFAULT_TITLE: &str = "New Note";

/// Maximum preview length before the ellipsis marker is appended.
pub const PREVIEW_MAX_CHARS: usize = 100;

const PREVIEW_ELLIPSIS: &str = "...";

/// Derive the display title from content: the first line, upper-cased.
/// Empty content (or an empty first line) falls back to [`DEFAULT_TITLE`].
pub fn derive_title(content: &str) -> String {
    match content.split('\n').next() {
        Some(first) if !first.is_empty() => first.to_uppercase(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Derive the sidebar preview from content: everything after the first line,
/// trimmed, truncated to [`PREVIEW_MAX_CHARS`] characters with an ellipsis
/// marker when truncated. Pure and idempotent; the result never exceeds 103
/// characters.
pub fn generate_preview(content: &str) -> String {
    let body = content
        .split('\n')
        .skip(1)
        .collect::<Vec<_>>()
        .join("\n");
    let body = body.trim();
    if body.chars().count() > PREVIEW_MAX_CHARS {
        let truncated: String = body.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{truncated}{PREVIEW_ELLIPSIS}")
    } else {
        body.to_string()
    }
}

// ============================================================================
// NOTE ENTITY
// ============================================================================

/// The sole entity: one note as the client sees it.
///
/// `title` and `preview` are always recomputed from `content` at every
/// mutation point; `is_pinned` is not stored at all. Pinnedness is computed
/// from `priority` on read, so the two representations cannot diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub preview: String,
    pub priority: Priority,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
    /// Stamped on soft delete, cleared on restore.
    pub deleted_at: Option<Timestamp>,
    /// Ordered, unique within the note.
    pub tags: Vec<String>,
    /// Transient UI flag; the state-owner keeps at most one note selected.
    pub is_selected: bool,
}

impl Note {
    /// Fallback note created entirely on this client when the backend could
    /// not service a create: local id, default title, empty content.
    pub fn new_local() -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new_local(),
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            preview: String::new(),
            priority: Priority::Medium,
            is_deleted: false,
            created_at: now,
            last_modified: now,
            deleted_at: None,
            tags: Vec::new(),
            is_selected: false,
        }
    }

    /// Pinnedness computed from priority; never stored.
    pub fn is_pinned(&self) -> bool {
        priority_to_pinned(self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ids_carry_the_prefix() {
        let id = NoteId::new_local();
        assert!(id.is_local());
        assert!(id.as_str().starts_with(LOCAL_ID_PREFIX));
    }

    #[test]
    fn backend_ids_are_not_local() {
        assert!(!NoteId::from(42).is_local());
        assert!(!NoteId::from("note-7").is_local());
    }

    #[test]
    fn numeric_ids_normalize_to_decimal_strings() {
        assert_eq!(NoteId::from(123).as_str(), "123");
    }

    #[test]
    fn title_is_first_line_uppercased() {
        assert_eq!(derive_title("Hello\nWorld body text"), "HELLO");
        assert_eq!(derive_title("shopping list"), "SHOPPING LIST");
    }

    #[test]
    fn empty_content_gets_default_title() {
        assert_eq!(derive_title(""), DEFAULT_TITLE);
        assert_eq!(derive_title("\nbody without a title"), DEFAULT_TITLE);
    }

    #[test]
    fn preview_strips_title_line() {
        assert_eq!(generate_preview("Hello\nWorld body text"), "World body text");
        assert_eq!(generate_preview("only a title"), "");
    }

    #[test]
    fn preview_is_trimmed() {
        assert_eq!(generate_preview("title\n  padded body  "), "padded body");
    }

    #[test]
    fn long_previews_truncate_with_ellipsis() {
        let content = format!("title\n{}", "x".repeat(250));
        let preview = generate_preview(&content);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_keeps_multibyte_boundaries() {
        let content = format!("title\n{}", "é".repeat(150));
        let preview = generate_preview(&content);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
    }

    #[test]
    fn priority_parses_exact_strings_only() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
        assert!("high".parse::<Priority>().is_err());
        assert!("Urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn pinned_mappings_are_inverse_consistent() {
        assert!(priority_to_pinned(pinned_to_priority(true)));
        assert!(!priority_to_pinned(pinned_to_priority(false)));
        assert_eq!(pinned_to_priority(priority_to_pinned(Priority::High)), Priority::High);
        assert_eq!(pinned_to_priority(priority_to_pinned(Priority::Medium)), Priority::Medium);
        // Low collapses to Medium through the boolean, matching the wire.
        assert_eq!(pinned_to_priority(priority_to_pinned(Priority::Low)), Priority::Medium);
    }

    #[test]
    fn local_fallback_note_has_default_fields() {
        let note = Note::new_local();
        assert!(note.id.is_local());
        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.content, "");
        assert_eq!(note.preview, "");
        assert_eq!(note.priority, Priority::Medium);
        assert!(!note.is_deleted);
        assert!(note.deleted_at.is_none());
        assert!(note.tags.is_empty());
        assert!(!note.is_selected);
    }

    #[test]
    fn priority_serializes_to_wire_strings() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"Medium\"");
    }
}
