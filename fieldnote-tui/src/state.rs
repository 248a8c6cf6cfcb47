//! Application state: the note collection and every intent that mutates it.
//!
//! All state lives on the event-loop task. Backend writes for optimistic
//! intents (content, priority, delete) run on spawned tasks that only log on
//! failure; load and create are awaited because the user is waiting on their
//! result.

use crate::api_client::RestClient;
use crate::config::TuiConfig;
use crate::nav::{InputMode, Section};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::InkwellTheme;
use chrono::Utc;
use fieldnote_api::transform;
use fieldnote_api::types::{CreateNoteRequest, UpdateNotePriorityRequest, UpdateNoteRequest};
use fieldnote_core::{
    derive_title, generate_preview, pinned_to_priority, priority_to_pinned, Note, NoteId,
    Priority, DEFAULT_TITLE,
};
use ratatui::layout::Rect;
use std::collections::HashSet;
use tui_textarea::TextArea;

const NOTIFICATION_TTL_SECS: i64 = 5;

pub struct App {
    pub config: TuiConfig,
    pub theme: InkwellTheme,
    pub api: RestClient,
    pub notes: NotesState,
    pub sidebar: SidebarState,
    pub editor: EditorState,
    pub mode: InputMode,
    pub notifications: Vec<Notification>,
    pub loading: bool,
    /// Last known terminal size, for mouse hit-testing.
    pub frame_area: Rect,
}

impl App {
    pub fn new(config: TuiConfig, api: RestClient) -> Self {
        Self {
            config,
            theme: InkwellTheme::inkwell(),
            api,
            notes: NotesState::default(),
            sidebar: SidebarState::default(),
            editor: EditorState::default(),
            mode: InputMode::Browse,
            notifications: Vec::new(),
            loading: false,
            frame_area: Rect::new(0, 0, 80, 24),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Drop notices past their display window so the footer falls back to
    /// the key hints. Runs on every tick.
    pub fn prune_notifications(&mut self) {
        let cutoff = Utc::now() - chrono::Duration::seconds(NOTIFICATION_TTL_SECS);
        self.notifications.retain(|n| n.created_at > cutoff);
    }

    /// Fetch and replace the whole collection. Any failure, transport or a
    /// malformed payload, falls back to an empty collection rather than a
    /// partial one. No retry.
    pub async fn load_notes(&mut self) {
        self.loading = true;
        let mut failed = false;
        let notes = match self.api.list_notes().await {
            Ok(raw) => match raw.into_iter().map(transform).collect::<Result<Vec<_>, _>>() {
                Ok(notes) => notes,
                Err(err) => {
                    tracing::warn!(error = %err, "Discarding note list with malformed payload");
                    self.notify(
                        NotificationLevel::Error,
                        format!("Backend sent an unusable note list: {err}"),
                    );
                    failed = true;
                    Vec::new()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "Loading notes failed");
                self.notify(
                    NotificationLevel::Error,
                    format!("Loading notes failed: {err}"),
                );
                failed = true;
                Vec::new()
            }
        };
        let count = notes.len();
        self.notes.replace(notes);
        self.loading = false;
        if !failed {
            self.notify(NotificationLevel::Success, format!("Loaded {count} notes"));
        }
        self.sync_editor();
    }

    /// Create with the default title and empty content. When the backend
    /// cannot service the request the note is synthesized locally so the UI
    /// stays usable offline.
    pub async fn create_note(&mut self) {
        let request = CreateNoteRequest {
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
        };
        let note = match self.api.create_note(&request).await {
            Ok(raw) => match transform(raw) {
                Ok(note) => note,
                Err(err) => {
                    tracing::warn!(error = %err, "Create response was unusable, keeping the note local");
                    self.notify(
                        NotificationLevel::Warning,
                        "Backend answer was unusable, note created locally",
                    );
                    Note::new_local()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "Create failed, keeping the note local");
                self.notify(
                    NotificationLevel::Warning,
                    format!("Create failed, note created locally: {err}"),
                );
                Note::new_local()
            }
        };
        self.notes.insert_selected(note);
        self.sync_editor();
    }

    pub fn select_note(&mut self, id: &NoteId) {
        self.notes.select(id);
        self.sync_editor();
    }

    /// Optimistic content update: local state first, backend sync on a
    /// spawned task for backend-assigned ids. A failed sync is logged and
    /// never rolled back.
    pub fn update_note(&mut self, id: &NoteId, content: String) {
        if !self.notes.apply_content(id, &content) {
            return;
        }
        if id.is_local() {
            return;
        }
        let api = self.api.clone();
        let id = id.clone();
        tokio::spawn(async move {
            let request = UpdateNoteRequest { content };
            if let Err(err) = api.update_note(&id, &request).await {
                tracing::warn!(note_id = %id, error = %err, "Content sync failed");
            }
        });
    }

    pub fn toggle_pin(&mut self, id: &NoteId) {
        let Some(priority) = self.notes.toggle_pin(id) else {
            return;
        };
        self.sync_priority(id, priority);
    }

    pub fn set_priority(&mut self, id: &NoteId, priority: Priority) {
        if !self.notes.set_priority(id, priority) {
            return;
        }
        self.sync_priority(id, priority);
    }

    fn sync_priority(&self, id: &NoteId, priority: Priority) {
        if id.is_local() {
            return;
        }
        let api = self.api.clone();
        let id = id.clone();
        let request = UpdateNotePriorityRequest {
            is_pinned: priority_to_pinned(priority),
        };
        tokio::spawn(async move {
            if let Err(err) = api.update_note_priority(&id, &request).await {
                tracing::warn!(note_id = %id, error = %err, "Priority sync failed");
            }
        });
    }

    /// Local-first soft delete. For backend-assigned ids a best-effort
    /// DELETE fires in the background; the backend's delete is itself a
    /// soft delete, so losing the call only means the note reappears on the
    /// next reload.
    pub fn delete_note(&mut self, id: &NoteId) {
        if !self.notes.soft_delete(id) {
            return;
        }
        if id.is_local() {
            return;
        }
        let api = self.api.clone();
        let id = id.clone();
        tokio::spawn(async move {
            if let Err(err) = api.delete_note(&id).await {
                tracing::warn!(note_id = %id, error = %err, "Delete sync failed");
            }
        });
    }

    /// Purely local: no restore endpoint exists on the wire surface.
    pub fn restore_note(&mut self, id: &NoteId) {
        self.notes.restore(id);
    }

    pub fn add_tag(&mut self, id: &NoteId, tag: &str) {
        self.notes.add_tag(id, tag);
    }

    pub fn remove_tag(&mut self, id: &NoteId, tag: &str) {
        self.notes.remove_tag(id, tag);
    }

    /// Close the options menu when a pointer-down lands outside its region.
    pub fn handle_mouse_down(&mut self, column: u16, row: u16) {
        if self.mode != InputMode::Menu {
            return;
        }
        let Some(menu) = &self.editor.menu else {
            return;
        };
        let (_, body, _) = crate::views::chrome_layout(self.frame_area);
        let (_, editor_area) = crate::views::body_panes(body);
        let area = crate::widgets::menu::menu_area(editor_area, menu.entries.len() as u16);
        if !crate::widgets::menu::hit_test(area, column, row) {
            self.editor.menu = None;
            self.mode = InputMode::Browse;
        }
    }

    /// Rebuild the editor buffer to mirror the current selection.
    pub fn sync_editor(&mut self) {
        let note = self.notes.selected_note().cloned();
        self.editor.load_note(note.as_ref());
    }
}

// ============================================================================
// NOTE COLLECTION
// ============================================================================

/// The authoritative note collection plus the selection cursor. The cursor
/// is the only writer of the per-note `is_selected` flags, which keeps the
/// at-most-one-selected invariant by construction.
#[derive(Debug, Clone, Default)]
pub struct NotesState {
    pub notes: Vec<Note>,
    pub selected: Option<NoteId>,
}

impl NotesState {
    /// Swap in a freshly loaded collection. The cursor survives when its
    /// note is still present, otherwise it clears.
    pub fn replace(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        match self.selected.clone() {
            Some(id) if self.contains(&id) => self.apply_selection(&id),
            _ => self.selected = None,
        }
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.iter().any(|n| n.id == *id)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == *id)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        let id = self.selected.as_ref()?;
        self.get(id)
    }

    /// Move the cursor to `id` if present; selecting an unknown id is a
    /// no-op so stale intents cannot clear a live selection.
    pub fn select(&mut self, id: &NoteId) {
        if self.contains(id) {
            self.apply_selection(id);
        }
    }

    /// Prepend a freshly created note and select it.
    pub fn insert_selected(&mut self, note: Note) {
        let id = note.id.clone();
        self.notes.insert(0, note);
        self.apply_selection(&id);
    }

    /// Recompute derived fields from new content. No-op when the note is
    /// deleted or absent.
    pub fn apply_content(&mut self, id: &NoteId, content: &str) -> bool {
        let Some(note) = self.live_note_mut(id) else {
            return false;
        };
        note.content = content.to_string();
        note.title = derive_title(content);
        note.preview = generate_preview(content);
        note.last_modified = Utc::now();
        true
    }

    /// Flip pinnedness through the priority field. Returns the new priority,
    /// or None when the note is deleted or absent.
    pub fn toggle_pin(&mut self, id: &NoteId) -> Option<Priority> {
        let note = self.live_note_mut(id)?;
        note.priority = pinned_to_priority(!priority_to_pinned(note.priority));
        Some(note.priority)
    }

    pub fn set_priority(&mut self, id: &NoteId, priority: Priority) -> bool {
        match self.live_note_mut(id) {
            Some(note) => {
                note.priority = priority;
                true
            }
            None => false,
        }
    }

    /// Soft delete: the note stays in the collection and keeps its content.
    /// Already-deleted notes are left untouched so `deleted_at` records the
    /// first deletion.
    pub fn soft_delete(&mut self, id: &NoteId) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == *id) else {
            return false;
        };
        if note.is_deleted {
            return false;
        }
        let now = Utc::now();
        note.is_deleted = true;
        note.deleted_at = Some(now);
        note.last_modified = now;
        true
    }

    pub fn restore(&mut self, id: &NoteId) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == *id) else {
            return false;
        };
        if !note.is_deleted {
            return false;
        }
        note.is_deleted = false;
        note.deleted_at = None;
        true
    }

    /// Append a tag; duplicates and blank input are no-ops.
    pub fn add_tag(&mut self, id: &NoteId, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        let Some(note) = self.live_note_mut(id) else {
            return false;
        };
        if note.tags.iter().any(|t| t == tag) {
            return false;
        }
        note.tags.push(tag.to_string());
        true
    }

    /// Remove a tag by exact match.
    pub fn remove_tag(&mut self, id: &NoteId, tag: &str) -> bool {
        let Some(note) = self.live_note_mut(id) else {
            return false;
        };
        let before = note.tags.len();
        note.tags.retain(|t| t != tag);
        note.tags.len() != before
    }

    fn live_note_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == *id && !n.is_deleted)
    }

    fn apply_selection(&mut self, id: &NoteId) {
        for note in &mut self.notes {
            note.is_selected = note.id == *id;
        }
        self.selected = Some(id.clone());
    }
}

/// Cursor movement over the currently visible (filtered, non-collapsed)
/// notes. None selected starts at the top; the ends do not wrap.
pub fn select_next_id(ids: &[NoteId], current: Option<&NoteId>) -> Option<NoteId> {
    if ids.is_empty() {
        return None;
    }
    let next = match current.and_then(|c| ids.iter().position(|id| id == c)) {
        Some(i) => (i + 1).min(ids.len() - 1),
        None => 0,
    };
    Some(ids[next].clone())
}

pub fn select_prev_id(ids: &[NoteId], current: Option<&NoteId>) -> Option<NoteId> {
    if ids.is_empty() {
        return None;
    }
    let prev = match current.and_then(|c| ids.iter().position(|id| id == c)) {
        Some(i) => i.saturating_sub(1),
        None => 0,
    };
    Some(ids[prev].clone())
}

// ============================================================================
// EPHEMERAL UI STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct SidebarState {
    pub search_query: String,
    pub collapsed: HashSet<Section>,
}

impl SidebarState {
    pub fn toggle_section(&mut self, section: Section) {
        if !self.collapsed.remove(&section) {
            self.collapsed.insert(section);
        }
    }

    pub fn is_collapsed(&self, section: Section) -> bool {
        self.collapsed.contains(&section)
    }
}

pub struct EditorState {
    pub textarea: TextArea<'static>,
    /// Which note the buffer currently mirrors.
    pub buffer_note: Option<NoteId>,
    pub tag_input: String,
    pub tag_cursor: usize,
    pub menu: Option<MenuState>,
}

impl EditorState {
    /// Rebuild the buffer for a new selection. Rebuilding is skipped when
    /// the buffer already mirrors the note, so typing does not reset the
    /// cursor.
    pub fn load_note(&mut self, note: Option<&Note>) {
        match note {
            Some(note) => {
                let unchanged =
                    self.buffer_note.as_ref() == Some(&note.id) && self.content() == note.content;
                if !unchanged {
                    let lines: Vec<String> =
                        note.content.split('\n').map(str::to_string).collect();
                    self.textarea = TextArea::new(lines);
                    self.buffer_note = Some(note.id.clone());
                }
            }
            None => {
                self.textarea = TextArea::default();
                self.buffer_note = None;
            }
        }
        self.tag_cursor = 0;
        self.menu = None;
    }

    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

// ============================================================================
// OPTIONS MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    TogglePin,
    Delete,
    Restore,
    Close,
}

impl MenuEntry {
    pub fn label(self, note: &Note) -> &'static str {
        match self {
            MenuEntry::TogglePin => {
                if note.is_pinned() {
                    "Unpin from top"
                } else {
                    "Pin to top"
                }
            }
            MenuEntry::Delete => "Move to trash",
            MenuEntry::Restore => "Restore from trash",
            MenuEntry::Close => "Close menu",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuState {
    pub entries: Vec<MenuEntry>,
    pub selected: usize,
}

impl MenuState {
    /// Pin and delete are disabled (absent) for deleted notes; restore only
    /// appears there.
    pub fn for_note(note: &Note) -> Self {
        let entries = if note.is_deleted {
            vec![MenuEntry::Restore, MenuEntry::Close]
        } else {
            vec![MenuEntry::TogglePin, MenuEntry::Delete, MenuEntry::Close]
        };
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub fn current(&self) -> Option<MenuEntry> {
        self.entries.get(self.selected).copied()
    }
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            collapsed: HashSet::new(),
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            textarea: TextArea::default(),
            buffer_note: None,
            tag_input: String::new(),
            tag_cursor: 0,
            menu: None,
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just(Priority::High),
            Just(Priority::Medium),
            Just(Priority::Low),
        ]
    }

    fn build_note(id: i64, content: String, priority: Priority, deleted: bool) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::from(id),
            title: derive_title(&content),
            preview: generate_preview(&content),
            content,
            priority,
            is_deleted: deleted,
            created_at: now,
            last_modified: now,
            deleted_at: deleted.then_some(now),
            tags: Vec::new(),
            is_selected: false,
        }
    }

    fn arb_note(id: i64) -> impl Strategy<Value = Note> {
        ("[^\n]{0,30}(\n[^\n]{0,30}){0,2}", arb_priority(), any::<bool>()).prop_map(
            move |(content, priority, deleted)| build_note(id, content, priority, deleted),
        )
    }

    fn arb_collection() -> impl Strategy<Value = Vec<Note>> {
        proptest::collection::vec(("[^\n]{0,30}", arb_priority(), any::<bool>()), 0..8).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (content, priority, deleted))| {
                        build_note(i as i64 + 1, content, priority, deleted)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        // At most one note is ever selected, whatever sequence of ids the
        // cursor is pointed at.
        #[test]
        fn selection_stays_single(notes in arb_collection(), picks in proptest::collection::vec(any::<i64>(), 0..12)) {
            let mut state = NotesState::default();
            state.replace(notes);
            for pick in picks {
                state.select(&NoteId::from(pick));
                let selected = state.notes.iter().filter(|n| n.is_selected).count();
                prop_assert!(selected <= 1);
                if let Some(id) = &state.selected {
                    prop_assert!(state.notes.iter().any(|n| n.id == *id && n.is_selected));
                }
            }
        }

        // Delete then restore always round-trips content, title, and tags.
        #[test]
        fn delete_restore_roundtrip(note in arb_note(1)) {
            prop_assume!(!note.is_deleted);
            let mut state = NotesState::default();
            state.replace(vec![note.clone()]);
            state.soft_delete(&note.id);
            state.restore(&note.id);
            let after = state.get(&note.id).unwrap();
            prop_assert_eq!(&after.content, &note.content);
            prop_assert_eq!(&after.title, &note.title);
            prop_assert!(!after.is_deleted);
            prop_assert_eq!(after.deleted_at, None);
        }

        // Toggling pin twice is the identity on live notes with High/Medium
        // priority.
        #[test]
        fn toggle_pin_twice_is_identity(pinned in any::<bool>()) {
            let mut state = NotesState::default();
            let mut note = Note::new_local();
            note.priority = pinned_to_priority(pinned);
            let id = note.id.clone();
            state.replace(vec![note]);
            state.toggle_pin(&id);
            state.toggle_pin(&id);
            prop_assert_eq!(state.get(&id).unwrap().priority, pinned_to_priority(pinned));
        }

        // Applied content always satisfies the derivation invariant.
        #[test]
        fn applied_content_keeps_derivations(content in "[^\n]{0,40}(\n[^\n]{0,40}){0,3}") {
            let mut state = NotesState::default();
            let note = Note::new_local();
            let id = note.id.clone();
            state.replace(vec![note]);
            state.apply_content(&id, &content);
            let after = state.get(&id).unwrap();
            prop_assert_eq!(&after.title, &derive_title(&content));
            prop_assert_eq!(&after.preview, &generate_preview(&content));
        }
    }
}
