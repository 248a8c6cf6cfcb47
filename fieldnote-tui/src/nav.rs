//! Navigation primitives: sidebar sections and input modes.

use serde::{Deserialize, Serialize};

/// The three sidebar groups. Mutually exclusive and exhaustive over the
/// filtered collection: High-priority live notes pin, other live notes list,
/// deleted notes go to trash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Pinned,
    Notes,
    Trash,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Pinned => "Pinned",
            Section::Notes => "Notes",
            Section::Trash => "Trash",
        }
    }

    /// Render and navigation order.
    pub fn all() -> &'static [Section] {
        &[Section::Pinned, Section::Notes, Section::Trash]
    }
}

/// Which component currently consumes key events. `Browse` is the sidebar;
/// everything else is a text-entry or overlay mode layered on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    Edit,
    TagInput,
    TagSelect,
    Menu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_order_is_pinned_notes_trash() {
        assert_eq!(
            Section::all(),
            &[Section::Pinned, Section::Notes, Section::Trash]
        );
    }

    #[test]
    fn section_titles() {
        assert_eq!(Section::Pinned.title(), "Pinned");
        assert_eq!(Section::Trash.title(), "Trash");
    }
}
