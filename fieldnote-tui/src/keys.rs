//! Keybinding definitions for the TUI.
//!
//! Mapping is modal: the same key means different things depending on which
//! component owns input. Text-entry modes (search, tag input) consume
//! printable keys; the editor consumes everything except its escape hatches.

use crate::nav::{InputMode, Section};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    FocusEditor,
    NewNote,
    DeleteNote,
    RestoreNote,
    TogglePin,
    ToggleSection(Section),
    OpenSearch,
    OpenMenu,
    OpenTagInput,
    OpenTagSelect,
    RemoveTag,
    Refresh,
    Confirm,
    Cancel,
    Char(char),
    Backspace,
    ClearLine,
    /// Raw key for the editor buffer; the handler feeds it to the textarea.
    EditorKey(KeyEvent),
}

pub fn map_key(mode: InputMode, event: KeyEvent) -> Option<Action> {
    match mode {
        InputMode::Browse => map_browse_key(event),
        InputMode::Search | InputMode::TagInput => map_text_key(event),
        InputMode::Edit => map_editor_key(event),
        InputMode::TagSelect => map_tag_select_key(event),
        InputMode::Menu => map_menu_key(event),
    }
}

fn map_browse_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter | KeyCode::Tab => Some(Action::FocusEditor),
        KeyCode::Char('n') => Some(Action::NewNote),
        KeyCode::Char('d') => Some(Action::DeleteNote),
        KeyCode::Char('u') => Some(Action::RestoreNote),
        KeyCode::Char('p') => Some(Action::TogglePin),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('m') => Some(Action::OpenMenu),
        KeyCode::Char('t') => Some(Action::OpenTagInput),
        KeyCode::Char('x') => Some(Action::OpenTagSelect),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('1') => Some(Action::ToggleSection(Section::Pinned)),
        KeyCode::Char('2') => Some(Action::ToggleSection(Section::Notes)),
        KeyCode::Char('3') => Some(Action::ToggleSection(Section::Trash)),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn map_text_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::ClearLine),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::Char(c)),
        _ => None,
    }
}

fn map_editor_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if code == KeyCode::Esc {
        return Some(Action::Cancel);
    }
    Some(Action::EditorKey(event))
}

fn map_tag_select_key(event: KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Delete | KeyCode::Char('d') => Some(Action::RemoveTag),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn map_menu_key(event: KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Char('m') => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn browse_keys_map_to_note_intents() {
        assert_eq!(map_key(InputMode::Browse, key(KeyCode::Char('n'))), Some(Action::NewNote));
        assert_eq!(map_key(InputMode::Browse, key(KeyCode::Char('d'))), Some(Action::DeleteNote));
        assert_eq!(map_key(InputMode::Browse, key(KeyCode::Char('u'))), Some(Action::RestoreNote));
        assert_eq!(map_key(InputMode::Browse, key(KeyCode::Char('p'))), Some(Action::TogglePin));
        assert_eq!(
            map_key(InputMode::Browse, key(KeyCode::Char('2'))),
            Some(Action::ToggleSection(Section::Notes))
        );
    }

    #[test]
    fn printable_keys_reach_text_modes() {
        assert_eq!(map_key(InputMode::Search, key(KeyCode::Char('q'))), Some(Action::Char('q')));
        assert_eq!(map_key(InputMode::TagInput, key(KeyCode::Char('/'))), Some(Action::Char('/')));
    }

    #[test]
    fn editor_consumes_everything_but_the_escape_hatches() {
        assert_eq!(map_key(InputMode::Edit, ctrl('c')), Some(Action::Quit));
        assert_eq!(map_key(InputMode::Edit, key(KeyCode::Esc)), Some(Action::Cancel));
        let plain = key(KeyCode::Char('q'));
        assert_eq!(map_key(InputMode::Edit, plain), Some(Action::EditorKey(plain)));
    }

    #[test]
    fn quit_never_fires_from_plain_keys_in_text_modes() {
        assert_ne!(map_key(InputMode::Search, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(InputMode::Search, ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn menu_navigation() {
        assert_eq!(map_key(InputMode::Menu, key(KeyCode::Char('j'))), Some(Action::MoveDown));
        assert_eq!(map_key(InputMode::Menu, key(KeyCode::Enter)), Some(Action::Confirm));
        assert_eq!(map_key(InputMode::Menu, key(KeyCode::Char('m'))), Some(Action::Cancel));
    }
}
