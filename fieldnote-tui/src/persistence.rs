//! Persistence for lightweight UI state.
//!
//! Preferences only: collapse state and the last selection. Note data never
//! touches disk.

use crate::nav::Section;
use fieldnote_core::NoteId;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    pub collapsed_sections: Vec<Section>,
    pub selected_note_id: Option<NoteId>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn load(path: &Path) -> Result<Option<PersistedState>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let state = serde_json::from_str::<PersistedState>(&contents)?;
    Ok(Some(state))
}

pub fn save(path: &Path, state: &PersistedState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(state)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("state.json");
        let state = PersistedState {
            collapsed_sections: vec![Section::Trash],
            selected_note_id: Some(NoteId::from(12)),
        };
        save(&path, &state).expect("saves");
        let loaded = load(&path).expect("loads").expect("present");
        assert_eq!(loaded.collapsed_sections, vec![Section::Trash]);
        assert_eq!(loaded.selected_note_id, Some(NoteId::from(12)));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = load(&dir.path().join("absent.json")).expect("no error");
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(matches!(load(&path), Err(PersistenceError::Serde(_))));
    }
}
