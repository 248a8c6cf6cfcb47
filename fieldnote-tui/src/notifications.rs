//! Notification system for the TUI.
//!
//! Footer-line notices only. Backend failures that matter to the user (a
//! load or create falling back locally) land here; optimistic-sync failures
//! stay in the log.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
