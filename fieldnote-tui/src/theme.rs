//! Inkwell theme and color utilities.

use crate::nav::Section;
use fieldnote_core::Priority;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct InkwellTheme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl InkwellTheme {
    pub fn inkwell() -> Self {
        Self {
            bg: Color::Rgb(24, 24, 28),
            bg_secondary: Color::Rgb(32, 32, 38),
            bg_highlight: Color::Rgb(54, 54, 64),
            primary: Color::Rgb(122, 162, 247),
            secondary: Color::Rgb(187, 154, 247),
            success: Color::Rgb(158, 206, 106),
            warning: Color::Rgb(224, 175, 104),
            error: Color::Rgb(247, 118, 142),
            info: Color::Rgb(125, 207, 255),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            text_muted: Color::Rgb(88, 91, 112),
            border: Color::Rgb(69, 71, 90),
            border_focus: Color::Rgb(122, 162, 247),
        }
    }
}

/// Marker color for a note's priority level: red/yellow/green, highest first.
pub fn priority_color(priority: Priority, theme: &InkwellTheme) -> Color {
    match priority {
        Priority::High => theme.error,
        Priority::Medium => theme.warning,
        Priority::Low => theme.success,
    }
}

pub fn section_color(section: Section, theme: &InkwellTheme) -> Color {
    match section {
        Section::Pinned => theme.warning,
        Section::Notes => theme.primary,
        Section::Trash => theme.text_dim,
    }
}
