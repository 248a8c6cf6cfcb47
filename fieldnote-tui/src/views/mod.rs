//! View rendering dispatch.

pub mod editor;
pub mod sidebar;

use crate::nav::InputMode;
use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::widgets::MenuPopup;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the terminal into header, body, and footer. The mouse handler
/// reuses this, so render and hit-testing always agree on the geometry.
pub fn chrome_layout(area: Rect) -> (Rect, Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);
    (layout[0], layout[1], layout[2])
}

/// Split the body into the sidebar and the editor pane.
pub fn body_panes(area: Rect) -> (Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);
    (layout[0], layout[1])
}

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let (header, body, footer) = chrome_layout(f.size());
    let (sidebar_area, editor_area) = body_panes(body);

    render_header(f, app, header);
    sidebar::render(f, app, sidebar_area);
    editor::render(f, app, editor_area);
    render_footer(f, app, footer);

    if app.mode == InputMode::Menu {
        if let (Some(menu), Some(note)) = (&app.editor.menu, app.notes.selected_note()) {
            let popup = MenuPopup {
                title: "Options",
                entries: menu
                    .entries
                    .iter()
                    .map(|entry| entry.label(note).to_string())
                    .collect(),
                selected: menu.selected,
                style: Style::default()
                    .fg(app.theme.text)
                    .bg(app.theme.bg_secondary),
                highlight_style: Style::default()
                    .fg(app.theme.bg)
                    .bg(app.theme.primary),
                border_style: Style::default().fg(app.theme.border_focus),
            };
            popup.render(
                f,
                crate::widgets::menu::menu_area(editor_area, menu.entries.len() as u16),
            );
        }
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let live = app.notes.notes.iter().filter(|n| !n.is_deleted).count();
    let trashed = app.notes.notes.len() - live;
    let status = if app.loading {
        "loading...".to_string()
    } else {
        format!("{live} notes, {trashed} in trash")
    };
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!("FIELDNOTE | {status}"),
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.mode {
        InputMode::Browse => {
            "j/k move • Enter edit • n new • p pin • d trash • u restore • / search • m menu • q quit"
        }
        InputMode::Search => "type to filter • Enter keep • Esc clear",
        InputMode::Edit => "type to edit • Esc save and leave",
        InputMode::TagInput => "type a tag • Enter add • Esc cancel",
        InputMode::TagSelect => "h/l pick • d remove • Esc done",
        InputMode::Menu => "j/k pick • Enter run • Esc close",
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        let color = match note.level {
            NotificationLevel::Info => app.theme.info,
            NotificationLevel::Warning => app.theme.warning,
            NotificationLevel::Error => app.theme.error,
            NotificationLevel::Success => app.theme.success,
        };
        (format!("{}: {}", label, note.message), Style::default().fg(color))
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
