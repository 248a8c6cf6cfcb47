//! Editor pane: metadata header, content buffer, tag strip.

use crate::nav::InputMode;
use crate::state::App;
use crate::widgets::{DetailPanel, TagBar};
use fieldnote_core::Note;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(note) = app.notes.selected_note() else {
        render_welcome(f, app, area);
        return;
    };

    let mut constraints = Vec::new();
    if note.is_deleted {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(7));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut next = 0;

    if note.is_deleted {
        render_trash_banner(f, app, note, chunks[next]);
        next += 1;
    }

    render_meta(f, app, note, chunks[next]);
    render_content(f, app, note, chunks[next + 1]);

    let tags = TagBar {
        tags: &note.tags,
        selected: tag_cursor(app, note),
        input: (app.mode == InputMode::TagInput).then_some(app.editor.tag_input.as_str()),
        style: Style::default().fg(app.theme.secondary),
        highlight_style: Style::default()
            .fg(app.theme.bg)
            .bg(app.theme.secondary),
        dim_style: Style::default().fg(app.theme.text_muted),
        border_style: border_style(
            app,
            matches!(app.mode, InputMode::TagInput | InputMode::TagSelect),
        ),
    };
    tags.render(f, chunks[next + 2]);
}

fn tag_cursor(app: &App, note: &Note) -> Option<usize> {
    if app.mode != InputMode::TagSelect || note.tags.is_empty() {
        return None;
    }
    Some(app.editor.tag_cursor.min(note.tags.len() - 1))
}

fn border_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default().fg(app.theme.border_focus)
    } else {
        Style::default().fg(app.theme.border)
    }
}

fn render_trash_banner(f: &mut Frame<'_>, app: &App, note: &Note, area: Rect) {
    let since = note
        .deleted_at
        .map(|ts| ts.format("%b %e %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let banner = Paragraph::new(format!("In trash since {since}. Press u to restore."))
        .style(
            Style::default()
                .fg(app.theme.warning)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.warning)),
        );
    f.render_widget(banner, area);
}

fn render_meta(f: &mut Frame<'_>, app: &App, note: &Note, area: Rect) {
    let priority = if note.is_pinned() {
        format!("{} (pinned)", note.priority)
    } else {
        note.priority.to_string()
    };
    let status = if note.is_deleted { "In trash" } else { "Active" };
    let detail = DetailPanel {
        title: "Note",
        fields: vec![
            ("Created", note.created_at.format("%b %e, %Y %H:%M").to_string()),
            ("Modified", note.last_modified.format("%b %e, %Y %H:%M").to_string()),
            ("Priority", priority),
            ("Status", status.to_string()),
            ("Tags", note.tags.len().to_string()),
        ],
        label_style: Style::default().fg(app.theme.text_dim),
        value_style: Style::default().fg(app.theme.text),
        border_style: border_style(app, false),
    };
    detail.render(f, area);
}

fn render_content(f: &mut Frame<'_>, app: &App, note: &Note, area: Rect) {
    let block = Block::default()
        .title(note.title.clone())
        .borders(Borders::ALL)
        .border_style(border_style(app, app.mode == InputMode::Edit));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if note.is_deleted {
        // Read-only rendering; the buffer is not editable in the trash.
        let content = Paragraph::new(note.content.clone())
            .style(Style::default().fg(app.theme.text_dim))
            .wrap(Wrap { trim: false });
        f.render_widget(content, inner);
    } else {
        f.render_widget(app.editor.textarea.widget(), inner);
    }
}

fn render_welcome(f: &mut Frame<'_>, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "FIELDNOTE",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "a quiet place for notes",
            Style::default().fg(app.theme.text_dim),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "n  create a note",
            Style::default().fg(app.theme.text),
        )),
        Line::from(Span::styled(
            "/  search",
            Style::default().fg(app.theme.text),
        )),
        Line::from(Span::styled(
            "j/k  move around",
            Style::default().fg(app.theme.text),
        )),
        Line::from(Span::styled(
            "q  quit",
            Style::default().fg(app.theme.text),
        )),
    ];
    let welcome = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Editor")
                .borders(Borders::ALL)
                .border_style(border_style(app, false)),
        );
    f.render_widget(welcome, area);
}
