//! Sidebar: search input plus the grouped note list.

use crate::nav::{InputMode, Section};
use crate::state::App;
use crate::theme::{priority_color, section_color, InkwellTheme};
use crate::widgets::SearchBar;
use fieldnote_core::{Note, NoteId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::collections::HashSet;

/// Case-insensitive substring filter over title and content. A blank query
/// keeps everything.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return notes.iter().collect();
    }
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&query)
                || note.content.to_lowercase().contains(&query)
        })
        .collect()
}

/// The three sidebar groups. Mutually exclusive and exhaustive: deleted
/// notes land in trash no matter their priority.
#[derive(Debug, Default)]
pub struct NoteGroups<'a> {
    pub pinned: Vec<&'a Note>,
    pub regular: Vec<&'a Note>,
    pub trash: Vec<&'a Note>,
}

impl<'a> NoteGroups<'a> {
    pub fn for_section(&self, section: Section) -> &[&'a Note] {
        match section {
            Section::Pinned => &self.pinned,
            Section::Notes => &self.regular,
            Section::Trash => &self.trash,
        }
    }
}

pub fn group_notes<'a>(notes: &[&'a Note]) -> NoteGroups<'a> {
    let mut groups = NoteGroups::default();
    for note in notes {
        if note.is_deleted {
            groups.trash.push(note);
        } else if note.is_pinned() {
            groups.pinned.push(note);
        } else {
            groups.regular.push(note);
        }
    }
    groups
}

/// Note ids the cursor can walk, in on-screen order: filtered, grouped,
/// collapsed sections skipped.
pub fn visible_note_ids(
    notes: &[Note],
    query: &str,
    collapsed: &HashSet<Section>,
) -> Vec<NoteId> {
    let filtered = filter_notes(notes, query);
    let groups = group_notes(&filtered);
    let mut ids = Vec::new();
    for &section in Section::all() {
        if collapsed.contains(&section) {
            continue;
        }
        ids.extend(groups.for_section(section).iter().map(|n| n.id.clone()));
    }
    ids
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search = SearchBar {
        query: &app.sidebar.search_query,
        active: app.mode == InputMode::Search,
        style: Style::default().fg(app.theme.text),
        placeholder_style: Style::default().fg(app.theme.text_muted),
        border_style: if app.mode == InputMode::Search {
            Style::default().fg(app.theme.border_focus)
        } else {
            Style::default().fg(app.theme.border)
        },
    };
    search.render(f, chunks[0]);

    let filtered = filter_notes(&app.notes.notes, &app.sidebar.search_query);
    let groups = group_notes(&filtered);

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = None;

    if app.loading {
        items.push(ListItem::new(Span::styled(
            "Loading...",
            Style::default().fg(app.theme.text_dim),
        )));
    } else {
        for &section in Section::all() {
            let notes = groups.for_section(section);
            let collapsed = app.sidebar.is_collapsed(section);
            items.push(section_header(section, notes.len(), collapsed, &app.theme));
            if collapsed {
                continue;
            }
            if notes.is_empty() {
                items.push(ListItem::new(Span::styled(
                    "  No notes",
                    Style::default().fg(app.theme.text_muted),
                )));
                continue;
            }
            for note in notes {
                if app.notes.selected.as_ref() == Some(&note.id) {
                    selected_row = Some(items.len());
                }
                items.push(note_row(note, &app.theme));
            }
        }
    }

    let mut state = ListState::default();
    state.select(selected_row);

    let list = List::new(items)
        .block(
            Block::default()
                .title("Notes")
                .borders(Borders::ALL)
                .border_style(if app.mode == InputMode::Browse {
                    Style::default().fg(app.theme.border_focus)
                } else {
                    Style::default().fg(app.theme.border)
                }),
        )
        .highlight_style(
            Style::default()
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn section_header(
    section: Section,
    count: usize,
    collapsed: bool,
    theme: &InkwellTheme,
) -> ListItem<'static> {
    let marker = if collapsed { "▸" } else { "▾" };
    ListItem::new(Span::styled(
        format!("{marker} {} ({count})", section.title()),
        Style::default()
            .fg(section_color(section, theme))
            .add_modifier(Modifier::BOLD),
    ))
}

fn note_row(note: &Note, theme: &InkwellTheme) -> ListItem<'static> {
    let title_color = if note.is_deleted {
        theme.text_muted
    } else {
        theme.text
    };
    let mut title_spans = vec![
        Span::styled(
            "● ",
            Style::default().fg(priority_color(note.priority, theme)),
        ),
        Span::styled(format!("  {}", note.title), Style::default().fg(title_color)),
    ];
    for tag in &note.tags {
        title_spans.push(Span::styled(
            format!(" #{tag}"),
            Style::default().fg(theme.secondary),
        ));
    }

    let meta = format!(
        "    {} · Priority: {}",
        note.last_modified.format("%b %e %H:%M"),
        note.priority
    );
    let mut lines = vec![
        Line::from(title_spans),
        Line::from(Span::styled(meta, Style::default().fg(theme.text_dim))),
    ];
    if !note.preview.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", note.preview.replace('\n', " ")),
            Style::default().fg(theme.text_dim),
        )));
    }
    ListItem::new(Text::from(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldnote_core::{derive_title, generate_preview, Priority};

    fn note(id: i64, content: &str, priority: Priority, deleted: bool) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::from(id),
            title: derive_title(content),
            preview: generate_preview(content),
            content: content.to_string(),
            priority,
            is_deleted: deleted,
            created_at: now,
            last_modified: now,
            deleted_at: deleted.then_some(now),
            tags: Vec::new(),
            is_selected: false,
        }
    }

    #[test]
    fn filter_is_case_insensitive_over_title_and_content() {
        let notes = vec![
            note(1, "Groceries\nmilk and eggs", Priority::Medium, false),
            note(2, "Workout\nsquats", Priority::Medium, false),
        ];
        let hits = filter_notes(&notes, "GROCER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, NoteId::from(1));
        // content matches too
        let hits = filter_notes(&notes, "squat");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, NoteId::from(2));
    }

    #[test]
    fn blank_query_keeps_everything() {
        let notes = vec![
            note(1, "a", Priority::Medium, false),
            note(2, "b", Priority::Medium, true),
        ];
        assert_eq!(filter_notes(&notes, "").len(), 2);
        assert_eq!(filter_notes(&notes, "   ").len(), 2);
    }

    #[test]
    fn groups_partition_the_filtered_set() {
        let notes = vec![
            note(1, "pinned", Priority::High, false),
            note(2, "plain", Priority::Medium, false),
            note(3, "low", Priority::Low, false),
            note(4, "gone", Priority::High, true),
        ];
        let refs: Vec<&Note> = notes.iter().collect();
        let groups = group_notes(&refs);
        assert_eq!(groups.pinned.len(), 1);
        assert_eq!(groups.regular.len(), 2);
        assert_eq!(groups.trash.len(), 1);
        // a deleted note lands in trash even when pinned
        assert_eq!(groups.trash[0].id, NoteId::from(4));
    }

    #[test]
    fn visible_ids_skip_collapsed_sections() {
        let notes = vec![
            note(1, "pinned", Priority::High, false),
            note(2, "plain", Priority::Medium, false),
            note(3, "gone", Priority::Medium, true),
        ];
        let mut collapsed = HashSet::new();
        let all = visible_note_ids(&notes, "", &collapsed);
        assert_eq!(
            all,
            vec![NoteId::from(1), NoteId::from(2), NoteId::from(3)]
        );

        collapsed.insert(Section::Notes);
        let without_regular = visible_note_ids(&notes, "", &collapsed);
        assert_eq!(without_regular, vec![NoteId::from(1), NoteId::from(3)]);
    }

    #[test]
    fn visible_ids_respect_the_filter() {
        let notes = vec![
            note(1, "alpha\nbody", Priority::High, false),
            note(2, "beta\nbody", Priority::Medium, false),
        ];
        let ids = visible_note_ids(&notes, "beta", &HashSet::new());
        assert_eq!(ids, vec![NoteId::from(2)]);
    }
}
