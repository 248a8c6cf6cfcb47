//! Note options popup menu.
//!
//! The geometry lives in [`menu_area`] so the renderer and the mouse
//! handler agree on where the menu is: a click is "outside the menu"
//! exactly when [`hit_test`] says so for the same rect the renderer drew.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

const MENU_WIDTH: u16 = 26;

/// Where the options menu sits: anchored to the top-right corner of the
/// editor pane, inset one cell, sized to its entries.
pub fn menu_area(editor_area: Rect, entry_count: u16) -> Rect {
    let width = MENU_WIDTH.min(editor_area.width);
    let height = (entry_count + 2).min(editor_area.height);
    let x = (editor_area.x + editor_area.width)
        .saturating_sub(width + 1)
        .max(editor_area.x);
    let y = (editor_area.y + 1).min(editor_area.y + editor_area.height.saturating_sub(height));
    Rect::new(x, y, width, height)
}

pub fn hit_test(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

pub struct MenuPopup<'a> {
    pub title: &'a str,
    pub entries: Vec<String>,
    pub selected: usize,
    pub style: Style,
    pub highlight_style: Style,
    pub border_style: Style,
}

impl<'a> MenuPopup<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(format!(" {entry}")))
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.selected.min(self.entries.len().saturating_sub(1))));

        let list = List::new(items)
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(self.border_style),
            )
            .style(self.style)
            .highlight_style(self.highlight_style);

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_stays_inside_the_editor_pane() {
        let editor = Rect::new(30, 3, 50, 20);
        let area = menu_area(editor, 3);
        assert!(area.x >= editor.x);
        assert!(area.y >= editor.y);
        assert!(area.x + area.width <= editor.x + editor.width);
        assert!(area.y + area.height <= editor.y + editor.height);
    }

    #[test]
    fn menu_height_follows_entry_count() {
        let editor = Rect::new(0, 0, 80, 24);
        assert_eq!(menu_area(editor, 3).height, 5);
        assert_eq!(menu_area(editor, 2).height, 4);
    }

    #[test]
    fn menu_clamps_on_a_tiny_terminal() {
        let editor = Rect::new(0, 0, 10, 3);
        let area = menu_area(editor, 5);
        assert!(area.width <= editor.width);
        assert!(area.height <= editor.height);
    }

    #[test]
    fn hit_test_matches_the_drawn_rect() {
        let area = Rect::new(10, 5, 20, 4);
        assert!(hit_test(area, 10, 5));
        assert!(hit_test(area, 29, 8));
        assert!(!hit_test(area, 30, 8));
        assert!(!hit_test(area, 9, 5));
        assert!(!hit_test(area, 10, 9));
    }
}
