//! Search input widget for the sidebar.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct SearchBar<'a> {
    pub query: &'a str,
    pub active: bool,
    pub style: Style,
    pub placeholder_style: Style,
    pub border_style: Style,
}

impl<'a> SearchBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let line = if self.query.is_empty() && !self.active {
            Line::from(Span::styled("Press / to search", self.placeholder_style))
        } else {
            let mut spans = vec![Span::styled(self.query.to_string(), self.style)];
            if self.active {
                spans.push(Span::styled("_", self.style));
            }
            Line::from(spans)
        };

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
