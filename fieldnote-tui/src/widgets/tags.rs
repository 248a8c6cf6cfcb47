//! Tag strip widget for the editor pane.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct TagBar<'a> {
    pub tags: &'a [String],
    /// Highlighted tag while the user is picking one to remove.
    pub selected: Option<usize>,
    /// Pending tag text while the user is typing a new one.
    pub input: Option<&'a str>,
    pub style: Style,
    pub highlight_style: Style,
    pub dim_style: Style,
    pub border_style: Style,
}

impl<'a> TagBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for (i, tag) in self.tags.iter().enumerate() {
            let style = if self.selected == Some(i) {
                self.highlight_style
            } else {
                self.style
            };
            spans.push(Span::styled(format!(" #{tag} "), style));
        }
        if let Some(input) = self.input {
            spans.push(Span::styled(format!(" +{input}_"), self.highlight_style));
        }
        if spans.is_empty() {
            spans.push(Span::styled("no tags", self.dim_style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Tags")
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
