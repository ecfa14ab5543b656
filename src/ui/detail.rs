use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, FOOTER_HEIGHT};
use crate::keymap::{self, DETAIL_FOOTER_HINTS};
use crate::theme::Palette;
use crate::ui::text::fit_to_width;
use crate::ui::render_footer;

/// Full-screen `git show` output for the opened commit.
pub fn render_detail(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);

    let hash = app.detail.commit_hash.as_deref().unwrap_or("");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border_focused))
        .title(format!("Commit {}", hash));
    let inner = block.inner(chunks[0]);
    let width = inner.width as usize;

    let lines: Vec<Line> = app
        .detail
        .lines
        .iter()
        .skip(app.detail.scroll)
        .take(inner.height as usize)
        .map(|l| Line::styled(fit_to_width(l, width), Style::default().fg(palette.text_bright)))
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    render_footer(app, f, chunks[1], palette, &keymap::format_footer_hints(DETAIL_FOOTER_HINTS));
}
