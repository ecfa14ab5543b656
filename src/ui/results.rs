use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Pane};
use crate::commit_line;
use crate::theme::Palette;
use crate::ui::text::fit_to_width;

/// Results pane: loading, error, empty, or the visible slice of log lines.
pub fn render_results(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let focused = app.ui.focused_pane == Pane::Results;
    let results = &app.results;

    if let Some(error) = results.error.as_deref().filter(|_| !results.loading) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.error))
            .title("Error");
        f.render_widget(
            Paragraph::new(error)
                .style(Style::default().fg(palette.error))
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border(focused)))
        .title("Results");

    let placeholder = if results.loading {
        Some("Loading...")
    } else if results.lines.is_empty() {
        Some("No commits found")
    } else {
        None
    };
    if let Some(text) = placeholder {
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(palette.text_dimmed))
                .block(block),
            area,
        );
        return;
    }

    let inner = block.inner(area);
    let width = inner.width as usize;
    let lines: Vec<Line> = results
        .lines
        .iter()
        .enumerate()
        .skip(app.ui.results_scroll)
        .take(inner.height as usize)
        .map(|(i, line)| {
            let selected = focused && i == app.ui.selected_result;
            let text = fit_to_width(line, width.saturating_sub(2));
            if selected {
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(palette.primary)),
                    Span::styled(text, Style::default().fg(palette.text_bright)),
                ])
                .style(Style::default().bg(palette.selection_bg))
            } else {
                let fg = if commit_line::is_commit_line(line) {
                    palette.text_normal
                } else {
                    palette.text_dimmed
                };
                Line::from(vec![Span::raw("  "), Span::styled(text, Style::default().fg(fg))])
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}
