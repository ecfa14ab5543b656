use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, HELP_MARGIN_H, HELP_MARGIN_V};
use crate::keymap::KEYMAPS;
use crate::theme::Palette;

const KEY_COLUMN_WIDTH: usize = 16;

/// Help body rows; the count matches `keymap::help_line_count`.
fn help_lines(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, section) in KEYMAPS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(
            section.category,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ));
        for item in section.items {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", item.key, width = KEY_COLUMN_WIDTH),
                    Style::default().fg(palette.secondary),
                ),
                Span::styled(item.desc, Style::default().fg(palette.text_normal)),
            ]));
        }
    }
    lines
}

pub fn render_help(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let popup = area.inner(Margin {
        horizontal: HELP_MARGIN_H,
        vertical: HELP_MARGIN_V,
    });
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border_focused))
        .style(Style::default().bg(palette.overlay_bg))
        .title("Help - Keyboard Shortcuts")
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let body: Vec<Line> = help_lines(palette)
        .into_iter()
        .skip(app.ui.help_scroll)
        .take(chunks[0].height as usize)
        .collect();
    f.render_widget(Paragraph::new(body), chunks[0]);
    f.render_widget(
        Paragraph::new("Press ? or Esc to close").style(Style::default().fg(palette.text_dimmed)),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;
    use crate::theme;

    #[test]
    fn test_help_lines_match_scroll_bound() {
        assert_eq!(help_lines(&theme::palette()).len(), keymap::help_line_count());
    }
}
