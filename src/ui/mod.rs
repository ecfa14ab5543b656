//! ratatui rendering. Draws from `App` state only; nothing here mutates it.

mod detail;
mod help;
mod results;
mod sidebar;
mod text;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, COMMAND_BAR_HEIGHT, FOOTER_HEIGHT, SIDEBAR_WIDTH, View};
use crate::keymap::{self, MAIN_FOOTER_HINTS};
use crate::theme::{self, Palette};

pub fn draw_ui(f: &mut Frame, app: &App) {
    let palette = theme::palette();
    let area = f.area();

    match app.ui.view {
        View::Detail => detail::render_detail(app, f, area, &palette),
        View::Main => render_main(app, f, area, &palette),
    }

    if app.ui.show_help {
        help::render_help(app, f, area, &palette);
    }
}

fn render_main(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(COMMAND_BAR_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    if app.ui.sidebar_visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[0]);
        sidebar::render_sidebar(app, f, cols[0], palette);
        results::render_results(app, f, cols[1], palette);
    } else {
        results::render_results(app, f, rows[0], palette);
    }

    render_command_bar(app, f, rows[1], palette);
    render_footer(app, f, rows[2], palette, &keymap::format_footer_hints(MAIN_FOOTER_HINTS));
}

fn render_command_bar(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let width = (area.width as usize).saturating_sub(3);
    let line = Line::from(vec![
        Span::styled(" > ", Style::default().fg(palette.text_dimmed)),
        Span::styled(
            text::fit_to_width(&app.command.display, width),
            Style::default().fg(palette.primary),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.bar_bg)),
        area,
    );
}

/// Footer row: the transient status message when present, else `hints`.
fn render_footer(app: &App, f: &mut Frame, area: Rect, palette: &Palette, hints: &str) {
    let (msg, fg) = match &app.status_message {
        Some((msg, _)) => (msg.as_str(), palette.primary),
        None => (hints, palette.text_dimmed),
    };
    f.render_widget(
        Paragraph::new(format!(" {}", text::fit_to_width(msg, area.width as usize)))
            .style(Style::default().fg(fg).bg(palette.bar_bg)),
        area,
    );
}
