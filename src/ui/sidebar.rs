//! Flag sidebar: section headers, one row per control, and the input bar
//! while a text or number entry is being edited.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, INPUT_BAR_HEIGHT, Pane, SIDEBAR_WIDTH};
use crate::flags::{FlagControl, FlagDefinition, FlagState, Section, Select};
use crate::sidebar::{self, SidebarItem};
use crate::theme::Palette;
use crate::ui::text::fit_to_width;

const HEADER_DECORATION: usize = 6;

/// `── NAME ──` centred in the sidebar's inner width.
fn header_text(section: Section, inner_width: usize) -> String {
    let name = section.name();
    let pad = inner_width.saturating_sub(name.len() + HEADER_DECORATION) / 2;
    let rule = "─".repeat(pad.max(1));
    format!("{} {} {}", rule, name, rule)
}

/// Text of a control row without the selection marker.
pub fn control_text(def: &FlagDefinition, flags: &FlagState) -> String {
    match def.control {
        FlagControl::Toggle { flag, .. } => {
            let mark = if flags.toggle(flag) { "[x]" } else { "[ ]" };
            format!("{} {}", mark, def.label)
        }
        FlagControl::Text(field) => match flags.text(field) {
            Some(value) => format!("[>] {} {}", def.label, value),
            None => format!("[ ] {}", def.label),
        },
        FlagControl::Number(field) => match flags.number(field) {
            Some(value) => format!("[>] {} {}", def.label, value),
            None => format!("[ ] {}", def.label),
        },
        FlagControl::SingleSelect(Select::Order) => {
            let value = flags.order.arg();
            format!("(*) Order: {}", value.as_deref().unwrap_or("default"))
        }
        FlagControl::SingleSelect(Select::DateFormat) => {
            let value = flags.date_format.arg();
            format!("(*) Date: {}", value.as_deref().unwrap_or("default"))
        }
        FlagControl::MultiSelect(filter) => {
            let mark = if flags.diff_filter.contains(filter) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{} {}", mark, def.label)
        }
    }
}

pub fn render_sidebar(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let focused = app.ui.focused_pane == Pane::Sidebar;
    let section = sidebar::section_of_selectable_index(app.ui.selected_flag);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border(focused)))
        .title(format!("Flags: {}", section.name()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (list_area, input_area) = if app.ui.input_mode() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(INPUT_BAR_HEIGHT)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    let width = list_area.width as usize;
    let inner_width = SIDEBAR_WIDTH.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .sidebar_items
        .iter()
        .skip(app.ui.sidebar_scroll)
        .take(list_area.height as usize)
        .map(|item| match *item {
            SidebarItem::Header(section) => Line::from(Span::styled(
                fit_to_width(&header_text(section, inner_width), width),
                Style::default().fg(palette.text_dimmed),
            )),
            SidebarItem::Control { flag, index } => {
                let active = focused && index == app.ui.selected_flag;
                control_line(flag, &app.flags, active, width, palette)
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);

    if let Some(input_area) = input_area {
        render_input_bar(app, f, input_area, palette);
    }
}

fn control_line(
    def: &FlagDefinition,
    flags: &FlagState,
    active: bool,
    width: usize,
    palette: &Palette,
) -> Line<'static> {
    let (marker, marker_fg, text_fg) = if active {
        ("> ", palette.primary, palette.text_bright)
    } else {
        ("  ", palette.text_dimmed, palette.text_normal)
    };
    let text = fit_to_width(&control_text(def, flags), width.saturating_sub(2));
    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(marker_fg)),
        Span::styled(text, Style::default().fg(text_fg)),
    ]);
    if active {
        line.style(Style::default().bg(palette.selection_bg))
    } else {
        line
    }
}

fn render_input_bar(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let placeholder = app
        .ui
        .input_target
        .and_then(|def| def.placeholder)
        .unwrap_or("value");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border_focused))
        .title(Span::styled(
            format!("Enter value ({})", placeholder),
            Style::default().fg(palette.text_dimmed),
        ));
    let inner = block.inner(area);

    // Keep the cursor in view by showing the tail of long input.
    let room = (inner.width as usize).saturating_sub(3);
    let value = &app.ui.input_value;
    let skip = value.chars().count().saturating_sub(room);
    let shown: String = value.chars().skip(skip).collect();

    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(palette.primary)),
        Span::styled(shown, Style::default().fg(palette.text_bright)),
        Span::styled(
            "_",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{NumberField, TextField, find_flag};

    fn text_of(id: &str, flags: &FlagState) -> String {
        control_text(find_flag(id).unwrap(), flags)
    }

    #[test]
    fn test_header_is_centred() {
        assert_eq!(header_text(Section::Format, 32), "────────── FORMAT ──────────");
        assert!(header_text(Section::DateFmt, 8).starts_with("─ "));
    }

    #[test]
    fn test_control_text_by_kind() {
        let mut flags = FlagState::default();
        assert_eq!(text_of("oneline", &flags), "[x] --oneline");
        assert_eq!(text_of("graph", &flags), "[ ] --graph");
        assert_eq!(text_of("author", &flags), "[ ] --author=");
        assert_eq!(text_of("order", &flags), "(*) Order: default");

        flags.set_text(TextField::Author, Some("jane".to_string()));
        flags.set_number(NumberField::MaxCount, Some(20));
        flags.cycle(Select::Order);
        flags.cycle(Select::DateFormat);
        assert_eq!(text_of("author", &flags), "[>] --author= jane");
        assert_eq!(text_of("maxCount", &flags), "[>] -n 20");
        assert_eq!(text_of("order", &flags), "(*) Order: --date-order");
        assert_eq!(text_of("dateFormat", &flags), "(*) Date: --date=relative");
    }
}
