use ratatui::style::Color;

/// Tokyo Night colors used across every pane.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    /// Focus borders, active markers
    pub primary: Color,
    /// Key names in the help overlay
    pub secondary: Color,
    pub text_bright: Color,
    pub text_normal: Color,
    pub text_dimmed: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub error: Color,
    pub overlay_bg: Color,
    pub selection_bg: Color,
    pub bar_bg: Color,
}

pub fn palette() -> Palette {
    Palette {
        primary: Color::Rgb(122, 162, 247),
        secondary: Color::Rgb(187, 154, 247),
        text_bright: Color::Rgb(192, 202, 245),
        text_normal: Color::Rgb(169, 177, 214),
        text_dimmed: Color::Rgb(86, 95, 137),
        border_focused: Color::Rgb(122, 162, 247),
        border_unfocused: Color::Rgb(65, 72, 104),
        error: Color::Rgb(247, 118, 142),
        overlay_bg: Color::Rgb(26, 27, 38),
        selection_bg: Color::Rgb(36, 40, 59),
        bar_bg: Color::Rgb(26, 26, 46),
    }
}

impl Palette {
    pub fn border(&self, focused: bool) -> Color {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}
