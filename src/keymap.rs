//! Key bindings as shown in the help overlay and the footer.

pub struct KeymapItem {
    pub key: &'static str,
    pub desc: &'static str,
}

pub struct KeymapSection {
    pub category: &'static str,
    pub items: &'static [KeymapItem],
}

const fn item(key: &'static str, desc: &'static str) -> KeymapItem {
    KeymapItem { key, desc }
}

pub const KEYMAPS: &[KeymapSection] = &[
    KeymapSection {
        category: "Navigation",
        items: &[
            item("j/k", "Move up/down"),
            item("h/l", "Switch focus (sidebar/results)"),
            item("[/]", "Previous/next section"),
            item("Tab", "Toggle sidebar"),
        ],
    },
    KeymapSection {
        category: "Flags",
        items: &[
            item("Space/Enter", "Toggle flag / cycle option"),
            item("Enter", "Edit text flag (opens input)"),
            item("d", "Clear text flag value"),
        ],
    },
    KeymapSection {
        category: "Results",
        items: &[
            item("Enter", "Open commit detail view"),
            item("y", "Yank command to clipboard"),
        ],
    },
    KeymapSection {
        category: "Detail View",
        items: &[
            item("Esc", "Return to main view"),
            item("j/k", "Scroll up/down"),
            item("y", "Yank commit hash"),
        ],
    },
    KeymapSection {
        category: "General",
        items: &[item("?", "Toggle this help"), item("q", "Quit")],
    },
];

pub const MAIN_FOOTER_HINTS: &[KeymapItem] = &[
    item("?", "help"),
    item("Tab", "sidebar"),
    item("h/l", "panes"),
    item("j/k", "nav"),
    item("Enter", "select"),
    item("y", "yank"),
    item("q", "quit"),
];

pub const DETAIL_FOOTER_HINTS: &[KeymapItem] = &[
    item("Esc", "back"),
    item("j/k", "scroll"),
    item("y", "yank hash"),
    item("q", "quit"),
];

pub fn format_footer_hints(hints: &[KeymapItem]) -> String {
    hints
        .iter()
        .map(|h| format!("[{}] {}", h.key, h.desc))
        .collect::<Vec<_>>()
        .join("   ")
}

/// Rows the help body occupies: a title row per section, one row per
/// binding, and a blank row between sections.
pub fn help_line_count() -> usize {
    let body: usize = KEYMAPS.iter().map(|s| 1 + s.items.len()).sum();
    body + KEYMAPS.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_format() {
        assert_eq!(
            format_footer_hints(DETAIL_FOOTER_HINTS),
            "[Esc] back   [j/k] scroll   [y] yank hash   [q] quit"
        );
    }

    #[test]
    fn test_help_line_count() {
        // 5 titles + 14 bindings + 4 separators
        assert_eq!(help_line_count(), 23);
    }
}
