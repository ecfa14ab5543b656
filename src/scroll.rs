//! Scroll window policy shared by the sidebar, results and detail panes.

/// Rows kept visible above and below the sidebar selection when possible.
pub const SIDEBAR_MARGIN: usize = 2;

/// Derives the first visible row for a list of `total` rows shown in a
/// viewport of `capacity` rows, keeping `selected` inside the viewport with up
/// to `margin` rows of context on each side.
///
/// The previous offset is reused while the selection stays inside the margin
/// band, so the viewport only moves when it has to.
pub fn scroll_offset(
    total: usize,
    capacity: usize,
    selected: usize,
    previous: usize,
    margin: usize,
) -> usize {
    if capacity == 0 || total <= capacity {
        return 0;
    }
    let selected = selected.min(total - 1);
    let max_offset = total - capacity;

    // Both margins together must leave a row for the selection itself.
    let margin = margin.min((capacity - 1) / 2);
    let above = margin.min(selected);
    let below = margin.min(total - 1 - selected);

    let max_for_top = selected - above;
    let min_for_bottom = (selected + 1 + below).saturating_sub(capacity);

    let offset = if previous < min_for_bottom {
        min_for_bottom
    } else if previous > max_for_top {
        max_for_top
    } else {
        previous
    };
    offset.min(max_offset)
}

/// Offset after scrolling one row forward, clamped so the last page stays full.
pub fn scroll_down(offset: usize, total: usize, capacity: usize) -> usize {
    (offset + 1).min(total.saturating_sub(capacity))
}

pub fn scroll_up(offset: usize) -> usize {
    offset.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_in_viewport() {
        assert_eq!(scroll_offset(5, 10, 4, 3, 2), 0);
        assert_eq!(scroll_offset(10, 10, 9, 0, 0), 0);
        assert_eq!(scroll_offset(0, 10, 0, 0, 0), 0);
    }

    #[test]
    fn test_sticky_while_inside_band() {
        // Rows 10..20 visible, selection at 15 with margin 2 is safe.
        assert_eq!(scroll_offset(100, 10, 15, 10, 2), 10);
        assert_eq!(scroll_offset(100, 10, 12, 10, 2), 10);
        assert_eq!(scroll_offset(100, 10, 17, 10, 2), 10);
    }

    #[test]
    fn test_snaps_to_keep_bottom_margin() {
        // Selection at 18 needs rows 19 and 20 visible: offset 11.
        assert_eq!(scroll_offset(100, 10, 18, 10, 2), 11);
    }

    #[test]
    fn test_snaps_to_keep_top_margin() {
        assert_eq!(scroll_offset(100, 10, 11, 10, 2), 9);
    }

    #[test]
    fn test_margin_shrinks_at_list_ends() {
        assert_eq!(scroll_offset(100, 10, 0, 5, 2), 0);
        assert_eq!(scroll_offset(100, 10, 99, 0, 2), 90);
        assert_eq!(scroll_offset(100, 10, 98, 0, 2), 90);
    }

    #[test]
    fn test_zero_margin_scrolls_just_enough() {
        assert_eq!(scroll_offset(50, 10, 10, 0, 0), 1);
        assert_eq!(scroll_offset(50, 10, 9, 0, 0), 0);
        assert_eq!(scroll_offset(50, 10, 4, 5, 0), 4);
    }

    #[test]
    fn test_stale_offset_is_clamped() {
        assert_eq!(scroll_offset(20, 10, 19, 40, 0), 10);
    }

    #[test]
    fn test_selection_always_visible() {
        for total in 0..30usize {
            for capacity in 1..12usize {
                for margin in 0..4usize {
                    for selected in 0..total {
                        for previous in 0..total + 3 {
                            let off = scroll_offset(total, capacity, selected, previous, margin);
                            if total <= capacity {
                                assert_eq!(off, 0);
                                continue;
                            }
                            assert!(off <= total - capacity);
                            assert!(
                                selected >= off && selected < off + capacity,
                                "total={total} cap={capacity} sel={selected} prev={previous} margin={margin} off={off}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_scroll_down_clamps() {
        assert_eq!(scroll_down(0, 30, 10), 1);
        assert_eq!(scroll_down(20, 30, 10), 20);
        assert_eq!(scroll_down(0, 5, 10), 0);
        assert_eq!(scroll_up(0), 0);
        assert_eq!(scroll_up(3), 2);
    }
}
