use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Expands tabs and cuts the line so it fits `width` terminal columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in s.chars() {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        if ch == '\t' {
            out.push_str(&" ".repeat(TAB_WIDTH));
        } else {
            out.push(ch);
        }
        used += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_expands_tabs_and_truncates() {
        assert_eq!(fit_to_width("a\tb", 10), "a    b");
        assert_eq!(fit_to_width("abcdef", 3), "abc");
        assert_eq!(fit_to_width("abc", 0), "");
    }

    #[test]
    fn test_wide_chars_do_not_overflow() {
        assert_eq!(fit_to_width("日本語", 5), "日本");
    }
}
