//! Recognizes commit header lines in `git log` output.
//!
//! Handles plain `--oneline` output as well as `--graph` lines such as
//! `| * a1b2c3d Fix auth bug`.

const MIN_HASH_LEN: usize = 7;
const MAX_HASH_LEN: usize = 40;

fn is_graph_char(ch: char) -> bool {
    matches!(ch, '*' | '|' | ' ' | '\\' | '/')
}

fn is_hash_char(ch: char) -> bool {
    matches!(ch, '0'..='9' | 'a'..='f')
}

/// Returns the abbreviated or full hash that starts the line, if any.
pub fn extract_commit_hash(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(is_graph_char);
    let end = rest
        .char_indices()
        .find(|(_, ch)| !is_hash_char(*ch))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    if !(MIN_HASH_LEN..=MAX_HASH_LEN).contains(&end) {
        return None;
    }
    // The hash must end on a word boundary.
    if rest[end..]
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return None;
    }
    Some(&rest[..end])
}

pub fn is_commit_line(line: &str) -> bool {
    extract_commit_hash(line).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_oneline() {
        assert_eq!(extract_commit_hash("a1b2c3d Fix auth bug"), Some("a1b2c3d"));
    }

    #[test]
    fn test_graph_prefixes() {
        assert_eq!(extract_commit_hash("* a1b2c3d Fix bug"), Some("a1b2c3d"));
        assert_eq!(extract_commit_hash("| * a1b2c3d Fix bug"), Some("a1b2c3d"));
        assert_eq!(extract_commit_hash("| | \\ 0123456789 merge"), Some("0123456789"));
        assert!(is_commit_line("* a1b2c3d Fix bug"));
    }

    #[test]
    fn test_non_commit_lines() {
        assert!(!is_commit_line("| | Merge branch"));
        assert!(!is_commit_line("|/"));
        assert!(!is_commit_line(""));
        assert!(!is_commit_line(" src/main.rs | 4 ++--"));
        assert!(!is_commit_line("Author: Jane <jane@example.com>"));
    }

    #[test]
    fn test_hash_length_bounds() {
        assert!(!is_commit_line("abc123 short"));
        let full = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(extract_commit_hash(full), Some(full));
        assert!(!is_commit_line(&format!("{}8 too long", full)));
    }

    #[test]
    fn test_hash_needs_word_boundary() {
        assert!(!is_commit_line("a1b2c3dz not a hash"));
        assert!(!is_commit_line("A1B2C3D uppercase"));
        assert_eq!(extract_commit_hash("a1b2c3d (HEAD -> main)"), Some("a1b2c3d"));
        assert_eq!(extract_commit_hash("a1b2c3d"), Some("a1b2c3d"));
    }

    #[test]
    fn test_full_log_header() {
        // `commit <hash>` headers start with a non-hex word.
        assert!(!is_commit_line("commit 0123456789abcdef"));
    }
}
