/// Display state of one character of the target word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Matched,
    /// Typed but wrong; only reachable when wrong characters are stored
    Mismatch,
    Cursor,
    Pending,
}

/// One status per character of `word`, derived from what has been typed so far.
pub fn statuses(word: &str, input: &str) -> Vec<CharStatus> {
    let typed: Vec<char> = input.chars().collect();

    word.chars()
        .enumerate()
        .map(|(idx, expected)| match typed.get(idx) {
            Some(&c) if c == expected => CharStatus::Matched,
            Some(_) => CharStatus::Mismatch,
            None if idx == typed.len() => CharStatus::Cursor,
            None => CharStatus::Pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use CharStatus::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(statuses("def", ""), vec![Cursor, Pending, Pending]);
    }

    #[test]
    fn test_prefix_input() {
        assert_eq!(statuses("class", "cl"), vec![Matched, Matched, Cursor, Pending, Pending]);
    }

    #[test]
    fn test_mismatch_is_not_matched() {
        assert_eq!(statuses("def", "dx"), vec![Matched, Mismatch, Cursor]);
    }

    #[test]
    fn test_complete_has_no_cursor() {
        assert_eq!(statuses("len", "len"), vec![Matched, Matched, Matched]);
    }

    #[test]
    fn test_overlong_input() {
        assert_eq!(statuses("in", "int"), vec![Matched, Matched]);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(statuses("ñu", "ñ"), vec![Matched, Cursor]);
    }
}
