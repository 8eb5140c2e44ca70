/// Shorten a file name for display, keeping the first `max_len` characters
/// and appending `...`. Names at or under the limit are returned unchanged.
pub fn truncate_filename(name: &str, max_len: usize) -> String {
    match name.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NAME_TRUNCATE_LEN;

    #[test]
    fn short_names_unchanged() {
        assert_eq!(truncate_filename("a.dcm", NAME_TRUNCATE_LEN), "a.dcm");
        assert_eq!(truncate_filename("", 5), "");
    }

    #[test]
    fn name_at_threshold_unchanged() {
        let name = "x".repeat(NAME_TRUNCATE_LEN);
        assert_eq!(truncate_filename(&name, NAME_TRUNCATE_LEN), name);
    }

    #[test]
    fn long_names_cut_to_threshold_plus_ellipsis() {
        for extra in [1, 2, 50] {
            let name: String = (0..NAME_TRUNCATE_LEN + extra)
                .map(|i| char::from(b'a' + (i % 26) as u8))
                .collect();
            let shown = truncate_filename(&name, NAME_TRUNCATE_LEN);
            assert_eq!(shown, format!("{}...", &name[..NAME_TRUNCATE_LEN]));
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate_filename("ääää", 2), "ää...");
    }
}
