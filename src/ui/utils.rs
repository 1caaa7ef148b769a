use unicode_width::UnicodeWidthChar;

/// Safely truncate string to max display columns, appending "…" if truncated 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut cut = s.len();
    let mut fits = true;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) && cut == s.len() {
            cut = i;
        }
        width += w;
        if width > max_width {
            fits = false;
        }
    }
    if fits {
        s.to_string()
    } else {
        format!("{}…", &s[..cut])
    }
}

/// mm:ss from fractional seconds. Negative inputs clamp to 0:00.
pub fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char occupies two columns
        let t = truncate("音楽プレーヤー", 6);
        assert!(t.ends_with('…'));
        assert!(t.chars().count() <= 4);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(61.4), "1:01");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(600.0), "10:00");
    }
}
