//! Language code to display name mapping.

/// Known language codes and their display names.
const LANGUAGE_NAMES: [(&str, &str); 16] = [
    ("en", "English"),
    ("de", "German"),
    ("nl", "Dutch"),
    ("cs", "Czech"),
    ("it", "Italian"),
    ("es", "Spanish"),
    ("PT-PT", "Portuguese"),
    ("PT", "Portuguese"),
    ("ro", "Romanian"),
    ("da", "Danish"),
    ("fr", "French"),
    ("pl", "Polish"),
    ("hu", "Hungarian"),
    ("el", "Greek"),
    ("NB", "Norwegian"),
    ("no", "Norwegian"),
];

/// Full display name for a language code. Unknown codes are returned as-is.
pub fn full_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// First `n` characters of a display name (char-aware).
pub fn abbreviate(name: &str, n: usize) -> String {
    name.chars().take(n).collect()
}

/// Display name clipped to `max` characters, with a trailing `.` when clipped.
pub fn clip(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        format!("{}.", abbreviate(name, max))
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(full_name("en"), "English");
        assert_eq!(full_name("PT-PT"), "Portuguese");
        assert_eq!(full_name("NB"), "Norwegian");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(full_name("xx"), "xx");
        assert_eq!(full_name(""), "");
    }

    #[test]
    fn clip_truncates_long_names() {
        assert_eq!(clip("Portuguese", 10), "Portuguese");
        assert_eq!(clip("Luxembourgish", 10), "Luxembourg.");
        assert_eq!(abbreviate("Hungarian", 3), "Hun");
        assert_eq!(abbreviate("el", 3), "el");
    }
}
