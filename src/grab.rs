//! Whitespace tokenizing for todo lines and settings directives.

/// Marker prefixes git puts on commits created with `commit --fixup`/`--squash`.
const MARKERS: [&str; 2] = ["fixup!", "squash!"];

/// Split one whitespace-delimited token off the front of `s`.
///
/// Leading whitespace is skipped, the token is the following run of
/// non-whitespace characters, and the remainder is returned trimmed.
/// Once nothing is left this keeps returning `("", "")`.
pub fn grab(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    let (token, rest) = s.split_at(end);
    (token, rest.trim())
}

/// Remove exactly one leading `fixup!` or `squash!` marker.
///
/// Returns `None` when the message does not start with a marker.
pub fn strip_one_marker(message: &str) -> Option<&str> {
    let (token, rest) = grab(message);
    MARKERS.contains(&token).then_some(rest)
}

/// Remove every leading `fixup!`/`squash!` marker, leaving the subject line
/// of the commit the message ultimately refers to.
pub fn strip_fixup_squash(message: &str) -> &str {
    let mut subject = message.trim();
    while let Some(rest) = strip_one_marker(subject) {
        subject = rest;
    }
    subject
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_leading_space() {
        assert_eq!(
            grab("    this is\t \na string withmanytokens\r"),
            ("this", "is\t \na string withmanytokens")
        );
    }

    #[test]
    fn test_grab_trims_remainder() {
        assert_eq!(grab(" a b "), ("a", "b"));
        assert_eq!(grab("token   "), ("token", ""));
        assert_eq!(grab("token"), ("token", ""));
    }

    #[test]
    fn test_grab_past_end_is_repeatable() {
        assert_eq!(grab(""), ("", ""));
        assert_eq!(grab("   \t"), ("", ""));

        let (_, rest) = grab("only");
        let (token, rest) = grab(rest);
        assert_eq!((token, rest), ("", ""));
        assert_eq!(grab(rest), ("", ""));
    }

    #[test]
    fn test_grab_unicode_whitespace() {
        // U+3000 IDEOGRAPHIC SPACE
        assert_eq!(grab("\u{3000}pick\u{3000}abc"), ("pick", "abc"));
    }

    #[test]
    fn test_strip_one_marker() {
        assert_eq!(strip_one_marker("fixup! fixup! m1"), Some("fixup! m1"));
        assert_eq!(strip_one_marker("squash! m1"), Some("m1"));
        assert_eq!(strip_one_marker("m1"), None);
        assert_eq!(strip_one_marker("fixup!m1"), None);
    }

    #[test]
    fn test_strip_fixup_squash() {
        assert_eq!(strip_fixup_squash("unchanged"), "unchanged");
        assert_eq!(strip_fixup_squash("fixup! changed"), "changed");
        assert_eq!(strip_fixup_squash("squash! changed"), "changed");
        assert_eq!(
            strip_fixup_squash("\tfixup!     squash!\tchanged with some more words"),
            "changed with some more words"
        );
    }

    #[test]
    fn test_strip_fixup_squash_keeps_inner_markers() {
        assert_eq!(
            strip_fixup_squash("fixup! revert fixup! thing"),
            "revert fixup! thing"
        );
    }
}
