//! Long help text for the command line.

/// Description of the settings format, shown by `--help`.
#[must_use]
pub fn usage() -> &'static str {
    include_str!("usage.md")
}
