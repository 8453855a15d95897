//! Rebase command vocabulary and the trailer lines that follow a commit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What should happen to a commit line.
///
/// The first eight variants are real rebase commands. `Override` and
/// `Bubble` only exist in settings: `Override` keeps whatever command the
/// todo already had, `Bubble` floats the commit to the front as a `pick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandMode {
    Pick,
    Reword,
    Edit,
    Squash,
    Fixup,
    Drop,
    Exec,
    Break,
    /// The zero value: a reaction that never set a mode echoes the todo.
    #[default]
    Override,
    Bubble,
}

impl CommandMode {
    /// Parse a command token from a settings directive.
    pub fn from_directive(token: &str) -> Option<Self> {
        match token {
            "override" | "o" => Some(Self::Override),
            "bubble" => Some(Self::Bubble),
            _ => Self::from_todo(token),
        }
    }

    /// Parse a command token from a rebase todo line.
    ///
    /// Only real rebase commands are recognized. Everything else (`label`,
    /// `reset`, `merge`, free text) is not ours to rewrite.
    pub fn from_todo(token: &str) -> Option<Self> {
        let mode = match token {
            "pick" | "p" => Self::Pick,
            "reword" | "r" => Self::Reword,
            "edit" | "e" => Self::Edit,
            "squash" | "s" => Self::Squash,
            "fixup" | "f" => Self::Fixup,
            "drop" | "d" => Self::Drop,
            "exec" | "x" => Self::Exec,
            "break" | "b" => Self::Break,
            _ => return None,
        };
        Some(mode)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pick => "pick",
            Self::Reword => "reword",
            Self::Edit => "edit",
            Self::Squash => "squash",
            Self::Fixup => "fixup",
            Self::Drop => "drop",
            Self::Exec => "exec",
            Self::Break => "break",
            Self::Override => "override",
            Self::Bubble => "bubble",
        }
    }

    /// Whether this command folds the commit into the one before it.
    pub fn is_fixup_like(self) -> bool {
        matches!(self, Self::Fixup | Self::Squash)
    }

    /// Whether a todo line with this command names a commit.
    pub fn carries_commit(self) -> bool {
        !matches!(self, Self::Exec | Self::Break)
    }
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An extra line emitted right after its owning commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Trailer {
    Break,
    /// Shell command text, possibly empty.
    Exec(String),
}

impl fmt::Display for Trailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Break => f.write_str("break"),
            Self::Exec(cmd) => write!(f, "exec {cmd}"),
        }
    }
}

impl From<Trailer> for String {
    fn from(trailer: Trailer) -> Self {
        trailer.to_string()
    }
}

impl TryFrom<String> for Trailer {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        if text == "break" {
            return Ok(Self::Break);
        }
        match text.strip_prefix("exec") {
            Some("") => Ok(Self::Exec(String::new())),
            Some(rest) if rest.starts_with(' ') => Ok(Self::Exec(rest[1..].to_string())),
            _ => Err(format!("expected `break` or `exec <command>`, got `{text}`")),
        }
    }
}
