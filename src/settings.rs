//! Per-commit reaction table.
//!
//! Settings are written as one directive per line:
//!
//! ```text
//! # COMMAND HASH [ARGS]
//! drop    default
//! pick    1a2b3c4
//! fixup   5d6e7f8 1a2b3c4
//! exec    default cargo test
//! ```
//!
//! Mode-setting directives for the same hash overwrite each other, while
//! `break` and `exec` directives accumulate trailers in order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{CommandMode, Trailer};
use crate::grab::grab;

/// Key of the reaction applied to every commit.
pub const DEFAULT_KEY: &str = "default";

/// What to do with one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Command to force onto the commit line.
    #[serde(default)]
    pub mode: CommandMode,

    /// Hash or message of the commit a fixup/squash should attach to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Lines to emit after the commit, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailers: Vec<Trailer>,
}

/// The full table of reactions, keyed by abbreviated hash or [`DEFAULT_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    reactions: BTreeMap<String, Reaction>,
}

impl Settings {
    /// Parse settings from the line-oriented directive format.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut settings = Self::default();
        settings.read(text.lines())?;
        Ok(settings)
    }

    /// Apply every directive in `lines` on top of the current table.
    pub fn read<I, S>(&mut self, lines: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (idx, line) in lines.into_iter().enumerate() {
            self.apply(idx + 1, line.as_ref())?;
        }
        tracing::info!(reactions = self.reactions.len(), "settings loaded");
        Ok(())
    }

    /// Apply a single directive. `line_no` is only used for error reporting.
    fn apply(&mut self, line_no: usize, line: &str) -> Result<(), Error> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (token, rest) = grab(line);
        let mode = CommandMode::from_directive(token).ok_or_else(|| Error::UnknownCommand {
            line: line_no,
            token: token.to_string(),
        })?;

        let (hash, rest) = grab(rest);
        if hash.is_empty() {
            return Err(Error::MissingHash { line: line_no });
        }

        tracing::debug!(line = line_no, %mode, hash, "settings directive");

        let reaction = self.reactions.entry(hash.to_string()).or_default();
        match mode {
            CommandMode::Break => reaction.trailers.push(Trailer::Break),
            CommandMode::Exec => reaction.trailers.push(Trailer::Exec(rest.to_string())),
            _ => {
                reaction.mode = mode;
                reaction.target = (!rest.is_empty()).then(|| rest.to_string());
            }
        }
        Ok(())
    }

    /// Reaction configured for exactly this key, if any.
    pub fn get(&self, hash: &str) -> Option<&Reaction> {
        self.reactions.get(hash)
    }

    /// Effective reaction for a commit.
    ///
    /// Starts from the default reaction. A specific entry replaces the mode
    /// and target, and its trailers follow the default ones.
    pub fn resolve(&self, hash: &str) -> Reaction {
        let mut reaction = self.get(DEFAULT_KEY).cloned().unwrap_or_default();
        if hash == DEFAULT_KEY {
            return reaction;
        }
        if let Some(specific) = self.get(hash) {
            reaction.mode = specific.mode;
            reaction.target = specific.target.clone();
            reaction.trailers.extend(specific.trailers.iter().cloned());
        }
        reaction
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Parse a reaction table previously written by [`Settings::to_toml`].
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the reaction table to TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Errors from reading settings.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown rebase command '{token}' (line {line})")]
    UnknownCommand { line: usize, token: String },

    #[error("missing hash (line {line})")]
    MissingHash { line: usize },

    #[error("failed to parse settings table")]
    ParseToml(#[from] toml::de::Error),

    #[error("failed to serialize settings table")]
    SerializeToml(#[from] toml::ser::Error),
}
