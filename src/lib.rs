//! Remaster: rewrite an interactive rebase todo from a short per-commit plan.
//!
//! Instead of hand-editing a long generated todo, describe once what should
//! happen to each commit (and to every commit you don't mention), and let
//! remaster produce the todo.
//!
//! # Architecture
//!
//! - **Settings**: Parse the directive format into a per-hash reaction table
//! - **Rewrite**: Walk the todo, apply reactions, move fixups next to their subject
//! - **Sequence**: Arena-backed linked lists the rewrite splices into
//! - **TodoFile**: Read and swap the todo file on disk

mod command;
mod grab;
mod rewrite;
mod sequence;
mod settings;
mod todo_file;
mod usage;

pub use command::{CommandMode, Trailer};
pub use grab::{grab, strip_fixup_squash, strip_one_marker};
pub use rewrite::{Remastered, Rewriter, parse_input};
pub use sequence::Entry;
pub use settings::{DEFAULT_KEY, Reaction, Settings};
pub use todo_file::TodoFile;
pub use usage::usage;

/// Error types, one per stage.
pub mod error {
    pub use crate::rewrite::Error as RewriteError;
    pub use crate::settings::Error as SettingsError;
    pub use crate::todo_file::Error as TodoFileError;
}

/// Parse `settings` and apply them to `todo` in one step.
pub fn remaster(settings: &str, todo: &str) -> Result<Remastered, Error> {
    let settings = Settings::parse(settings)?;
    Ok(parse_input(&settings, todo.lines())?)
}

/// Errors from [`remaster`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] settings::Error),

    #[error(transparent)]
    Rewrite(#[from] rewrite::Error),
}
