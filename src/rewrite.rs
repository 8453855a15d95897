//! Rewrite a rebase todo according to a reaction table.
//!
//! Lines are consumed in order. Each commit line lands in one of three
//! places:
//!
//! - at the end of the main sequence (its position in the todo),
//! - directly after another commit already emitted (fixups and squashes
//!   moved next to their subject),
//! - at the end of the bubble sequence, which is placed ahead of everything
//!   else once the todo has been consumed.
//!
//! Comments, blank lines and directives we do not model pass through
//! verbatim at their position in the main sequence.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::command::CommandMode;
use crate::grab::{grab, strip_fixup_squash, strip_one_marker};
use crate::sequence::{Arena, Entry, NodeId, Sequence};
use crate::settings::Settings;

/// Rewrite every line of `todo`.
pub fn parse_input<I, S>(settings: &Settings, todo: I) -> Result<Remastered, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rewriter = Rewriter::new(settings);
    for line in todo {
        rewriter.feed(line.as_ref())?;
    }
    Ok(rewriter.finish())
}

/// Incremental form of [`parse_input`].
#[derive(Debug)]
pub struct Rewriter<'a> {
    settings: &'a Settings,
    arena: Arena,
    bubble: Sequence,
    main: Sequence,
    /// Latest node per stripped commit subject.
    by_message: HashMap<String, NodeId>,
    /// Latest node per commit hash.
    by_hash: HashMap<String, NodeId>,
    /// Most recently placed line; where incoming fixups attach.
    last: NodeId,
}

impl<'a> Rewriter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        let mut arena = Arena::new();
        let bubble = arena.sequence();
        let main = arena.sequence();
        Self {
            settings,
            arena,
            bubble,
            main,
            by_message: HashMap::new(),
            by_hash: HashMap::new(),
            last: main.head(),
        }
    }

    /// Consume one raw todo line.
    pub fn feed(&mut self, raw: &str) -> Result<(), Error> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            self.pass_through(raw);
            return Ok(());
        }

        let (token, rest) = grab(line);
        let Some(incoming) = CommandMode::from_todo(token) else {
            self.pass_through(raw);
            return Ok(());
        };
        if !incoming.carries_commit() {
            self.pass_through(raw);
            return Ok(());
        }

        let (hash, message) = grab(rest);
        let reaction = self.settings.resolve(hash);
        let mode = match reaction.mode {
            CommandMode::Override => incoming,
            mode => mode,
        };

        let rendered = match mode {
            CommandMode::Bubble => CommandMode::Pick,
            mode => mode,
        };
        let entry = Entry {
            line: render(rendered, hash, message),
            message: message.to_string(),
            trailers: reaction.trailers,
        };

        let node = match mode {
            CommandMode::Fixup | CommandMode::Squash => {
                let anchor = if incoming.is_fixup_like() && reaction.target.is_none() {
                    tracing::debug!(hash, %mode, "following previous commit");
                    self.last
                } else {
                    let anchor =
                        self.find_anchor(reaction.target.as_deref(), message, &entry.line)?;
                    tracing::debug!(hash, %mode, "relocating after subject");
                    anchor
                };
                self.arena.insert_after(anchor, entry)
            }
            CommandMode::Bubble => {
                tracing::debug!(hash, "bubbling to front");
                self.arena.push_back(self.bubble, entry)
            }
            _ => {
                tracing::debug!(hash, %mode, "keeping in place");
                self.arena.push_back(self.main, entry)
            }
        };

        self.index(hash, message, node);
        self.last = node;
        Ok(())
    }

    /// Merge the bubble sequence in front of the main one.
    pub fn finish(mut self) -> Remastered {
        self.arena.splice_front(self.bubble, self.main);
        let entries = self.arena.into_entries(self.main);
        tracing::info!(lines = entries.len(), "todo rewritten");
        Remastered { entries }
    }

    /// Copy a line through untouched. Incoming fixups that follow it stay
    /// below it.
    fn pass_through(&mut self, raw: &str) {
        tracing::trace!(line = raw, "passing through");
        self.last = self.arena.push_back(self.main, Entry::verbatim(raw));
    }

    fn index(&mut self, hash: &str, message: &str, node: NodeId) {
        self.by_message.insert(strip_fixup_squash(message).to_string(), node);
        if !hash.is_empty() {
            self.by_hash.insert(hash.to_string(), node);
        }
    }

    /// Find the node a relocated fixup/squash should follow.
    ///
    /// An explicit target is looked up by hash, then by subject. Without one,
    /// a `fixup!`/`squash!` message is peeled one marker at a time until a
    /// subject matches. A plain message falls back to `last`.
    fn find_anchor(
        &self,
        target: Option<&str>,
        message: &str,
        line: &str,
    ) -> Result<NodeId, Error> {
        let unresolved = || Error::UnresolvedRelocation {
            line: line.to_string(),
        };

        if let Some(target) = target {
            return self
                .by_hash
                .get(target)
                .or_else(|| self.by_message.get(strip_fixup_squash(target)))
                .copied()
                .ok_or_else(unresolved);
        }

        let Some(mut subject) = strip_one_marker(message) else {
            return Ok(self.last);
        };
        loop {
            if let Some(&node) = self.by_message.get(subject) {
                return Ok(node);
            }
            subject = strip_one_marker(subject).ok_or_else(unresolved)?;
        }
    }
}

fn render(mode: CommandMode, hash: &str, message: &str) -> String {
    if message.is_empty() {
        format!("{mode} {hash}")
    } else {
        format!("{mode} {hash} {message}")
    }
}

/// The rewritten todo, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remastered {
    entries: Vec<Entry>,
}

impl Remastered {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Every output line: each entry followed by its trailers.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().flat_map(|entry| {
            std::iter::once(entry.line.clone())
                .chain(entry.trailers.iter().map(|t| t.to_string()))
        })
    }
}

impl fmt::Display for Remastered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Errors from rewriting a todo.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("couldn't figure out where to place commit: {line}")]
    UnresolvedRelocation { line: String },
}
