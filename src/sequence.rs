//! Arena-backed doubly linked lists of output lines.
//!
//! Nodes live in one [`Arena`] and refer to each other by [`NodeId`]. Each
//! [`Sequence`] is bracketed by two permanent sentinel nodes, so splicing
//! never has to special-case either end. Nodes are only ever added or moved,
//! never freed, which keeps every issued `NodeId` valid for the arena's
//! lifetime.

use crate::command::Trailer;

/// Stable handle to a node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// One line of rewritten output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Text to print.
    pub line: String,
    /// Commit message with fixup/squash markers intact; empty for lines that
    /// are not commits.
    pub message: String,
    /// Lines printed right after `line`.
    pub trailers: Vec<Trailer>,
}

impl Entry {
    /// A line copied through untouched.
    pub fn verbatim(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
struct Node {
    prev: usize,
    next: usize,
    /// `None` for sentinels.
    entry: Option<Entry>,
}

/// A list inside an [`Arena`], identified by its two sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sequence {
    head: NodeId,
    tail: NodeId,
}

impl Sequence {
    /// Sentinel before the first entry. Inserting after it prepends.
    pub(crate) fn head(&self) -> NodeId {
        self.head
    }
}

/// Storage shared by every sequence built during one rewrite.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate a new empty sequence.
    pub(crate) fn sequence(&mut self) -> Sequence {
        let head = self.nodes.len();
        let tail = head + 1;
        self.nodes.push(Node {
            prev: head,
            next: tail,
            entry: None,
        });
        self.nodes.push(Node {
            prev: head,
            next: tail,
            entry: None,
        });
        Sequence {
            head: NodeId(head),
            tail: NodeId(tail),
        }
    }

    /// Link a new node carrying `entry` directly after `at`.
    ///
    /// `at` may be a head sentinel or any entry, but never a tail sentinel.
    pub(crate) fn insert_after(&mut self, at: NodeId, entry: Entry) -> NodeId {
        let prev = at.0;
        let next = self.nodes[prev].next;
        debug_assert_ne!(next, prev, "cannot insert after a tail sentinel");

        let id = self.nodes.len();
        self.nodes.push(Node {
            prev,
            next,
            entry: Some(entry),
        });
        self.nodes[prev].next = id;
        self.nodes[next].prev = id;
        NodeId(id)
    }

    /// Append `entry` at the end of `seq`.
    pub(crate) fn push_back(&mut self, seq: Sequence, entry: Entry) -> NodeId {
        let last = self.nodes[seq.tail.0].prev;
        self.insert_after(NodeId(last), entry)
    }

    /// Move every entry of `front` to the beginning of `back`, keeping order.
    /// `front` is left empty.
    pub(crate) fn splice_front(&mut self, front: Sequence, back: Sequence) {
        let first = self.nodes[front.head.0].next;
        if first == front.tail.0 {
            return;
        }
        let last = self.nodes[front.tail.0].prev;
        let after = self.nodes[back.head.0].next;

        self.nodes[back.head.0].next = first;
        self.nodes[first].prev = back.head.0;
        self.nodes[last].next = after;
        self.nodes[after].prev = last;

        self.nodes[front.head.0].next = front.tail.0;
        self.nodes[front.tail.0].prev = front.head.0;
    }

    #[cfg(test)]
    fn get(&self, id: NodeId) -> Option<&Entry> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    /// Entries of `seq` from front to back.
    #[cfg(test)]
    fn iter(&self, seq: Sequence) -> impl Iterator<Item = &Entry> + '_ {
        let mut cursor = self.nodes[seq.head.0].next;
        std::iter::from_fn(move || {
            let node = &self.nodes[cursor];
            let entry = node.entry.as_ref()?;
            cursor = node.next;
            Some(entry)
        })
    }

    /// Consume the arena, returning the entries of `seq` in order.
    pub(crate) fn into_entries(mut self, seq: Sequence) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut cursor = self.nodes[seq.head.0].next;
        while cursor != seq.tail.0 {
            let node = &mut self.nodes[cursor];
            if let Some(entry) = node.entry.take() {
                entries.push(entry);
            }
            cursor = node.next;
        }
        entries
    }
}
