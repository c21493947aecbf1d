//! The visual thumbnail strip.
//!
//! The strip's child order is the order of record for the collection: nothing
//! keeps a second copy of the order, it is read back from the strip whenever
//! it is needed.

use std::fmt;
use std::str::FromStr;

use crate::error::UploadError;

/// Identity of one thumbnail node inside a strip.
///
/// Ids are handed out in admission order, so comparing two ids compares their
/// admission ordinals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Transient styling a node can carry while a reorder gesture is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// The node being moved.
    Dragging,
    /// The node currently under the pointer or finger.
    DropTarget,
    None,
}

/// An ordered container of thumbnail nodes.
///
/// Implementations ignore ids they do not contain.
pub trait Strip {
    type Node;

    /// Node ids in current child order.
    fn children(&self) -> Vec<NodeId>;

    /// Adds `node` as the last child. On error the strip is left unchanged.
    fn append(&mut self, id: NodeId, node: Self::Node) -> Result<(), UploadError>;

    /// Returns `false` when `id` was not a child.
    fn remove(&mut self, id: NodeId) -> bool;

    /// Moves `id` to sit immediately before `reference`.
    fn insert_before(&mut self, id: NodeId, reference: NodeId);

    /// Moves `id` to sit immediately after `reference`.
    fn insert_after(&mut self, id: NodeId, reference: NodeId);

    fn set_cue(&mut self, id: NodeId, cue: Cue);

    /// Removes every transient cue from every node.
    fn clear_cues(&mut self);

    fn set_visible(&mut self, visible: bool);

    fn position(&self, id: NodeId) -> Option<usize> {
        self.children().iter().position(|child| *child == id)
    }
}

/// Moves `active` next to `target`: after it when moving forward, before it
/// when moving backward, so dropping onto a neighbour swaps the two.
///
/// Returns the `(from, to)` positions, or `None` when nothing moved.
pub fn move_next_to<S: Strip>(
    strip: &mut S,
    active: NodeId,
    target: NodeId,
) -> Option<(usize, usize)> {
    if active == target {
        return None;
    }
    let from = strip.position(active)?;
    let to = strip.position(target)?;
    if from < to {
        strip.insert_after(active, target);
    } else {
        strip.insert_before(active, target);
    }
    Some((from, to))
}
