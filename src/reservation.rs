//! Admission control for thumbnails that are still decoding.
//!
//! A slot is reserved synchronously when a file is admitted and released when
//! its thumbnail lands in the strip or its decode fails. Capacity checks count
//! reserved slots as taken, so a burst of selections cannot overshoot the
//! maximum while earlier files are still decoding.

use std::collections::BTreeMap;

use crate::identity::IdentityKey;
use crate::strip::NodeId;

/// One reserved slot, carrying the file it was reserved for.
///
/// A ticket can only be consumed once, by [`SlotReservations::release`].
#[must_use = "a ticket holds a slot until it is completed or aborted"]
#[derive(Debug)]
pub struct Ticket<F> {
    id: NodeId,
    key: IdentityKey,
    file: F,
}

impl<F> Ticket<F> {
    /// The id the thumbnail node will carry once rendered.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    pub fn file(&self) -> &F {
        &self.file
    }
}

#[derive(Debug)]
pub struct SlotReservations {
    max_count: usize,
    pending: BTreeMap<NodeId, IdentityKey>,
}

impl SlotReservations {
    pub fn new(max_count: usize) -> Self {
        Self {
            max_count,
            pending: BTreeMap::new(),
        }
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn can_admit(&self, visible: usize) -> bool {
        visible + self.pending.len() < self.max_count
    }

    pub fn remaining(&self, visible: usize) -> usize {
        self.max_count.saturating_sub(visible + self.pending.len())
    }

    /// Whether a file with this key is admitted but not yet rendered.
    pub fn is_pending(&self, key: &IdentityKey) -> bool {
        self.pending.values().any(|pending| pending == key)
    }

    pub fn reserve<F>(&mut self, id: NodeId, key: IdentityKey, file: F) -> Ticket<F> {
        self.pending.insert(id, key.clone());
        Ticket { id, key, file }
    }

    /// Frees the ticket's slot and hands back what it carried.
    pub fn release<F>(&mut self, ticket: Ticket<F>) -> (NodeId, IdentityKey, F) {
        if self.pending.remove(&ticket.id).is_none() {
            log::warn!("released slot {} that was not reserved here", ticket.id);
        }
        (ticket.id, ticket.key, ticket.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_slots_count_against_capacity() {
        let mut slots = SlotReservations::new(2);
        assert!(slots.can_admit(1));
        let ticket = slots.reserve(NodeId::from_raw(1), IdentityKey::new("a", 1), ());
        assert!(!slots.can_admit(1));
        assert_eq!(slots.remaining(1), 0);
        let _ = slots.release(ticket);
        assert!(slots.can_admit(1));
    }

    #[test]
    fn release_order_does_not_matter() {
        let mut slots = SlotReservations::new(5);
        let a = slots.reserve(NodeId::from_raw(1), IdentityKey::new("a", 1), "a");
        let b = slots.reserve(NodeId::from_raw(2), IdentityKey::new("b", 1), "b");
        let c = slots.reserve(NodeId::from_raw(3), IdentityKey::new("c", 1), "c");
        assert_eq!(slots.pending(), 3);

        let (_, _, file) = slots.release(b);
        assert_eq!(file, "b");
        let _ = slots.release(c);
        let _ = slots.release(a);
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn pending_keys_are_visible_until_released() {
        let mut slots = SlotReservations::new(5);
        let key = IdentityKey::new("a.jpg", 100);
        let ticket = slots.reserve(NodeId::from_raw(7), key.clone(), ());
        assert!(slots.is_pending(&key));
        let (id, released, ()) = slots.release(ticket);
        assert_eq!(id, NodeId::from_raw(7));
        assert_eq!(released, key);
        assert!(!slots.is_pending(&key));
    }
}
