//! Images already stored with the record, shown on the edit page.
//!
//! Each node id is the stored image's index. The gallery only reorders and
//! deletes; new files still go through a [`FileCollection`](crate::FileCollection).

use log::{debug, warn};

use crate::error::UploadError;
use crate::reorder::Arrangement;
use crate::strip::{NodeId, Strip, move_next_to};

/// Receives the gallery's order and deletions after every change.
pub trait GallerySink {
    fn write(&mut self, order: &[NodeId], deleted: &[NodeId]) -> Result<(), UploadError>;
}

pub struct Gallery<S, K> {
    strip: S,
    sink: K,
    deleted: Vec<NodeId>,
}

impl<S: Strip, K: GallerySink> Gallery<S, K> {
    /// Wraps a gallery the page already rendered. Nothing is written until
    /// the first change, so the server's own order value stands until then.
    pub fn new(strip: S, sink: K) -> Self {
        Self {
            strip,
            sink,
            deleted: Vec::new(),
        }
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Stored image indices in current strip order.
    pub fn order(&self) -> Vec<NodeId> {
        self.strip.children()
    }

    /// Deleted indices, in the order they were deleted.
    pub fn deleted(&self) -> &[NodeId] {
        &self.deleted
    }

    pub fn delete(&mut self, id: NodeId) -> bool {
        if !self.strip.remove(id) {
            return false;
        }
        if !self.deleted.contains(&id) {
            self.deleted.push(id);
        }
        debug!("stored image {id} marked for deletion");
        self.sync();
        true
    }

    pub fn move_node(&mut self, active: NodeId, target: NodeId) -> bool {
        let Some((from, to)) = move_next_to(&mut self.strip, active, target) else {
            return false;
        };
        debug!("moved stored image {active} from {from} to {to}");
        self.sync();
        true
    }

    fn sync(&mut self) {
        let order = self.strip.children();
        if let Err(err) = self.sink.write(&order, &self.deleted) {
            warn!("gallery fields not updated: {err}");
        }
    }
}

impl<S: Strip, K: GallerySink> Arrangement for Gallery<S, K> {
    type Strip = S;

    fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    fn move_node(&mut self, active: NodeId, target: NodeId) -> bool {
        Gallery::move_node(self, active, target)
    }
}

/// Comma-joined ids, the format both gallery fields use.
pub fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
