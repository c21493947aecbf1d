//! The authoritative set of attached files.
//!
//! Files live in a side table keyed by [`NodeId`]; their order is whatever
//! the strip's child order is. Every mutation ends with [`FileCollection::resync`],
//! which is the only place the form input gets written.

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::UploadError;
use crate::identity::{FileHandle, IdentityKey};
use crate::presenter::{Notice, UploadPrompt};
use crate::reorder::Arrangement;
use crate::reservation::{SlotReservations, Ticket};
use crate::strip::{NodeId, Strip, move_next_to};

/// Receives the full ordered file list after every change.
///
/// Must be idempotent: the collection calls it on every mutation.
pub trait FormSink<F> {
    fn replace(&mut self, files: &[&F]) -> Result<(), UploadError>;
}

/// Where a batch of files came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Picker,
    /// Drag-and-drop onto the upload area. Always filtered to images.
    Drop,
}

#[derive(Debug)]
pub struct AdmittedFile<F> {
    file: F,
    key: IdentityKey,
    admitted_at: u64,
}

impl<F> AdmittedFile<F> {
    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    pub fn admitted_at(&self) -> u64 {
        self.admitted_at
    }
}

/// Outcome of one selection or drop batch.
#[derive(Debug)]
pub struct Admission<F> {
    pub tickets: Vec<Ticket<F>>,
    pub duplicates: usize,
    /// Files turned away because no slot was free.
    pub skipped: usize,
    /// Non-image files dropped by the type filter.
    pub filtered: usize,
    max_count: usize,
}

impl<F> Admission<F> {
    pub fn notice(&self) -> Option<Notice> {
        (self.skipped > 0).then_some(Notice {
            skipped: self.skipped,
            max_count: self.max_count,
        })
    }
}

pub struct FileCollection<F, S, K> {
    strip: S,
    sink: K,
    files: HashMap<NodeId, AdmittedFile<F>>,
    slots: SlotReservations,
    filter_picker_to_images: bool,
    next_id: u64,
}

impl<F, S, K> FileCollection<F, S, K>
where
    F: FileHandle,
    S: Strip,
    K: FormSink<F>,
{
    pub fn new(max_count: usize, strip: S, sink: K) -> Self {
        Self {
            strip,
            sink,
            files: HashMap::new(),
            slots: SlotReservations::new(max_count),
            filter_picker_to_images: false,
            next_id: 1,
        }
    }

    /// Apply the drop path's image-only filter to picker selections as well.
    pub fn with_picker_filter(mut self, enabled: bool) -> Self {
        self.filter_picker_to_images = enabled;
        self
    }

    pub fn max_count(&self) -> usize {
        self.slots.max_count()
    }

    /// Number of rendered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.slots.pending()
    }

    pub fn can_admit(&self) -> bool {
        self.slots.can_admit(self.files.len())
    }

    pub fn remaining(&self) -> usize {
        self.slots.remaining(self.files.len())
    }

    pub fn prompt(&self) -> UploadPrompt {
        UploadPrompt::for_count(self.files.len(), self.max_count())
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn get(&self, id: NodeId) -> Option<&AdmittedFile<F>> {
        self.files.get(&id)
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.files.values().any(|admitted| &admitted.key == key)
    }

    /// Node ids in current strip order.
    pub fn order_ids(&self) -> Vec<NodeId> {
        self.strip
            .children()
            .into_iter()
            .filter(|id| self.files.contains_key(id))
            .collect()
    }

    /// Files in current strip order.
    pub fn order(&self) -> Vec<&F> {
        self.strip
            .children()
            .iter()
            .filter_map(|id| self.files.get(id).map(|admitted| &admitted.file))
            .collect()
    }

    /// Runs dedup and capacity checks over a batch, reserving one slot per
    /// admitted file in iteration order.
    pub fn admit<I>(&mut self, files: I, source: Source) -> Admission<F>
    where
        I: IntoIterator<Item = F>,
    {
        let images_only = match source {
            Source::Drop => true,
            Source::Picker => self.filter_picker_to_images,
        };

        let mut admission = Admission {
            tickets: Vec::new(),
            duplicates: 0,
            skipped: 0,
            filtered: 0,
            max_count: self.max_count(),
        };

        for file in files {
            if images_only && !file.is_image() {
                admission.filtered += 1;
                continue;
            }
            let key = file.key();
            if self.contains_key(&key) || self.slots.is_pending(&key) {
                admission.duplicates += 1;
                continue;
            }
            if !self.can_admit() {
                admission.skipped += 1;
                continue;
            }
            let id = NodeId::from_raw(self.next_id);
            self.next_id += 1;
            debug!("admitted {key} as node {id}");
            admission.tickets.push(self.slots.reserve(id, key, file));
        }

        if admission.skipped > 0 {
            warn!(
                "{} file(s) skipped, limit of {} reached",
                admission.skipped,
                self.max_count()
            );
        }
        self.resync();
        admission
    }

    /// Shows the rendered node for `ticket` and frees its slot.
    ///
    /// The node lands in admission order: ahead of the first shown file that
    /// was admitted after it, or last when there is none. When the strip
    /// refuses the node the file is dropped and its slot is still freed.
    pub fn complete(&mut self, ticket: Ticket<F>, node: S::Node) -> Result<NodeId, UploadError> {
        let (id, key, file) = self.slots.release(ticket);
        if let Err(err) = self.strip.append(id, node) {
            debug!("node {id} ({key}) refused by the strip");
            self.resync();
            return Err(err);
        }
        let admitted_later = self.strip.children().into_iter().find(|child| {
            self.files
                .get(child)
                .is_some_and(|admitted| admitted.admitted_at > id.get())
        });
        if let Some(reference) = admitted_later {
            self.strip.insert_before(id, reference);
        }
        self.files.insert(
            id,
            AdmittedFile {
                file,
                key,
                admitted_at: id.get(),
            },
        );
        self.resync();
        Ok(id)
    }

    /// Frees the slot of a file whose thumbnail could not be produced.
    pub fn abort(&mut self, ticket: Ticket<F>) {
        let (id, key, _) = self.slots.release(ticket);
        debug!("dropped node {id} ({key}) before it rendered");
        self.resync();
    }

    pub fn remove(&mut self, id: NodeId) -> Option<F> {
        let admitted = self.files.remove(&id)?;
        self.strip.remove(id);
        debug!("removed node {id} ({})", admitted.key);
        self.resync();
        Some(admitted.file)
    }

    /// Moves `active` next to `target` by the rule in [`move_next_to`].
    pub fn move_node(&mut self, active: NodeId, target: NodeId) -> bool {
        let Some((from, to)) = move_next_to(&mut self.strip, active, target) else {
            return false;
        };
        debug!("moved node {active} from {from} to {to}");
        self.resync();
        true
    }

    /// Rewrites the form input from the current strip order.
    pub fn resync(&mut self) {
        let order: Vec<&F> = self
            .strip
            .children()
            .iter()
            .filter_map(|id| self.files.get(id).map(|admitted| &admitted.file))
            .collect();
        if let Err(err) = self.sink.replace(&order) {
            warn!("form input not updated: {err}");
        }
        self.strip.set_visible(!self.files.is_empty());
    }
}

impl<F, S, K> Arrangement for FileCollection<F, S, K>
where
    F: FileHandle,
    S: Strip,
    K: FormSink<F>,
{
    type Strip = S;

    fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    fn move_node(&mut self, active: NodeId, target: NodeId) -> bool {
        FileCollection::move_node(self, active, target)
    }
}
