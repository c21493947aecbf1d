//! Ordered, deduplicated image attachments for a native multi-file input.
//!
//! The core is host-independent: [`FileCollection`] owns admission,
//! reservations and ordering over any [`Strip`], and writes the result into
//! any [`FormSink`]. The `dom` module binds it to a browser page.

pub mod collection;
pub mod config;
pub mod error;
pub mod gallery;
pub mod identity;
pub mod presenter;
pub mod reorder;
pub mod reservation;
pub mod strip;

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(test)]
mod testing;

pub use collection::{Admission, AdmittedFile, FileCollection, FormSink, Source};
pub use config::UploadConfig;
pub use error::UploadError;
pub use gallery::{Gallery, GallerySink};
pub use identity::{FileHandle, IdentityKey};
pub use presenter::{Notice, UploadPrompt};
pub use reorder::{Arrangement, DragSession, ReorderController, TouchEnd, TouchMove};
pub use reservation::{SlotReservations, Ticket};
pub use strip::{Cue, NodeId, Strip, move_next_to};
