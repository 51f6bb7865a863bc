//! # Record Types
//!
//! This module defines the record types behind the schema descriptors: the
//! instrument-state field group, the SEM image entry with its optional
//! detector-specific block, and the general-purpose scaffold record.
//!
//! ## Design
//!
//! The records are passive containers. Every quantity is optional (absence
//! means "not recorded"), no cross-field consistency is enforced, and the
//! only lifecycle operation is [`Normalize::normalize`] — invoked once by
//! the host platform after an external ingestion process populates the
//! fields. An entry therefore has exactly two lifecycle states, populated
//! and normalized, and the hook must succeed for any combination of unset
//! fields.
//!
//! Detector specialization is composition, not subclassing: a
//! [`SemImage`] optionally carries one [`DetectorExtension`] block, which
//! adds exactly one quantity and changes the entry's section name. Code
//! operating generically over image entries handles base and specialized
//! entries identically; the variant quantity is reachable only through an
//! entry carrying the matching block.

mod detector;
mod error;
mod general;
mod image;
mod instrument_state;
mod refs;
mod value;

#[cfg(test)]
mod tests;

pub use detector::{DetectorExtension, DetectorKind, EtdFields, TldFields};
pub use error::EntryError;
pub use general::NewSchema;
pub use image::{SemImage, SemImageBuilder};
pub use instrument_state::InstrumentState;
pub use refs::EntityRef;
pub use value::FieldValue;

/// The single post-population lifecycle hook.
///
/// The host platform invokes `normalize` once after ingestion has populated
/// a record's fields. The hook is infallible by signature and must tolerate
/// every combination of unset optional fields; repeat invocation is
/// harmless. No record in this crate derives or transforms values — the
/// implementations log a diagnostic and, for [`NewSchema`], fill the
/// greeting message.
pub trait Normalize {
    /// Runs the post-population pass on this record.
    fn normalize(&mut self);
}
