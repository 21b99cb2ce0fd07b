//! Staged sequences with explicit commit and rollback.
//!
//! A [`StagedSequence`] holds two copies of the same list: the *committed*
//! buffer, which is what the rest of the application (saving, list labels)
//! treats as the truth, and the *working* buffer that edits land in.
//!
//! - [`StagedSequence::commit`] copies the working buffer over the committed one
//! - [`StagedSequence::discard`] throws the working buffer away and restores it
//!   from the committed one
//! - [`StagedSequence::replace_working`] bulk-loads new contents into the
//!   working buffer without touching the committed one
//!
//! There is exactly one level of staging. Repeated commits do not build a
//! history; for that use a proper undo stack.
//!
//! # Reconciliation
//!
//! `commit` and `replace_working` do not reallocate the target buffer. The
//! shared prefix is overwritten element by element, then the target is
//! either extended with the remaining source elements or truncated from the
//! end. Observably this is identical to replacing the target with a clone of
//! the source.

mod error;
mod sequence;

pub use error::{StagedError, StagedResult};
pub use sequence::StagedSequence;
