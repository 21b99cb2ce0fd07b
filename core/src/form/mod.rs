//! Headless form model for editing record tables.
//!
//! This is the part of the editor that sits between a UI and the staged rows:
//!
//! - [`RecordTab`]: list selection, per-field form text, confirm and cancel
//!   over a [`StagedSequence`](crate::staged::StagedSequence)
//! - [`RecipesTab`]: a recipe table with ingredient and product rows
//! - [`EventQueue`]: change notifications the host drains after each command
//!
//! Nothing here draws anything. A UI feeds raw text in through
//! [`RecordTab::set_field`] and reads labels and drafts back out.

mod error;
mod event;
mod recipes;
mod tab;

pub use error::{FormError, FormResult};
pub use event::{EventQueue, FormEvent};
pub use recipes::{RecipesTab, RowKind, id_for_name, name_for_id};
pub use tab::RecordTab;
