//! Form change notifications.
//!
//! Tabs never call back into the host. Instead every state change pushes a
//! [`FormEvent`] onto a shared [`EventQueue`], and the host drains the queue
//! after handling each user command (refreshing labels, banners, warnings).

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Something that happened to a tab's rows or form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Rows were bulk-replaced and committed.
    Loaded { table: &'static str, len: usize },
    /// An entry was selected and the form refilled from it.
    Selected { table: &'static str, index: usize },
    /// The working copy of an entry changed.
    Edited { table: &'static str, index: usize },
    /// Working rows were committed.
    Confirmed { table: &'static str, index: usize },
    /// Uncommitted edits were thrown away.
    Discarded { table: &'static str },
    /// Form input failed to parse.
    InvalidInput {
        table: &'static str,
        field: &'static str,
        input: String,
    },
    EntryAdded { table: &'static str, index: usize },
    EntryRemoved { table: &'static str, index: usize },
}

impl FormEvent {
    /// Table the event belongs to.
    pub fn table(&self) -> &'static str {
        match self {
            FormEvent::Loaded { table, .. }
            | FormEvent::Selected { table, .. }
            | FormEvent::Edited { table, .. }
            | FormEvent::Confirmed { table, .. }
            | FormEvent::Discarded { table }
            | FormEvent::InvalidInput { table, .. }
            | FormEvent::EntryAdded { table, .. }
            | FormEvent::EntryRemoved { table, .. } => *table,
        }
    }

    /// Whether the event changed committed rows (and so what a save writes).
    pub fn changes_committed(&self) -> bool {
        matches!(
            self,
            FormEvent::Loaded { .. }
                | FormEvent::Confirmed { .. }
                | FormEvent::EntryAdded { .. }
                | FormEvent::EntryRemoved { .. }
        )
    }
}

/// A shared queue of [`FormEvent`]s.
///
/// Cloning is cheap and every clone pushes to and drains from the same
/// queue, so several tabs can report to one host. [`push()`](Self::push)
/// only needs `&self`.
#[derive(Clone, Default)]
pub struct EventQueue {
    queue: Arc<Mutex<Vec<FormEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an event.
    pub fn push(&self, event: FormEvent) {
        log::trace!("form event: {event:?}");
        self.queue.lock().push(event);
    }

    /// Drains all queued events, returning them in submission order.
    pub fn drain(&self) -> Vec<FormEvent> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.len())
            .finish()
    }
}
