//! Headless list-and-form controller for one table.

use std::collections::BTreeMap;
use std::fmt;

use crate::record::{Field, Record};
use crate::staged::{StagedError, StagedSequence};

use super::error::{FormError, FormResult};
use super::event::{EventQueue, FormEvent};

/// A table of records edited through a list plus a detail form.
///
/// Rows live in a [`StagedSequence`]: field edits go to the working buffer
/// as soon as the form text parses, [`confirm`](Self::confirm) commits them,
/// and selecting another entry or [`cancel`](Self::cancel) discards them.
/// Adding and removing entries are committed immediately.
///
/// Form text is kept in a draft separate from the rows, so half-typed input
/// that does not parse yet never reaches the working buffer.
pub struct RecordTab<R: Record> {
    rows: StagedSequence<R>,
    selected: Option<usize>,
    draft: BTreeMap<Field, String>,
    events: EventQueue,
}

impl<R: Record> RecordTab<R> {
    pub fn new(records: Vec<R>, events: EventQueue) -> Self {
        Self {
            rows: StagedSequence::new(records),
            selected: None,
            draft: BTreeMap::new(),
            events,
        }
    }

    /// Table name, e.g. `"Ingredients"`.
    pub fn table(&self) -> &'static str {
        R::TABLE
    }

    pub fn rows(&self) -> &StagedSequence<R> {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Working copy of the selected entry.
    pub fn selected_record(&self) -> Option<&R> {
        self.selected.and_then(|index| self.rows.get(index).ok())
    }

    /// Current form text for `field`.
    pub fn draft(&self, field: Field) -> Option<&str> {
        self.draft.get(&field).map(String::as_str)
    }

    /// Committed entry names, in list order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .committed()
            .iter()
            .map(|record| record.name())
            .collect()
    }

    /// Committed rows, as written by a save.
    pub fn records(&self) -> Vec<R> {
        self.rows.snapshot_original()
    }

    /// Whether there are edits that have not been confirmed.
    pub fn is_dirty(&self) -> bool {
        self.rows.is_dirty()
    }

    /// Replaces all rows with freshly loaded records and commits them.
    pub fn load(&mut self, records: &[R]) {
        self.rows.replace_working(records);
        self.rows.commit();
        self.selected = None;
        self.draft.clear();
        log::debug!("{}: loaded {} rows", R::TABLE, records.len());
        self.notify(FormEvent::Loaded {
            table: R::TABLE,
            len: records.len(),
        });
    }

    /// Selects an entry, discarding unconfirmed edits and refilling the form.
    pub fn select(&mut self, index: usize) -> FormResult {
        let len = self.rows.committed().len();
        if index >= len {
            return Err(StagedError::IndexOutOfRange { index, len }.into());
        }

        self.rows.discard();
        self.selected = Some(index);
        self.fill_draft(index);
        self.notify(FormEvent::Selected {
            table: R::TABLE,
            index,
        });
        Ok(())
    }

    /// Updates the form text of one field.
    ///
    /// When the whole form parses, the selected entry's working copy is
    /// replaced and `Ok(true)` is returned. When some field does not parse
    /// yet, the working copy keeps its last valid state and `Ok(false)` is
    /// returned.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) -> FormResult<bool> {
        let index = self.selected.ok_or(FormError::NoSelection)?;
        if !R::fields().contains(&field) {
            return Err(FormError::NoSuchField {
                table: R::TABLE,
                field,
            });
        }

        self.draft.insert(field, text.into());
        match self.candidate(index) {
            Ok(record) => {
                self.rows.set(index, record)?;
                self.notify(FormEvent::Edited {
                    table: R::TABLE,
                    index,
                });
                Ok(true)
            }
            Err(err) if err.rejected_input().is_some() => {
                log::debug!("{}: holding unparsed input ({err})", R::TABLE);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Validates the form and commits the working rows.
    pub fn confirm(&mut self) -> FormResult {
        let index = self.selected.ok_or(FormError::NoSelection)?;
        let record = match self.candidate(index) {
            Ok(record) => record,
            Err(err) => {
                self.report_rejected(&err);
                return Err(err);
            }
        };

        self.rows.set(index, record)?;
        self.rows.commit();
        log::debug!("{}: confirmed entry {index}", R::TABLE);
        self.notify(FormEvent::Confirmed {
            table: R::TABLE,
            index,
        });
        Ok(())
    }

    /// Discards unconfirmed edits and refills the form from committed state.
    pub fn cancel(&mut self) {
        self.rows.discard();
        match self.selected {
            Some(index) => self.fill_draft(index),
            None => self.draft.clear(),
        }
        self.notify(FormEvent::Discarded { table: R::TABLE });
    }

    /// Appends a new entry named `name` and commits it.
    ///
    /// The new entry's id is one past the current row count. Unconfirmed
    /// edits are discarded first and the selection is cleared.
    pub fn add_entry(&mut self, name: &str) -> FormResult<usize> {
        if let Err(err) = Field::Name.parse(name) {
            self.report_rejected(&err);
            return Err(err);
        }

        self.rows.discard();
        let index = self.rows.len();
        let id = i64::try_from(index).map_or(i64::MAX, |len| len.saturating_add(1));
        self.rows.append(R::blank(id, name.to_owned()));
        self.rows.commit();
        self.clear_selection();
        self.notify(FormEvent::EntryAdded {
            table: R::TABLE,
            index,
        });
        Ok(index)
    }

    /// Removes the entry at `index` and commits the removal.
    pub fn remove(&mut self, index: usize) -> FormResult<R> {
        let len = self.rows.committed().len();
        if index >= len {
            return Err(StagedError::IndexOutOfRange { index, len }.into());
        }

        self.rows.discard();
        let removed = self.rows.remove_at(index)?;
        self.rows.commit();
        self.clear_selection();
        self.notify(FormEvent::EntryRemoved {
            table: R::TABLE,
            index,
        });
        Ok(removed)
    }

    /// Removes the selected entry.
    pub fn remove_selected(&mut self) -> FormResult<R> {
        let index = self.selected.ok_or(FormError::NoSelection)?;
        self.remove(index)
    }

    /// Runs `edit` on the selected entry's working copy.
    ///
    /// `edit` must validate before mutating; an `Err` is passed through and
    /// a successful edit is reported as [`FormEvent::Edited`].
    pub(crate) fn edit_selected<T>(
        &mut self,
        edit: impl FnOnce(&mut R) -> FormResult<T>,
    ) -> FormResult<T> {
        let index = self.selected.ok_or(FormError::NoSelection)?;
        let output = edit(self.rows.get_mut(index)?)?;
        self.notify(FormEvent::Edited {
            table: R::TABLE,
            index,
        });
        Ok(output)
    }

    /// Pushes an [`FormEvent::InvalidInput`] if `err` is a validation failure.
    pub(crate) fn report_rejected(&self, err: &FormError) {
        if let Some((field, input)) = err.rejected_input() {
            self.notify(FormEvent::InvalidInput {
                table: R::TABLE,
                field,
                input: input.to_owned(),
            });
        }
    }

    fn notify(&self, event: FormEvent) {
        self.events.push(event);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.draft.clear();
    }

    fn fill_draft(&mut self, index: usize) {
        self.draft.clear();
        if let Ok(record) = self.rows.get(index) {
            for &field in R::fields() {
                if let Some(text) = record.field_text(field) {
                    self.draft.insert(field, text);
                }
            }
        }
    }

    /// The selected entry with every draft field applied.
    fn candidate(&self, index: usize) -> FormResult<R> {
        let mut record = self.rows.get(index)?.clone();
        for (&field, text) in &self.draft {
            record.apply_field(field, field.parse(text)?)?;
        }
        Ok(record)
    }
}

impl<R: Record> fmt::Debug for RecordTab<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTab")
            .field("table", &R::TABLE)
            .field("rows", &self.rows.len())
            .field("selected", &self.selected)
            .field("dirty", &self.rows.is_dirty())
            .finish()
    }
}
