//! The [`StagedSequence`] container.

use std::cmp::Ordering;
use std::fmt;

use super::error::{StagedError, StagedResult};

/// A sequence with a committed buffer and a working buffer.
///
/// All element access and mutation goes through the working buffer. The
/// committed buffer only changes on [`commit`](Self::commit). Both buffers
/// own their elements: nothing handed in or out of the container is shared
/// with either buffer.
///
/// # Example
///
/// ```
/// use larder_core::staged::StagedSequence;
///
/// let mut rows = StagedSequence::new(vec![1, 2, 3]);
/// rows.set(1, 5).unwrap();
/// rows.append(4);
/// assert_eq!(rows, [1, 5, 3, 4]);
/// assert_eq!(rows.committed(), &[1, 2, 3]);
///
/// rows.commit();
/// assert_eq!(rows.committed(), &[1, 5, 3, 4]);
///
/// rows.append(8);
/// rows.discard();
/// assert_eq!(rows, [1, 5, 3, 4]);
/// ```
#[derive(Clone)]
pub struct StagedSequence<T> {
    original: Vec<T>,
    working: Vec<T>,
}

impl<T: Clone> StagedSequence<T> {
    /// Creates a staged sequence whose committed and working buffers both
    /// hold `initial`.
    pub fn new(initial: Vec<T>) -> Self {
        let working = initial.clone();
        Self {
            original: initial,
            working,
        }
    }

    /// Creates a staged sequence from borrowed elements.
    pub fn from_slice(initial: &[T]) -> Self {
        Self::new(initial.to_vec())
    }

    /// Makes the committed buffer equal to the working buffer.
    pub fn commit(&mut self) {
        log::trace!(
            "commit: {} working -> {} committed",
            self.working.len(),
            self.original.len()
        );
        reconcile(&mut self.original, &self.working);
    }

    /// Drops all uncommitted edits.
    pub fn discard(&mut self) {
        log::trace!(
            "discard: {} working <- {} committed",
            self.working.len(),
            self.original.len()
        );
        self.working.clone_from(&self.original);
    }

    /// Replaces the working buffer with a copy of `values`.
    ///
    /// The committed buffer is untouched; follow up with
    /// [`commit`](Self::commit) to make the new contents the committed state.
    pub fn replace_working(&mut self, values: &[T]) {
        log::trace!(
            "replace_working: {} values -> {} working",
            values.len(),
            self.working.len()
        );
        reconcile(&mut self.working, values);
    }

    /// Returns an owned copy of the committed buffer.
    pub fn snapshot_original(&self) -> Vec<T> {
        self.original.clone()
    }

    /// Returns an owned copy of the working buffer.
    pub fn snapshot_working(&self) -> Vec<T> {
        self.working.clone()
    }
}

impl<T> StagedSequence<T> {
    /// Returns the element at `index` in the working buffer.
    pub fn get(&self, index: usize) -> StagedResult<&T> {
        let len = self.working.len();
        self.working
            .get(index)
            .ok_or(StagedError::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index` in the working
    /// buffer.
    pub fn get_mut(&mut self, index: usize) -> StagedResult<&mut T> {
        let len = self.working.len();
        self.working
            .get_mut(index)
            .ok_or(StagedError::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index` in the working buffer.
    pub fn set(&mut self, index: usize, value: T) -> StagedResult {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Number of elements in the working buffer.
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Returns `true` if the working buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Iterates over the working buffer.
    ///
    /// The iterator is double-ended, so `iter().rev()` walks it backwards.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.working.iter()
    }

    /// The working buffer as a slice.
    pub fn working(&self) -> &[T] {
        &self.working
    }

    /// The committed buffer as a slice.
    pub fn committed(&self) -> &[T] {
        &self.original
    }

    pub fn append(&mut self, value: T) {
        self.working.push(value);
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) {
        self.working.extend(values);
    }

    /// Inserts `value` before the element at `index`.
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> StagedResult {
        let len = self.working.len();
        if index > len {
            return Err(StagedError::IndexOutOfRange { index, len });
        }
        self.working.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> StagedResult<T> {
        let len = self.working.len();
        if index >= len {
            return Err(StagedError::IndexOutOfRange { index, len });
        }
        Ok(self.working.remove(index))
    }

    /// Removes and returns the last element, if any.
    pub fn pop(&mut self) -> Option<T> {
        self.working.pop()
    }

    pub fn clear(&mut self) {
        self.working.clear();
    }

    pub fn reverse(&mut self) {
        self.working.reverse();
    }

    /// Stable sort of the working buffer by a key.
    ///
    /// With `reverse` set, elements are ordered by descending key while
    /// elements with equal keys keep their relative order.
    pub fn sort_by_key<K, F>(&mut self, mut key: F, reverse: bool)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        if reverse {
            self.working.sort_by(|a, b| key(b).cmp(&key(a)));
        } else {
            self.working.sort_by_key(key);
        }
    }
}

impl<T: Ord> StagedSequence<T> {
    /// Stable sort of the working buffer by the elements' own ordering.
    pub fn sort(&mut self, reverse: bool) {
        if reverse {
            self.working.sort_by(|a, b| b.cmp(a));
        } else {
            self.working.sort();
        }
    }
}

impl<T: PartialEq> StagedSequence<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.working.contains(value)
    }

    /// Number of elements equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.working.iter().filter(|item| *item == value).count()
    }

    /// Index of the first element equal to `value`.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.working.iter().position(|item| item == value)
    }

    /// Removes and returns the first element equal to `value`.
    pub fn remove_value(&mut self, value: &T) -> StagedResult<T> {
        let index = self.position(value).ok_or(StagedError::ValueNotFound)?;
        Ok(self.working.remove(index))
    }

    /// Returns `true` if the working buffer differs from the committed one.
    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }
}

/// Overwrites `target` so that it equals `source`.
///
/// The overlapping prefix is cloned in place, then `target` either grows by
/// the remaining suffix of `source` or is truncated from the end.
fn reconcile<T: Clone>(target: &mut Vec<T>, source: &[T]) {
    let shared = target.len().min(source.len());
    target[..shared].clone_from_slice(&source[..shared]);

    match target.len().cmp(&source.len()) {
        Ordering::Equal => {}
        Ordering::Less => target.extend_from_slice(&source[shared..]),
        Ordering::Greater => target.truncate(source.len()),
    }
}

impl<T> Default for StagedSequence<T> {
    fn default() -> Self {
        Self {
            original: Vec::new(),
            working: Vec::new(),
        }
    }
}

impl<T: Clone> From<Vec<T>> for StagedSequence<T> {
    fn from(initial: Vec<T>) -> Self {
        Self::new(initial)
    }
}

impl<T: Clone> FromIterator<T> for StagedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for StagedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.working.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a StagedSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.working.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for StagedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedSequence")
            .field("working", &self.working)
            .field("committed", &self.original)
            .finish()
    }
}

// Comparisons look at the working buffer only.

impl<T: PartialEq> PartialEq for StagedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.working == other.working
    }
}

impl<T: Eq> Eq for StagedSequence<T> {}

impl<T: PartialEq> PartialEq<[T]> for StagedSequence<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.working.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for StagedSequence<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.working == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for StagedSequence<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.working.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for StagedSequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.working.partial_cmp(&other.working)
    }
}

impl<T: Ord> Ord for StagedSequence<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.working.cmp(&other.working)
    }
}

impl<T: PartialOrd> PartialOrd<[T]> for StagedSequence<T> {
    fn partial_cmp(&self, other: &[T]) -> Option<Ordering> {
        self.working.as_slice().partial_cmp(other)
    }
}

impl<T: PartialOrd> PartialOrd<Vec<T>> for StagedSequence<T> {
    fn partial_cmp(&self, other: &Vec<T>) -> Option<Ordering> {
        self.working.as_slice().partial_cmp(other.as_slice())
    }
}
