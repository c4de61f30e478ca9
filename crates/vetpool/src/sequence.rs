//! Ordered containers drained by the pipeline coordinator.
//!
//! A [`Sequence`] is a single growable container whose removal order is fixed
//! at construction by a [`Discipline`]:
//!
//! - [`Discipline::Lifo`] — the most recently inserted item is removed first
//!   (a stack).
//! - [`Discipline::Fifo`] — the earliest inserted item is removed first (a
//!   queue).
//!
//! Both disciplines share the same storage and the same operations; they only
//! differ in which end of the buffer `remove_next` and `peek` look at.
//!
//! Querying an empty sequence is not an error: [`Sequence::remove_next`] and
//! [`Sequence::peek`] simply return `None`.
//!
//! A sequence has no internal locking. During a pipeline run it is mutably
//! borrowed by the coordinator and never shared with workers.

use std::collections::VecDeque;

/// Removal order of a [`Sequence`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Discipline {
    /// Last in, first out.
    Lifo,
    /// First in, first out.
    Fifo,
}

/// A dynamically sized, ordered container with a fixed removal
/// [`Discipline`].
///
/// # Example
///
/// ```
/// use vetpool::Sequence;
///
/// let mut stack = Sequence::lifo();
/// stack.insert(1);
/// stack.insert(2);
/// assert_eq!(stack.peek(), Some(&2));
/// assert_eq!(stack.remove_next(), Some(2));
///
/// let mut queue = Sequence::fifo();
/// queue.extend(["a", "b"]);
/// assert_eq!(queue.remove_next(), Some("a"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence<T> {
    discipline: Discipline,
    items: VecDeque<T>,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence with the given removal order.
    pub const fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            items: VecDeque::new(),
        }
    }

    /// Creates an empty sequence with room for at least `capacity` items.
    pub fn with_capacity(discipline: Discipline, capacity: usize) -> Self {
        Self {
            discipline,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Creates an empty last-in-first-out sequence.
    pub const fn lifo() -> Self {
        Self::new(Discipline::Lifo)
    }

    /// Creates an empty first-in-first-out sequence.
    pub const fn fifo() -> Self {
        Self::new(Discipline::Fifo)
    }

    /// Returns the removal order this sequence was created with.
    pub const fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Appends `item` at the logical end of the removal order.
    ///
    /// For a LIFO sequence the item becomes the next one removed; for a FIFO
    /// sequence it becomes the last one removed.
    pub fn insert(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes and returns the next item, or `None` if the sequence is empty.
    pub fn remove_next(&mut self) -> Option<T> {
        match self.discipline {
            Discipline::Lifo => self.items.pop_back(),
            Discipline::Fifo => self.items.pop_front(),
        }
    }

    /// Returns the item [`remove_next`](Self::remove_next) would remove,
    /// without removing it.
    pub fn peek(&self) -> Option<&T> {
        match self.discipline {
            Discipline::Lifo => self.items.back(),
            Discipline::Fifo => self.items.front(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drops every item, keeping the discipline and the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns an iterator that removes items in discipline order.
    ///
    /// Items not consumed by the iterator stay in the sequence.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { sequence: self }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// Iterator returned by [`Sequence::drain`].
#[derive(Debug)]
pub struct Drain<'a, T> {
    sequence: &'a mut Sequence<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.sequence.remove_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.sequence.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
