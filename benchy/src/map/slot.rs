//! Slot records and slot-order iteration for [`Map`](super::Map)

use std::iter::FusedIterator;
use std::slice;

/// One cell of the open-addressing table
///
/// A slot starts out `Empty`, becomes `Occupied` when a key is inserted, and
/// turns into a `Tombstone` when that key is removed. A tombstone can be
/// occupied again by a later insertion.
pub(super) enum Slot<K, V> {
    /// Never used since the table was (re)allocated; ends every probe
    Empty,
    /// Holds one owned entry
    Occupied(K, V),
    /// Previously occupied; lookups walk past it, insertions may reuse it
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// A table of `capacity` empty slots.
    pub(super) fn table(capacity: usize) -> Box<[Self]> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    #[inline(always)]
    pub(super) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }
}

/// Iterator over `(&K, &V)` in slot order, returned by
/// [`Map::iter`](super::Map::iter)
///
/// The order depends on hashing and probing and carries no meaning.
pub struct Iter<'a, K, V> {
    /// Slots not yet visited
    slots: slice::Iter<'a, Slot<K, V>>,
    /// Occupied slots not yet visited
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(slots: &'a [Slot<K, V>], len: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            _ => None,
        })?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over `(&K, &mut V)` in slot order, returned by
/// [`Map::iter_mut`](super::Map::iter_mut)
pub struct IterMut<'a, K, V> {
    /// Slots not yet visited
    slots: slice::IterMut<'a, Slot<K, V>>,
    /// Occupied slots not yet visited
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(slots: &'a mut [Slot<K, V>], len: usize) -> Self {
        Self {
            slots: slots.iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((&*key, value)),
            _ => None,
        })?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}
