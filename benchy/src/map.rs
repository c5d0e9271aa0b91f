//! An open-addressing hash map with quadratic probing
//!
//! All entries live directly in one boxed array of [`slot::Slot`] records.
//! The array length (the capacity) is always a power of two, so a probe
//! index can be reduced with a mask instead of a division.
//!
//! A key's probe sequence starts at its home slot, `hash & (capacity - 1)`,
//! and advances by 1, 2, 3, ... slots: the offsets from home are triangular
//! numbers. Walks are bounded to `capacity` steps.
//!
//! Lookups walk past tombstones and foreign keys and give up at the first
//! empty slot. Insertions stop at an empty slot or at the matching key, and
//! when the key is new they fill the first tombstone they passed, if any.
//!
//! Before every insertion the table checks its load. Occupied slots must not
//! exceed three quarters of the capacity after the insertion; if they would,
//! the capacity doubles and every entry is rehashed into the new table. If
//! only the tombstones push the table over that limit, it is rehashed at its
//! current capacity instead, which clears them out. Either way an empty slot
//! always exists, so every probe terminates.

mod hash;
mod slot;

use crate::err::{self, Error};
use slot::Slot;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;
use tracing::debug;

pub use hash::{BuildTimes33, Times33};
pub use slot::{Iter, IterMut};

/// Capacity of a map created with [`Map::new`]
pub const DEFAULT_CAPACITY: usize = 8;

/// Highest allowed ratio of occupied slots to capacity
pub const MAX_LOAD_FACTOR: f32 = 0.75;

/// Where an insertion landed in the probe sequence
enum Probe {
    /// The key is already stored at this index
    Found(usize),
    /// The key is absent and may be placed at this index
    Vacant(usize),
    /// The walk ended without meeting the key or a usable slot
    Exhausted,
}

/// Would `entries` used slots overload a table of `capacity` slots?
#[inline(always)]
fn exceeds_load(entries: usize, capacity: usize) -> bool {
    // entries / capacity > 3 / 4
    entries.saturating_mul(4) > capacity.saturating_mul(3)
}

/// Slot indices visited for `hash` in a table of `capacity` slots.
///
/// `capacity` must be a nonzero power of two.
#[inline(always)]
fn probe_sequence(hash: u64, capacity: usize) -> impl Iterator<Item = usize> {
    let mask = capacity - 1;
    let mut index = (hash as usize) & mask;
    (0..capacity).map(move |step| {
        index = index.wrapping_add(step) & mask;
        index
    })
}

/// A hash map from `K` to `V` using open addressing
///
/// `S` builds the hasher; the default is [`BuildTimes33`]. The map owns its
/// entries exclusively and can't be cloned. [`Map::take`] moves everything
/// out, leaving a zero-capacity map behind.
pub struct Map<K, V, S = BuildTimes33> {
    /// Slot array; its length is zero or a power of two
    slots: Box<[Slot<K, V>]>,
    /// Number of occupied slots
    len: usize,
    /// Number of tombstone slots
    tombstones: usize,
    /// Capacity restored by [`Map::clear`]
    initial_capacity: usize,
    /// Source of per-key hashers
    hash_builder: S,
}

impl<K, V> Map<K, V, BuildTimes33> {
    /// Create an empty map with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_hasher(BuildTimes33)
    }

    /// Create an empty map with `capacity` slots.
    ///
    /// Fails with [`Error::InvalidCapacity`] unless `capacity` is a nonzero
    /// power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_and_hasher(capacity, BuildTimes33)
    }
}

impl<K, V, S> Map<K, V, S> {
    /// Create an empty map with [`DEFAULT_CAPACITY`] slots using
    /// `hash_builder` to hash keys.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            slots: Slot::table(DEFAULT_CAPACITY),
            len: 0,
            tombstones: 0,
            initial_capacity: DEFAULT_CAPACITY,
            hash_builder,
        }
    }

    /// Create an empty map with `capacity` slots and a custom hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self, Error> {
        if !capacity.is_power_of_two() {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: Slot::table(capacity),
            len: 0,
            tombstones: 0,
            initial_capacity: capacity,
            hash_builder,
        })
    }

    /// Number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots. Always zero or a power of two.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The hasher builder keys are hashed with.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Drop every entry and go back to the initial capacity.
    ///
    /// The slot array is reallocated at the capacity the map was created
    /// with, however large it had grown.
    pub fn clear(&mut self) {
        self.slots = Slot::table(self.initial_capacity);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Move the whole table out, leaving `self` empty with zero capacity.
    ///
    /// The emptied map keeps its hasher and initial capacity. It answers
    /// lookups with `None` and allocates again on its next insertion.
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        let empty = Self {
            slots: Box::default(),
            len: 0,
            tombstones: 0,
            initial_capacity: self.initial_capacity,
            hash_builder: self.hash_builder.clone(),
        };
        mem::replace(self, empty)
    }

    /// Iterate over all entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.len)
    }

    /// Iterate over all entries in slot order, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.slots, self.len)
    }

    /// Store a new entry at a slot chosen by [`Probe::Vacant`].
    fn occupy(&mut self, index: usize, key: K, value: V) {
        if self.slots[index].is_tombstone() {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(key, value);
        self.len += 1;
    }

    /// The value at an index known to be occupied.
    fn value_mut_at(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => value,
            _ => unreachable!("probe reported an unoccupied slot as found"),
        }
    }
}

impl<K, V, S> Map<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Look up the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match &self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Look up the value stored for `key`, mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Whether an entry for `key` exists.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Get the value for `key`, inserting `V::default()` first if it's
    /// missing.
    ///
    /// This is the map's index-and-assign operation:
    /// `*map.get_or_insert_default(k) = v` stores `v` under `k`.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = match self.locate_for_insert(&key) {
            Probe::Found(index) => index,
            Probe::Vacant(index) => {
                self.occupy(index, key, V::default());
                index
            }
            Probe::Exhausted => unreachable!("locate_for_insert never gives up"),
        };
        self.value_mut_at(index)
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.locate_for_insert(&key) {
            Probe::Found(index) => Some(mem::replace(self.value_mut_at(index), value)),
            Probe::Vacant(index) => {
                self.occupy(index, key, value);
                None
            }
            Probe::Exhausted => unreachable!("locate_for_insert never gives up"),
        }
    }

    /// Remove `key`, returning its value. Leaves a tombstone in its slot.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.len -= 1;
                self.tombstones += 1;
                Some(value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Index of the occupied slot holding `key`.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.slots.is_empty() {
            return None;
        }
        let hash = self.hash_builder.hash_one(key);
        for index in probe_sequence(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(stored, _) if stored.borrow() == key => return Some(index),
                Slot::Occupied(..) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Walk the probe sequence for an insertion of `key`.
    fn probe_for_insert(&self, key: &K) -> Probe {
        let hash = self.hash_builder.hash_one(key);
        let mut reusable = None;
        for index in probe_sequence(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(reusable.unwrap_or(index)),
                Slot::Tombstone => {
                    reusable.get_or_insert(index);
                }
                Slot::Occupied(stored, _) if stored == key => return Probe::Found(index),
                Slot::Occupied(..) => {}
            }
        }
        match reusable {
            Some(index) => Probe::Vacant(index),
            None => Probe::Exhausted,
        }
    }

    /// Make room for one more entry, then find where `key` goes.
    ///
    /// Never returns [`Probe::Exhausted`]; a walk that fails to find a usable
    /// slot grows the table and tries again.
    fn locate_for_insert(&mut self, key: &K) -> Probe {
        self.reserve_one();
        loop {
            match self.probe_for_insert(key) {
                Probe::Exhausted => self.rehash(self.doubled_capacity()),
                found_or_vacant => return found_or_vacant,
            }
        }
    }

    /// Apply the load limit ahead of an insertion.
    fn reserve_one(&mut self) {
        if self.slots.is_empty() {
            self.rehash(self.initial_capacity);
        }
        let capacity = self.slots.len();
        if exceeds_load(self.len + 1, capacity) {
            self.rehash(self.doubled_capacity());
        } else if exceeds_load(self.len + self.tombstones + 1, capacity) {
            self.rehash(capacity);
        }
    }

    fn doubled_capacity(&self) -> usize {
        err::infallible(
            self.slots
                .len()
                .checked_mul(2)
                .ok_or(Error::CapacityOverflow),
        )
    }

    /// Move every entry into a fresh table of `capacity` slots.
    ///
    /// Entries are placed by probing the new table, so their slot indices
    /// generally change. Tombstones are discarded.
    fn rehash(&mut self, capacity: usize) {
        let old = mem::replace(&mut self.slots, Slot::table(capacity));
        debug!(
            from = old.len(),
            to = capacity,
            len = self.len,
            tombstones = self.tombstones,
            "map rehashed"
        );
        self.len = 0;
        self.tombstones = 0;
        for slot in old.into_vec() {
            if let Slot::Occupied(key, value) = slot {
                match self.probe_for_insert(&key) {
                    Probe::Vacant(index) => self.occupy(index, key, value),
                    Probe::Found(_) | Probe::Exhausted => {
                        unreachable!("keys are unique and the new table has room")
                    }
                }
            }
        }
    }
}

impl<K, V, S: Default> Default for Map<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for Map<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a Map<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut Map<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> Extend<(K, V)> for Map<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for Map<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}
