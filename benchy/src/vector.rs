//! A growable, contiguous dynamic array
//!
//! [`Vector`] keeps an allocation of raw slots in a [`raw::RawStorage`] and a
//! count of how many of those slots, starting from the front, hold live
//! values. Slots `0 .. len` are constructed; slots `len .. capacity` are
//! uninitialized memory. Every mutating operation maintains that split.
//!
//! Growth always goes through [`Vector::try_reserve`], which allocates
//! exactly the requested number of slots and relocates the live prefix. An
//! append into a full vector reserves 8 slots the first time and doubles the
//! capacity after that, so `n` appends cost `O(log n)` reallocations.
//!
//! A vector may carry a [`Finalizer`]: a plain function that receives each
//! element by value when the vector destroys it, in place of the element's
//! own `Drop`. It runs on [`Vector::clear`], on shrinking
//! [`Vector::resize`], and when the vector itself is dropped.

mod raw;

use crate::err::{self, Error};
use raw::RawStorage;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::slice;
use tracing::trace;

/// Per-element cleanup hook, called instead of the element's default drop
pub type Finalizer<T> = fn(T);

/// Capacity reserved by the first append into an empty vector
const INITIAL_CAPACITY: usize = 8;

/// A contiguous growable array with manual storage management
///
/// `Vector<T>` dereferences to `[T]`, so slice methods and indexing work as
/// usual. Indexing with `v[i]` is bounds checked by the slice and panics when
/// out of range; [`Vector::at`] reports the same condition as an
/// [`Error::OutOfRange`], and [`Vector::get_unchecked`] skips the check.
pub struct Vector<T> {
    /// Backing slots; `0 .. len` are initialized
    buf: RawStorage<T>,
    /// Number of live elements
    len: usize,
    /// Optional replacement for dropping each element
    finalizer: Option<Finalizer<T>>,
}

impl<T> Vector<T> {
    /// Create an empty vector. Nothing is allocated.
    pub const fn new() -> Self {
        Self {
            buf: RawStorage::new(),
            len: 0,
            finalizer: None,
        }
    }

    /// Create an empty vector whose elements will be handed to `finalizer`
    /// when they are destroyed.
    pub const fn with_finalizer(finalizer: Finalizer<T>) -> Self {
        Self {
            buf: RawStorage::new(),
            len: 0,
            finalizer: Some(finalizer),
        }
    }

    /// Create a vector of `len` default values, with capacity exactly `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::filled(Self::new(), len, T::default)
    }

    /// Same as [`Vector::with_len`], with a finalizer attached.
    pub fn with_len_and_finalizer(len: usize, finalizer: Finalizer<T>) -> Self
    where
        T: Default,
    {
        Self::filled(Self::with_finalizer(finalizer), len, T::default)
    }

    /// Fill an empty vector with `len` values made by `make`, allocating once.
    fn filled(mut vector: Self, len: usize, mut make: impl FnMut() -> T) -> Self {
        vector.reserve(len);
        while vector.len < len {
            // SAFETY: We reserved room for `len` elements.
            unsafe { vector.push_within_capacity(make()) };
        }
        vector
    }

    /// The finalizer attached to this vector, if any.
    pub fn finalizer(&self) -> Option<Finalizer<T>> {
        self.finalizer
    }

    /// Number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of element slots currently allocated.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Whether there are no live elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Make room for at least `capacity` elements in total.
    ///
    /// Does nothing if the current capacity is already large enough.
    /// Otherwise allocates exactly `capacity` slots, moves every live element
    /// over, and frees the old allocation. Pointers and slices obtained
    /// earlier are invalidated when that happens.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), Error> {
        if capacity <= self.buf.capacity() {
            return Ok(());
        }
        let mut fresh = RawStorage::allocate(capacity)?;
        // SAFETY: The live prefix of `buf` is initialized and `fresh` has
        //         more than `len` empty slots. Once copied, the old slots are
        //         never read again; `buf` is only deallocated.
        unsafe { self.buf.move_into(&mut fresh, self.len) };
        trace!(
            from = self.buf.capacity(),
            to = capacity,
            len = self.len,
            "vector storage reallocated"
        );
        self.buf = fresh;
        Ok(())
    }

    /// Infallible [`Vector::try_reserve`].
    ///
    /// Aborts through [`std::alloc::handle_alloc_error`] if the allocator
    /// fails, and panics if `capacity` overflows the address space.
    pub fn reserve(&mut self, capacity: usize) {
        err::infallible(self.try_reserve(capacity));
    }

    /// Capacity to grow to when the vector is full.
    fn grown_capacity(&self) -> Result<usize, Error> {
        match self.buf.capacity() {
            0 => Ok(INITIAL_CAPACITY),
            cap => cap.checked_mul(2).ok_or(Error::CapacityOverflow),
        }
    }

    /// Append an element, growing the storage if it's full.
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        if self.len == self.buf.capacity() {
            let capacity = self.grown_capacity()?;
            self.try_reserve(capacity)?;
        }
        // SAFETY: The check above guarantees a free slot at `len`.
        unsafe { self.push_within_capacity(value) };
        Ok(())
    }

    /// Infallible [`Vector::try_push`].
    #[inline]
    pub fn push(&mut self, value: T) {
        err::infallible(self.try_push(value));
    }

    /// Construct `value` at the end without checking capacity.
    ///
    /// # Safety
    ///
    /// `len` must be strictly less than the capacity.
    #[inline(always)]
    unsafe fn push_within_capacity(&mut self, value: T) {
        self.buf.write(self.len, value);
        self.len += 1;
    }

    /// Change the number of live elements to `new_len`.
    ///
    /// Shrinking destroys the surplus elements from the back, using the
    /// finalizer if one is set, and keeps the capacity. Growing reserves
    /// exactly `new_len` slots if needed and clones `fill` into each new one.
    pub fn resize(&mut self, new_len: usize, fill: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.destroy_tail(new_len);
            return;
        }
        self.reserve(new_len);
        while self.len < new_len {
            // SAFETY: We reserved room for `new_len` elements.
            unsafe { self.push_within_capacity(fill.clone()) };
        }
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Access an element without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`Vector::len`]. Anything else is undefined
    /// behavior.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        &*self.buf.as_ptr().add(index)
    }

    /// Mutable access without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`Vector::len`].
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.buf.as_mut_ptr().add(index)
    }

    /// First element, or `None` if the vector is empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// First element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element, or `None` if the vector is empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Destroy every element and release the storage.
    ///
    /// The vector is left exactly as [`Vector::new`] would create it, apart
    /// from keeping its finalizer.
    pub fn clear(&mut self) {
        self.destroy_all();
        self.buf = RawStorage::new();
    }

    /// Move the whole contents out, leaving `self` empty with no storage.
    ///
    /// This is the ownership-transferring move: the returned vector holds the
    /// allocation, length and finalizer, while `self` reports zero length and
    /// zero capacity. It runs in constant time.
    pub fn take(&mut self) -> Self {
        let empty = Self {
            buf: RawStorage::new(),
            len: 0,
            finalizer: self.finalizer,
        };
        mem::replace(self, empty)
    }

    /// Raw pointer to the first slot, valid until the next mutation.
    ///
    /// Dangling (but non-null and aligned) when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Mutable counterpart of [`Vector::as_ptr`].
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// The live elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The pointer is aligned and non-null, and the first `len`
        //         slots are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As for as_slice, plus we hold the only reference.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Hand one element to the finalizer, or drop it.
    #[inline(always)]
    fn destroy(&self, value: T) {
        match self.finalizer {
            Some(finalize) => finalize(value),
            None => drop(value),
        }
    }

    /// Destroy elements from the back until only `new_len` remain.
    fn destroy_tail(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: This slot was live, and it's outside `len` now.
            let value = unsafe { self.buf.read(self.len) };
            self.destroy(value);
        }
    }

    /// Destroy every element front to back. Storage is kept.
    fn destroy_all(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        for index in 0..len {
            // SAFETY: Slots below the old length are live, and each is read
            //         exactly once. `len` is already zero, so a panicking
            //         finalizer leaks the rest instead of dropping twice.
            let value = unsafe { self.buf.read(index) };
            self.destroy(value);
        }
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies are tight: the new capacity equals the source's length.
impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut copy = Self {
            buf: RawStorage::new(),
            len: 0,
            finalizer: self.finalizer,
        };
        copy.reserve(self.len);
        for item in self.as_slice() {
            // SAFETY: We reserved room for every element of the source.
            unsafe { copy.push_within_capacity(item.clone()) };
        }
        copy
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(lower));
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vector<U>> for Vector<T> {
    fn eq(&self, other: &Vector<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Vector<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Vector<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}
