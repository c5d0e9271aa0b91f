//! Raw element storage for [`Vector`](super::Vector)
//!
//! A [`RawStorage`] owns one allocation sized in elements, and nothing else.
//! It never knows which of its slots hold a constructed value: that is the
//! job of the owning [`Vector`](super::Vector), which tracks a live prefix
//! `0 .. len` and only ever reads from slots inside it.
//!
//! Dropping a [`RawStorage`] releases the allocation without running any
//! element destructors. Callers must move out or finalize every live element
//! first, otherwise those elements are leaked (which is safe, merely wasteful).
//!
//! Zero-sized element types never touch the allocator. Their storage uses a
//! dangling, well-aligned pointer and simply remembers the requested capacity.

use crate::err::Error;
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

/// Uninitialized backing memory for `cap` values of type `T`
pub(super) struct RawStorage<T> {
    /// Start of the allocation, or dangling when nothing is allocated
    ptr: NonNull<T>,
    /// Number of element slots in the allocation
    cap: usize,
    /// Tells the drop checker that values of `T` may live behind `ptr`
    _owns: PhantomData<T>,
}

// SAFETY: RawStorage is a uniquely owned buffer, same as Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: Shared references only hand out shared access to the elements.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// Storage with no slots and no allocation.
    pub(super) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate exactly `cap` uninitialized slots.
    pub(super) fn allocate(cap: usize) -> Result<Self, Error> {
        let layout = Self::layout(cap)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _owns: PhantomData,
            });
        }
        // SAFETY: The layout has a nonzero size, checked above.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(Error::Allocation { layout })?;
        Ok(Self {
            ptr,
            cap,
            _owns: PhantomData,
        })
    }

    /// Memory layout for an array of `cap` elements.
    fn layout(cap: usize) -> Result<Layout, Error> {
        Layout::array::<T>(cap).map_err(|_| Error::CapacityOverflow)
    }

    /// Number of element slots.
    #[inline(always)]
    pub(super) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(super) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(super) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Construct a value in place.
    ///
    /// # Safety
    ///
    /// `index` must be below the capacity. Any value already in that slot is
    /// overwritten without being dropped.
    #[inline(always)]
    pub(super) unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        self.ptr.as_ptr().add(index).write(value);
    }

    /// Move a value out, leaving its slot uninitialized.
    ///
    /// # Safety
    ///
    /// The slot at `index` must hold a constructed value, and the caller must
    /// stop treating that slot as live.
    #[inline(always)]
    pub(super) unsafe fn read(&mut self, index: usize) -> T {
        debug_assert!(index < self.cap);
        self.ptr.as_ptr().add(index).read()
    }

    /// Relocate the first `len` values into `dest`.
    ///
    /// Afterwards the moved-from slots are uninitialized as far as anyone is
    /// concerned; only `dest` owns those values.
    ///
    /// # Safety
    ///
    /// The first `len` slots of `self` must be constructed, and `dest` must
    /// have room for at least `len` values in slots that hold nothing live.
    pub(super) unsafe fn move_into(&mut self, dest: &mut Self, len: usize) {
        debug_assert!(len <= self.cap && len <= dest.cap);
        ptr::copy_nonoverlapping(self.ptr.as_ptr(), dest.ptr.as_ptr(), len);
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        // A layout error can't happen here, allocate() already computed it.
        if let Ok(layout) = Self::layout(self.cap) {
            if layout.size() != 0 {
                // SAFETY: ptr came from alloc::alloc with this same layout.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}
