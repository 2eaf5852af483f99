//! The growable array itself.
//!
//! [`GrowableArray`] pairs a [`RawBlock`] with a live-element count. Slots
//! `[0, len)` are initialized; slots `[len, capacity)` are raw memory that
//! is written exactly once when an element is constructed into it and is
//! never read or dropped otherwise.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;

use crate::config::ArrayConfig;
use crate::error::ArrayError;
use crate::policy::{self, Target};
use crate::raw::RawBlock;
use crate::stats::ArrayStats;
use crate::trace;

/// An owning, contiguous, growable sequence of `T`.
///
/// Capacity is always a power of two once storage exists and follows the
/// policy in [`policy`]: grow on the insertion that would overflow, shrink
/// on removal according to the configured [`ShrinkPolicy`].
///
/// Any operation that reallocates moves every element to a new address.
/// The borrow checker already forbids holding element references across
/// such calls.
///
/// [`ShrinkPolicy`]: crate::ShrinkPolicy
///
/// # Example
///
/// ```
/// use growarray::GrowableArray;
///
/// let mut a = GrowableArray::new();
/// for v in [10, 20, 30] {
///     a.push_back(v).unwrap();
/// }
/// assert_eq!(a.capacity(), 4);
/// assert_eq!(a.pop_back(), Some(30));
/// *a.emplace_back(99).unwrap() += 1;
/// assert_eq!(a.as_slice(), &[10, 20, 100]);
/// ```
pub struct GrowableArray<T> {
    block: RawBlock<T>,
    len: usize,
    /// `capacity == 2^exponent` whenever `capacity > 0`; 0 otherwise.
    exponent: u32,
    config: ArrayConfig,
    stats: ArrayStats,
    _marker: PhantomData<T>,
}

// SAFETY: the array uniquely owns its elements; moving it to another thread
// moves them too.
unsafe impl<T: Send> Send for GrowableArray<T> {}
// SAFETY: `&GrowableArray<T>` only hands out `&T`.
unsafe impl<T: Sync> Sync for GrowableArray<T> {}

impl<T> GrowableArray<T> {
    /// Create an empty array with the default config. Allocates nothing.
    pub fn new() -> Self {
        Self::with_config(ArrayConfig::new())
    }

    /// Create an empty array with the given config. Allocates nothing.
    pub fn with_config(config: ArrayConfig) -> Self {
        Self {
            block: RawBlock::empty(),
            len: 0,
            exponent: 0,
            config,
            stats: ArrayStats::default(),
            _marker: PhantomData,
        }
    }

    /// Create an empty array with room for at least `capacity` elements,
    /// rounded up to a power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        let mut array = Self::new();
        array.reserve(capacity)?;
        Ok(array)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of reserved slots.
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Exponent of the current capacity (`capacity == 2^exponent`).
    ///
    /// Zero both for a capacity of one and for an unallocated array.
    pub fn growth_exponent(&self) -> u32 {
        self.exponent
    }

    /// The config this array was created with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Reallocation counters since creation or the last reset.
    pub fn stats(&self) -> ArrayStats {
        self.stats
    }

    /// Zero the reallocation counters.
    pub fn reset_stats(&mut self) {
        self.stats = ArrayStats::default();
    }

    /// Bytes held by the backing block.
    pub fn memory_bytes(&self) -> usize {
        self.block.memory_bytes()
    }

    /// Checked shared access to the element at `index`.
    pub fn element_at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.len;
        self.get(index).ok_or(ArrayError::OutOfBounds { index, len })
    }

    /// Checked mutable access to the element at `index`.
    pub fn element_at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.get_mut(index).ok_or(ArrayError::OutOfBounds { index, len })
    }

    /// Shared access to the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable access to the element at `index`, or `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// The last live element.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// The last live element, mutably.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Move `value` into the slot after the last element, growing first if
    /// needed.
    ///
    /// On failure the array is unchanged and `value` is dropped; use
    /// [`try_push_back`](Self::try_push_back) to get it back.
    pub fn push_back(&mut self, value: T) -> Result<(), ArrayError> {
        self.try_push_back(value).map_err(|(_, err)| err)
    }

    /// Like [`push_back`](Self::push_back) but hands `value` back on failure.
    pub fn try_push_back(&mut self, value: T) -> Result<(), (T, ArrayError)> {
        if let Err(err) = self.grow_for_one() {
            return Err((value, err));
        }
        // SAFETY: `grow_for_one` guarantees `len < capacity`; slot `len` is
        // uninitialized, so this is a construction, not an assignment.
        unsafe { self.slot(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Clone `value` into the slot after the last element. The caller keeps
    /// `value`.
    ///
    /// Capacity is secured before the clone runs, so a failed reservation
    /// performs no clone at all.
    pub fn push_back_cloned(&mut self, value: &T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.emplace_back_with(|| value.clone()).map(|_| ())
    }

    /// Construct a new element directly in the slot after the last element
    /// and return a reference to it.
    ///
    /// `make` runs exactly once, after capacity has been secured. If it
    /// panics the array keeps its previous elements (capacity may already
    /// have grown).
    pub fn emplace_back_with<F>(&mut self, make: F) -> Result<&mut T, ArrayError>
    where
        F: FnOnce() -> T,
    {
        self.grow_for_one()?;
        // SAFETY: `len < capacity` after growth.
        let slot = unsafe { self.slot(self.len) };
        // SAFETY: `slot` is in bounds and uninitialized; `make` cannot touch
        // the array because `self` is mutably borrowed here.
        unsafe { slot.write(make()) };
        self.len += 1;
        // SAFETY: the slot was just initialized and is within `[0, len)`.
        Ok(unsafe { &mut *slot })
    }

    /// Construct a new element from `args` via `T::from` directly in the
    /// next slot.
    pub fn emplace_back<A>(&mut self, args: A) -> Result<&mut T, ArrayError>
    where
        T: From<A>,
    {
        self.emplace_back_with(|| T::from(args))
    }

    /// Remove and return the last element, then apply the shrink policy.
    ///
    /// Returns `None` on an empty array (not an error). Dropping the
    /// returned value is the element's destruction.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was the last live element. It is now outside
        // `[0, len)`, so it is read out exactly once and never dropped here.
        let value = unsafe { self.slot(self.len).read() };
        self.apply_shrink_policy();
        Some(value)
    }

    /// Drop every live element in index order. Keeps the storage block.
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero first: a panicking destructor then leaks the rest instead of
        // double-dropping on unwind.
        self.len = 0;
        // SAFETY: `[0, len)` were live and are no longer reachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.block.as_ptr(), len));
        }
    }

    /// Drop elements from the back until `len == new_len`, then apply the
    /// shrink policy. No-op if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: slot `len` was live and is now outside `[0, len)`.
            unsafe { ptr::drop_in_place(self.slot(self.len)) };
        }
        self.apply_shrink_policy();
    }

    /// Ensure room for `additional` more elements without reallocating.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        if let Some(target) = policy::reserve_target(required, self.capacity())? {
            self.reallocate(target)?;
        }
        Ok(())
    }

    /// Reallocate to the smallest power of two holding `len` elements.
    ///
    /// An empty array releases its storage entirely.
    pub fn shrink_to_fit(&mut self) -> Result<(), ArrayError> {
        let from = self.capacity();
        if self.len == 0 {
            if from > 0 {
                self.block = RawBlock::empty();
                self.exponent = 0;
                self.stats.record(from, 0, 0);
                trace::reallocated::<T>(from, 0, 0);
            }
            return Ok(());
        }
        let target = policy::fit(self.len)?;
        if target.capacity < from {
            self.reallocate(target)?;
        }
        Ok(())
    }

    /// Move every item of `iter` onto the back.
    ///
    /// Reserves for the iterator's lower size bound up front when that
    /// succeeds. Stops at the first failed push; items already pushed stay.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        // The hint may overshoot a ceiling the pushes themselves fit under.
        let _ = self.reserve(iter.size_hint().0);
        for item in iter {
            self.push_back(item)?;
        }
        Ok(())
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the pointer is non-null and aligned even when dangling,
        // and `[0, len)` are initialized.
        unsafe { std::slice::from_raw_parts(self.block.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as `as_slice`, plus `&mut self` guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.block.as_ptr(), self.len) }
    }

    /// Iterate over shared references in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate over mutable references in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Take the block and live count out without running `Drop`.
    pub(crate) fn into_raw_parts(self) -> (RawBlock<T>, usize) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again, so the block is
        // moved out exactly once. `config` and `stats` own no resources.
        let block = unsafe { ptr::read(&this.block) };
        (block, this.len)
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= capacity`.
    unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity());
        // SAFETY: in bounds of the allocation (or zero offset on a dangling
        // pointer) per the caller's contract.
        unsafe { self.block.as_ptr().add(index) }
    }

    fn grow_for_one(&mut self) -> Result<(), ArrayError> {
        if let Some(target) = policy::grow_target(self.len, self.capacity())? {
            self.reallocate(target)?;
        }
        Ok(())
    }

    fn apply_shrink_policy(&mut self) {
        if let Some(target) = policy::shrink_target(self.len, self.capacity(), self.config.shrink) {
            // A failed shrink keeps the larger block, which is still valid.
            let _ = self.reallocate(target);
        }
    }

    /// Move the live elements into a fresh block of `target.capacity` slots
    /// and free the old block.
    ///
    /// On error nothing has changed.
    fn reallocate(&mut self, target: Target) -> Result<(), ArrayError> {
        let from = self.capacity();
        debug_assert!(target.capacity >= self.len);
        // Shrinks are always permitted; only growth checks the ceiling.
        if target.capacity > from && !self.config.permits(target.capacity) {
            return Err(ArrayError::CapacityExceeded {
                requested: target.capacity,
                max: self.config.max_capacity.unwrap_or(usize::MAX),
            });
        }

        let mut fresh = RawBlock::allocate(target.capacity)?;
        // SAFETY: `[0, len)` are live in the old block, `fresh` is
        // uninitialized, and `len` fits both.
        unsafe { fresh.move_from(&self.block, self.len) };
        // The old slots were moved out bitwise; dropping the old block only
        // frees memory.
        drop(std::mem::replace(&mut self.block, fresh));
        self.exponent = target.exponent;

        self.stats.record(from, target.capacity, self.len);
        trace::reallocated::<T>(from, target.capacity, self.len);
        Ok(())
    }
}

impl<T> Drop for GrowableArray<T> {
    fn drop(&mut self) {
        self.clear();
        // `block` frees the storage when the field is dropped.
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for GrowableArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowableArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Clone for GrowableArray<T> {
    /// Element-wise clone into a block of the same capacity.
    ///
    /// The clone's stats start fresh and record its single allocation.
    /// `Clone` cannot fail, so allocator refusal goes to
    /// `handle_alloc_error`.
    fn clone(&self) -> Self {
        let mut out = Self::with_config(self.config.clone());
        let capacity = self.capacity();
        if capacity > 0 {
            let target = Target {
                exponent: self.exponent,
                capacity,
            };
            if out.reallocate(target).is_err() {
                // Same layout as `self`, so only the allocator can refuse it.
                let layout = Layout::array::<T>(capacity).unwrap_or_else(|_| Layout::new::<T>());
                std::alloc::handle_alloc_error(layout);
            }
        }
        for item in self.iter() {
            // SAFETY: `out.len < self.len <= out.capacity`; slot uninitialized.
            unsafe { out.slot(out.len).write(item.clone()) };
            out.len += 1;
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<GrowableArray<U>> for GrowableArray<T> {
    fn eq(&self, other: &GrowableArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for GrowableArray<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for GrowableArray<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}
