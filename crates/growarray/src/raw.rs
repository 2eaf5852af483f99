//! Raw, typed-but-uninitialized storage blocks.
//!
//! [`RawBlock`] owns an allocation sized for `capacity` values of `T` and
//! nothing else: it never reads, writes, or drops elements. Dropping a block
//! frees the memory with the layout it was allocated with, which is how a
//! reallocation releases the old block without re-running destructors.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::ArrayError;
use crate::trace;

/// An owned block of uninitialized memory for `capacity` values of `T`.
///
/// Zero-capacity blocks and blocks of zero-sized `T` hold a dangling,
/// well-aligned pointer and never touch the allocator.
pub struct RawBlock<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> RawBlock<T> {
    /// A block with no storage.
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocate uninitialized storage for `capacity` values.
    ///
    /// Fails with [`ArrayError::CapacityOverflow`] if the layout cannot be
    /// formed and [`ArrayError::AllocationFailed`] if the allocator returns
    /// null. Never calls `handle_alloc_error`.
    pub fn allocate(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Ok(Self::empty());
        }
        let layout = Layout::array::<T>(capacity).map_err(|_| ArrayError::CapacityOverflow {
            requested: capacity,
        })?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
            });
        }

        // SAFETY: `layout` has non-zero size (checked above).
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self { ptr, capacity }),
            None => {
                trace::alloc_failed::<T>(capacity, layout.size());
                Err(ArrayError::AllocationFailed {
                    requested_bytes: layout.size(),
                })
            }
        }
    }

    /// Number of slots in this block.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Base pointer. Dangling (but aligned) when nothing was allocated.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Size of the backing allocation in bytes (0 if nothing is allocated).
    pub fn memory_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }

    /// Move the first `len` values of `src` into the front of `self`.
    ///
    /// This is a bitwise move. Afterwards the source slots must be treated
    /// as uninitialized: neither read nor dropped.
    ///
    /// # Safety
    ///
    /// - `len <= src.capacity()` and `len <= self.capacity()`.
    /// - `src[0..len]` are initialized.
    /// - `self[0..len]` are uninitialized (their contents are overwritten
    ///   without being dropped).
    pub unsafe fn move_from(&mut self, src: &RawBlock<T>, len: usize) {
        debug_assert!(len <= src.capacity && len <= self.capacity);
        // SAFETY: distinct allocations never overlap; bounds are the
        // caller's contract.
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), self.as_ptr(), len);
        }
    }

    fn layout(&self) -> Option<Layout> {
        if self.capacity == 0 || std::mem::size_of::<T>() == 0 {
            return None;
        }
        // Same arguments as the successful call in `allocate`.
        Layout::array::<T>(self.capacity).ok()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.layout() {
            // SAFETY: `ptr` was returned by `alloc::alloc(layout)` for this
            // exact layout and has not been freed.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_has_no_storage() {
        let block: RawBlock<u64> = RawBlock::empty();
        assert_eq!(block.capacity(), 0);
        assert_eq!(block.memory_bytes(), 0);
        assert!(block.layout().is_none());
    }

    #[test]
    fn allocate_reports_bytes() {
        let block: RawBlock<u32> = RawBlock::allocate(8).unwrap();
        assert_eq!(block.capacity(), 8);
        assert_eq!(block.memory_bytes(), 32);
        assert_eq!(block.as_ptr() as usize % std::mem::align_of::<u32>(), 0);
    }

    #[test]
    fn zero_sized_types_never_allocate() {
        let block: RawBlock<()> = RawBlock::allocate(1 << 20).unwrap();
        assert_eq!(block.capacity(), 1 << 20);
        assert_eq!(block.memory_bytes(), 0);
        assert!(block.layout().is_none());
    }

    #[test]
    fn oversized_layout_is_overflow() {
        let result = RawBlock::<u64>::allocate(usize::MAX / 4);
        assert!(matches!(
            result,
            Err(ArrayError::CapacityOverflow { requested }) if requested == usize::MAX / 4
        ));
    }

    #[test]
    fn move_from_copies_prefix() {
        let mut src: RawBlock<u32> = RawBlock::allocate(4).unwrap();
        for i in 0..3 {
            // SAFETY: i < capacity, slot uninitialized.
            unsafe { src.as_ptr().add(i).write(i as u32 * 10) };
        }
        let mut dst: RawBlock<u32> = RawBlock::allocate(8).unwrap();
        // SAFETY: 3 initialized source slots, 8 uninitialized destination slots.
        unsafe { dst.move_from(&src, 3) };
        // SAFETY: first 3 destination slots are now initialized.
        let moved = unsafe { std::slice::from_raw_parts(dst.as_ptr(), 3) };
        assert_eq!(moved, &[0, 10, 20]);
    }
}
