//! Iteration over [`GrowableArray`].
//!
//! Borrowing iteration goes through slices. Owning iteration
//! ([`IntoIter`]) takes over the array's block and reads elements out of
//! it one by one.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::array::GrowableArray;
use crate::raw::RawBlock;

/// Owning iterator over the elements of a [`GrowableArray`].
///
/// Elements not yielded are dropped with the iterator, after which the
/// block is freed.
pub struct IntoIter<T> {
    block: RawBlock<T>,
    /// Slots `[start, end)` are still initialized.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` are initialized and within the block.
        unsafe {
            std::slice::from_raw_parts(self.block.as_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start < end`, so the slot is initialized. Advancing
        // `start` means it is never read or dropped again.
        let value = unsafe { self.block.as_ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was initialized and is now outside the range.
        Some(unsafe { self.block.as_ptr().add(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // SAFETY: `[start, end)` are the only initialized slots left.
        unsafe {
            let first = self.block.as_ptr().add(self.start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, remaining));
        }
        // `block` frees the storage when the field is dropped.
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

// SAFETY: same ownership reasoning as `GrowableArray`.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: `&IntoIter<T>` only exposes `&[T]`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (block, len) = self.into_raw_parts();
        IntoIter {
            block,
            start: 0,
            end: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
