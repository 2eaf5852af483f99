//! Structured logging hooks, active with the `tracing` feature.
//!
//! Without the feature every hook is an empty inline function.

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn reallocated<T>(from: usize, to: usize, len: usize) {
    tracing::trace!(
        element = std::any::type_name::<T>(),
        from,
        to,
        len,
        "growarray reallocated"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn reallocated<T>(_from: usize, _to: usize, _len: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn alloc_failed<T>(capacity: usize, bytes: usize) {
    tracing::debug!(
        element = std::any::type_name::<T>(),
        capacity,
        bytes,
        "growarray allocation failed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn alloc_failed<T>(_capacity: usize, _bytes: usize) {}
