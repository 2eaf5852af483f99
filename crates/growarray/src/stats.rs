//! Cumulative reallocation counters.
//!
//! [`ArrayStats`] is updated by every reallocation an array performs and
//! is cheap to copy out for assertions or telemetry.

/// Reallocation metrics for a single array, cumulative since creation or
/// the last [`reset_stats`](crate::GrowableArray::reset_stats).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrayStats {
    /// Reallocations to a larger block.
    pub grows: u64,
    /// Reallocations to a smaller block (policy shrinks and `shrink_to_fit`).
    pub shrinks: u64,
    /// Elements moved between blocks across all reallocations.
    pub elements_moved: u64,
    /// Largest capacity ever reserved.
    pub peak_capacity: usize,
}

impl ArrayStats {
    /// Total reallocations in either direction.
    pub fn reallocations(&self) -> u64 {
        self.grows + self.shrinks
    }

    /// Record a reallocation from `from` to `to` slots carrying `moved` elements.
    pub(crate) fn record(&mut self, from: usize, to: usize, moved: usize) {
        if to > from {
            self.grows += 1;
        } else {
            self.shrinks += 1;
        }
        self.elements_moved += moved as u64;
        self.peak_capacity = self.peak_capacity.max(to);
    }
}
