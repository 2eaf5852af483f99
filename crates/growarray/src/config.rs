//! Array configuration parameters.

/// When a removal is allowed to give capacity back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShrinkPolicy {
    /// Shrink to `2^required` only once capacity is at least
    /// `2^(required + slack + 1)`.
    ///
    /// With `slack = 1` the array must be at most a quarter full (rounded
    /// to powers of two) before it shrinks, so alternating push/pop across
    /// a power-of-two boundary reallocates at most once per crossing.
    Hysteresis {
        /// Extra powers of two tolerated above the required capacity.
        slack: u32,
    },
    /// Shrink whenever capacity exceeds `2^required`.
    ///
    /// This is the plain symmetric rule. It reallocates on every operation
    /// when the length oscillates across a boundary (e.g. between 4 and 5).
    Eager,
    /// Never give capacity back on removal.
    Never,
}

impl Default for ShrinkPolicy {
    fn default() -> Self {
        Self::Hysteresis {
            slack: ArrayConfig::DEFAULT_SHRINK_SLACK,
        }
    }
}

/// Configuration for a [`GrowableArray`](crate::GrowableArray).
///
/// Immutable once the array is created. The growth base itself is not
/// configurable; see [`GROWTH_BASE`](crate::GROWTH_BASE).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Hard ceiling on the number of reserved slots.
    ///
    /// Default: `None` (bounded only by the allocator and `isize::MAX`).
    /// Growth that would pass the ceiling fails with
    /// [`ArrayError::CapacityExceeded`](crate::ArrayError::CapacityExceeded).
    pub max_capacity: Option<usize>,

    /// Shrink behaviour on `pop_back` / `truncate`.
    ///
    /// Default: `Hysteresis { slack: 1 }`.
    pub shrink: ShrinkPolicy,
}

impl ArrayConfig {
    /// Default hysteresis slack (one extra power of two).
    pub const DEFAULT_SHRINK_SLACK: u32 = 1;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            max_capacity: None,
            shrink: ShrinkPolicy::default(),
        }
    }

    /// Set the capacity ceiling.
    pub fn with_max_capacity(mut self, max: usize) -> Self {
        self.max_capacity = Some(max);
        self
    }

    /// Set the shrink policy.
    pub fn with_shrink_policy(mut self, shrink: ShrinkPolicy) -> Self {
        self.shrink = shrink;
        self
    }

    /// Whether `capacity` slots are permitted under this config.
    pub fn permits(&self, capacity: usize) -> bool {
        self.max_capacity.is_none_or(|max| capacity <= max)
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new()
    }
}
