//! Power-of-two capacity policy.
//!
//! Pure functions: given the current length and capacity, decide whether a
//! reallocation is due and to what size. The array applies the decision;
//! nothing here touches memory.

use crate::config::ShrinkPolicy;
use crate::error::ArrayError;

/// Geometric ratio between successive capacities.
pub const GROWTH_BASE: usize = 2;

/// A capacity chosen by the policy, with the exponent that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    /// `capacity == GROWTH_BASE.pow(exponent)`.
    pub exponent: u32,
    /// Number of slots to reserve.
    pub capacity: usize,
}

/// `ceil(log2(n))`, with `ceil_log2(0) == 0`.
pub fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// `GROWTH_BASE^exponent`, or `None` if it does not fit in `usize`.
pub fn power(exponent: u32) -> Option<usize> {
    1usize.checked_shl(exponent)
}

/// Smallest power-of-two target holding `required` slots.
pub fn fit(required: usize) -> Result<Target, ArrayError> {
    let exponent = ceil_log2(required);
    let capacity = power(exponent).ok_or(ArrayError::CapacityOverflow { requested: required })?;
    Ok(Target { exponent, capacity })
}

/// Growth decision for an insertion into an array holding `len` elements.
///
/// Returns `Ok(None)` when `len + 1` already fits.
pub fn grow_target(len: usize, capacity: usize) -> Result<Option<Target>, ArrayError> {
    let required = len
        .checked_add(1)
        .ok_or(ArrayError::CapacityOverflow { requested: len })?;
    reserve_target(required, capacity)
}

/// Growth decision for making room for `required` live elements in total.
pub fn reserve_target(required: usize, capacity: usize) -> Result<Option<Target>, ArrayError> {
    if required <= capacity {
        return Ok(None);
    }
    fit(required).map(Some)
}

/// Shrink decision after a removal left `len` elements in `capacity` slots.
///
/// The required exponent is recomputed from `len` *after* the removal.
pub fn shrink_target(len: usize, capacity: usize, policy: ShrinkPolicy) -> Option<Target> {
    if capacity == 0 {
        return None;
    }
    let exponent = ceil_log2(len);
    let target = power(exponent)?;
    let fire = match policy {
        ShrinkPolicy::Never => false,
        ShrinkPolicy::Eager => capacity > target,
        ShrinkPolicy::Hysteresis { slack } => {
            // A threshold past usize::MAX can never be reached.
            exponent
                .checked_add(slack)
                .and_then(|e| e.checked_add(1))
                .and_then(power)
                .is_some_and(|threshold| capacity >= threshold)
        }
    };
    fire.then_some(Target {
        exponent,
        capacity: target,
    })
}
