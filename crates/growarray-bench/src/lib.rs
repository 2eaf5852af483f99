//! Benchmark workloads for the growarray container.
//!
//! - [`fill`]: push `n` values into a fresh array.
//! - [`boundary_churn`]: alternate push/pop across a power-of-two boundary.
//! - [`sawtooth`]: repeatedly fill to `peak` and drain to empty.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use growarray::{ArrayConfig, ArrayError, GrowableArray, ShrinkPolicy};

/// Push `0..n` into a new array with the given shrink policy.
pub fn fill(n: u64, shrink: ShrinkPolicy) -> Result<GrowableArray<u64>, ArrayError> {
    let mut array = GrowableArray::with_config(ArrayConfig::new().with_shrink_policy(shrink));
    for i in 0..n {
        array.push_back(i)?;
    }
    Ok(array)
}

/// Fill to `boundary` (a power of two), then push one and pop one `rounds`
/// times. Returns the number of reallocations during the churn.
pub fn boundary_churn(
    boundary: u64,
    rounds: usize,
    shrink: ShrinkPolicy,
) -> Result<u64, ArrayError> {
    let mut array = fill(boundary, shrink)?;
    array.reset_stats();
    for _ in 0..rounds {
        array.push_back(boundary)?;
        array.pop_back();
    }
    Ok(array.stats().reallocations())
}

/// Fill to `peak` then drain to empty, `cycles` times. Returns the number
/// of reallocations.
pub fn sawtooth(peak: u64, cycles: usize, shrink: ShrinkPolicy) -> Result<u64, ArrayError> {
    let mut array = GrowableArray::with_config(ArrayConfig::new().with_shrink_policy(shrink));
    for _ in 0..cycles {
        for i in 0..peak {
            array.push_back(i)?;
        }
        while array.pop_back().is_some() {}
    }
    Ok(array.stats().reallocations())
}
