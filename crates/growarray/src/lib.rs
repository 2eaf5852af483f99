//! Growable contiguous array with explicit raw-storage management.
//!
//! [`GrowableArray`] owns a single block of uninitialized memory and keeps a
//! strict split between *reserved* slots (`capacity`) and *live* slots
//! (`len`). Elements are moved, cloned, or constructed directly into the
//! first free slot; nothing in `[len, capacity)` is ever read or dropped.
//!
//! # Architecture
//!
//! ```text
//! GrowableArray<T>
//! ├── RawBlock<T>     (raw.rs: alloc / move / free, no element semantics)
//! ├── ArrayConfig     (max capacity, ShrinkPolicy)
//! ├── policy          (power-of-two growth and shrink targets)
//! └── ArrayStats      (grow / shrink / moved-element counters)
//! ```
//!
//! # Capacity policy
//!
//! Capacity is always `2^exponent` once storage exists: 1, 2, 4, 8, …
//! Growth fires when an insertion would exceed capacity. Shrinking on
//! removal is governed by [`ShrinkPolicy`]; the default keeps one extra
//! power of two of slack so that pushing and popping across a boundary
//! does not reallocate on every call.
//!
//! # Safety
//!
//! `unsafe` is denied crate-wide and re-allowed only in [`raw`], [`array`]
//! and [`iter`].
//! Every block carries a `// SAFETY:` comment naming the invariant it
//! relies on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod error;
pub mod iter;
pub mod policy;
pub mod raw;
pub mod stats;
mod trace;

// Public re-exports for the primary API surface.
pub use array::GrowableArray;
pub use config::{ArrayConfig, ShrinkPolicy};
pub use error::ArrayError;
pub use iter::IntoIter;
pub use policy::GROWTH_BASE;
pub use stats::ArrayStats;
