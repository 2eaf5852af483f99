//! Instrumented element types for growarray development.
//!
//! Provides element types that count their own constructions, clones and
//! drops ([`Tracked`] + [`Counters`]) and a move-only element that owns a
//! heap block ([`MoveOnlyPoint`]), for asserting the container's ownership
//! discipline from the outside.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod point;
mod tracked;

pub use point::MoveOnlyPoint;
pub use tracked::{Counters, Tracked};
