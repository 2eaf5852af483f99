//! Construction / clone / drop accounting.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    constructed: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
    drop_order: Mutex<Vec<u32>>,
}

/// Shared counters for a family of [`Tracked`] values.
///
/// Cheap to clone; all clones observe the same counts.
#[derive(Clone, Default)]
pub struct Counters {
    inner: Arc<Inner>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values built with [`Tracked::new`].
    pub fn constructed(&self) -> usize {
        self.inner.constructed.load(Ordering::SeqCst)
    }

    /// Values built by `Clone::clone`.
    pub fn cloned(&self) -> usize {
        self.inner.cloned.load(Ordering::SeqCst)
    }

    /// Values dropped so far.
    pub fn dropped(&self) -> usize {
        self.inner.dropped.load(Ordering::SeqCst)
    }

    /// Values currently alive (`constructed + cloned - dropped`).
    pub fn live(&self) -> usize {
        self.constructed() + self.cloned() - self.dropped()
    }

    /// Ids in the order their values were dropped.
    pub fn drop_order(&self) -> Vec<u32> {
        self.inner
            .drop_order
            .lock()
            .map(|order| order.clone())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counters")
            .field("constructed", &self.constructed())
            .field("cloned", &self.cloned())
            .field("dropped", &self.dropped())
            .finish()
    }
}

/// An element that reports its lifecycle to a [`Counters`].
///
/// Equality and ordering of drops are by `id`.
pub struct Tracked {
    pub id: u32,
    counters: Counters,
}

impl Tracked {
    pub fn new(id: u32, counters: &Counters) -> Self {
        counters.inner.constructed.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            counters: counters.clone(),
        }
    }
}

impl From<(u32, &Counters)> for Tracked {
    fn from((id, counters): (u32, &Counters)) -> Self {
        Self::new(id, counters)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.inner.cloned.fetch_add(1, Ordering::SeqCst);
        Self {
            id: self.id,
            counters: self.counters.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.inner.dropped.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut order) = self.counters.inner.drop_order.lock() {
            order.push(self.id);
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.id)
    }
}
