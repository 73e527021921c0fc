//! Process-wide monotonic object ids.
//!
//! Rows loaded into an [`crate::table::InformationTable`] get a globally
//! unique [`ObjectId`] independent of their row index, so that projections
//! (`select`) retain object identity even when indices are reordered or
//! repeated (spec §4.2, S6).

use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stable object identity, distinct from the row index used to address it
/// within a particular table view.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Atomic monotonic counter. One generator is typically shared by all tables
/// built within a process so that `select()` projections and joins across
/// tables never collide on id.
#[derive(Debug, Default)]
pub struct ObjectIdGenerator {
    next: AtomicU64,
}

impl ObjectIdGenerator {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(0) }
    }

    /// Allocate the next id. Safe to call concurrently from multiple threads.
    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_increasing() {
        let gen = ObjectIdGenerator::new();
        let a = gen.next_id();
        let b = gen.next_id();
        let c = gen.next_id();
        assert!(a.as_u64() < b.as_u64());
        assert!(b.as_u64() < c.as_u64());
    }
}
