//! Row handle allocation
//!
//! Hands out monotonically increasing row ids starting at 1 and tracks which
//! of them are still live. Deleted ids are retired for good.

pub mod bitmap;

pub use bitmap::LiveBitmap;

use crate::core::handle::RowHandle;

/// Allocator for [`RowHandle`]s
#[derive(Debug, Clone)]
pub struct RowAllocator {
    /// Next id to hand out
    next_id: u64,

    /// Which issued ids are live
    live: LiveBitmap,
}

impl RowAllocator {
    /// Create an allocator pre-sized for `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        RowAllocator {
            next_id: 1,
            live: LiveBitmap::with_capacity(capacity + 1),
        }
    }

    /// Issue a fresh handle
    pub fn allocate(&mut self) -> RowHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.live.mark_live(id);
        RowHandle::new(id)
    }

    /// Retire a handle; returns whether it was live
    pub fn release(&mut self, row: RowHandle) -> bool {
        self.live.mark_dead(row.id())
    }

    pub fn is_live(&self, row: RowHandle) -> bool {
        self.live.is_live(row.id())
    }

    /// Whether this allocator ever issued `row`
    pub fn was_issued(&self, row: RowHandle) -> bool {
        row.id() >= 1 && row.id() < self.next_id
    }

    /// Total handles ever issued
    pub fn issued(&self) -> u64 {
        self.next_id - 1
    }

    pub fn live_count(&self) -> usize {
        self.live.live_count()
    }

    /// Live handles in allocation order
    pub fn live_rows(&self) -> impl Iterator<Item = RowHandle> + '_ {
        self.live.iter_live().map(RowHandle::new)
    }
}

impl Default for RowAllocator {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
