//! Liveness bitmap for row ids
//!
//! Each bit represents one row id:
//! - 0 = never issued, or deleted
//! - 1 = live
//!
//! Ids are never recycled, so a cleared bit is never set again.

/// Growable bitmap of live row ids
#[derive(Debug, Clone)]
pub struct LiveBitmap {
    /// Bitmap words (each word = 64 bits = 64 row ids)
    bitmap: Vec<u64>,

    /// Number of ids the bitmap can currently represent
    capacity: usize,

    /// Number of set bits
    live: usize,
}

impl LiveBitmap {
    /// Create a bitmap able to track `capacity` ids without growing
    pub fn with_capacity(capacity: usize) -> Self {
        let num_words = (capacity + 63) / 64;
        LiveBitmap {
            bitmap: vec![0u64; num_words],
            capacity: num_words * 64,
            live: 0,
        }
    }

    /// Mark `id` live, growing the bitmap as needed
    pub fn mark_live(&mut self, id: u64) {
        let id = id as usize;
        if id >= self.capacity {
            self.extend_capacity((id + 1).max(self.capacity * 2));
        }

        let word_idx = id / 64;
        let bit_idx = id % 64;
        if self.bitmap[word_idx] & (1u64 << bit_idx) == 0 {
            self.bitmap[word_idx] |= 1u64 << bit_idx;
            self.live += 1;
        }
    }

    /// Clear `id`; returns whether it was live
    pub fn mark_dead(&mut self, id: u64) -> bool {
        if !self.is_live(id) {
            return false;
        }

        let id = id as usize;
        self.bitmap[id / 64] &= !(1u64 << (id % 64));
        self.live -= 1;
        true
    }

    /// Check if a specific id is live
    pub fn is_live(&self, id: u64) -> bool {
        let id = id as usize;
        if id >= self.capacity {
            return false;
        }

        (self.bitmap[id / 64] & (1u64 << (id % 64))) != 0
    }

    /// Number of live ids
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of ids representable without growing
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate live ids in ascending order
    pub fn iter_live(&self) -> impl Iterator<Item = u64> + '_ {
        self.bitmap
            .iter()
            .enumerate()
            .filter(|(_, word)| **word != 0)
            .flat_map(|(word_idx, &word)| {
                (0..64usize)
                    .filter(move |bit_idx| word & (1u64 << *bit_idx) != 0)
                    .map(move |bit_idx| (word_idx * 64 + bit_idx) as u64)
            })
    }

    /// Extend capacity to track at least `new_capacity` ids
    pub fn extend_capacity(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity {
            return;
        }

        let new_num_words = (new_capacity + 63) / 64;
        self.bitmap.resize(new_num_words, 0u64);
        self.capacity = new_num_words * 64;
    }
}
