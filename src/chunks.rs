//! Chunked spatial index over occupied grid positions.
//!
//! The grid is unbounded, so chunks are created lazily and dropped again as soon as their last
//! cell goes away. A range query only visits the chunks overlapping the range.

use crate::GridPos;
use itertools::iproduct;
use std::collections::{HashMap, HashSet};

/// Side length of a chunk, in cells.
pub const CHUNK_SIZE: i64 = 16;

/// Chunk coordinate, the floor division of a grid coordinate by `CHUNK_SIZE`.
pub type ChunkPos = (i64, i64);

#[derive(Clone, Debug, Default)]
pub struct ChunkIndex {
    chunks: HashMap<ChunkPos, HashSet<GridPos>>,
}

impl ChunkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chunk containing `pos`.
    #[inline]
    pub fn chunk_of(pos: GridPos) -> ChunkPos {
        (pos.0.div_euclid(CHUNK_SIZE), pos.1.div_euclid(CHUNK_SIZE))
    }

    pub fn insert(&mut self, pos: GridPos) {
        self.chunks
            .entry(Self::chunk_of(pos))
            .or_default()
            .insert(pos);
    }

    pub fn remove(&mut self, pos: GridPos) {
        let chunk = Self::chunk_of(pos);
        if let Some(members) = self.chunks.get_mut(&chunk) {
            members.remove(&pos);
            if members.is_empty() {
                self.chunks.remove(&chunk);
            }
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.chunks
            .get(&Self::chunk_of(pos))
            .map_or(false, |members| members.contains(&pos))
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Number of non-empty chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.chunks.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All indexed positions inside the inclusive range `min..=max`.
    pub fn range(&self, min: GridPos, max: GridPos) -> Vec<GridPos> {
        if min.0 > max.0 || min.1 > max.1 {
            return Vec::new();
        }
        let (cmin, cmax) = (Self::chunk_of(min), Self::chunk_of(max));
        let in_range =
            |p: &GridPos| p.0 >= min.0 && p.0 <= max.0 && p.1 >= min.1 && p.1 <= max.1;

        // Zoomed far out over a small circuit, walking the live chunks is cheaper than probing
        // every chunk coordinate of the range.
        let columns = cmax.0.saturating_sub(cmin.0).saturating_add(1);
        let rows = cmax.1.saturating_sub(cmin.1).saturating_add(1);
        if columns.saturating_mul(rows) as u64 > self.chunks.len() as u64 {
            return self
                .chunks
                .iter()
                .filter(|(c, _)| c.0 >= cmin.0 && c.0 <= cmax.0 && c.1 >= cmin.1 && c.1 <= cmax.1)
                .flat_map(|(_, members)| members.iter().copied())
                .filter(in_range)
                .collect();
        }

        iproduct!(cmin.0..=cmax.0, cmin.1..=cmax.1)
            .filter_map(|chunk| self.chunks.get(&chunk))
            .flat_map(|members| members.iter().copied())
            .filter(in_range)
            .collect()
    }
}
