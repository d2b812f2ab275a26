//! # View Iteration Module
//!
//! This module provides `ViewBlocks`, the draw-ordered walk over every loaded
//! chunk returned by `ChunkIndex::get_blocks`.
//!
//! ## Locking
//!
//! The walk never holds the index lock while the consumer is pulling items.
//! When it is created it copies the facing's ordered chunk handles out of the
//! index; after that, each chunk's own read lock is taken just long enough to
//! collect that chunk's surface. Writers are therefore only ever blocked for
//! one chunk at a time, at the cost of the walk seeing edits made to chunks it
//! has not reached yet, and not seeing chunks added after it started.

use std::vec;

use crate::core::MtResource;
use crate::voxels::block::block_type::BlockType;
use crate::voxels::block::facing::Facing;
use crate::voxels::chunk::ChunkBlockGrid;
use crate::voxels::coords::Position;

/// Lazy, lock-per-chunk iterator over the visible blocks of a facing.
pub struct ViewBlocks {
    facing: Facing,
    /// Remaining chunks, in the facing's key order
    chunks: vec::IntoIter<MtResource<ChunkBlockGrid>>,
    /// Surface of the chunk currently being yielded
    current: vec::IntoIter<(Position, BlockType)>,
}

impl ViewBlocks {
    pub(super) fn new(facing: Facing, chunks: Vec<MtResource<ChunkBlockGrid>>) -> Self {
        Self {
            facing,
            chunks: chunks.into_iter(),
            current: Vec::new().into_iter(),
        }
    }

    /// Number of chunks the walk has not started on yet.
    pub fn remaining_chunks(&self) -> usize {
        self.chunks.len()
    }
}

impl Iterator for ViewBlocks {
    type Item = (Position, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }

            let chunk = self.chunks.next()?;
            let surface: Vec<(Position, BlockType)> =
                chunk.get().visible_blocks(self.facing).collect();
            self.current = surface.into_iter();
        }
    }
}
