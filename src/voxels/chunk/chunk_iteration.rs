//! # Chunk Iteration Module
//!
//! This module provides the directional surface traversal of a chunk.
//!
//! ## Draw Order
//!
//! Columns are always visited with x as the outer axis and z as the inner
//! axis. The facing decides which of the two axes run backwards:
//!
//! | Facing | x          | z          |
//! |--------|------------|------------|
//! | North  | ascending  | ascending  |
//! | East   | descending | ascending  |
//! | South  | descending | descending |
//! | West   | ascending  | descending |
//!
//! Within a column, heights come bottom to top from the column's
//! `VisibleSurfaceIterator`.

use cgmath::Point3;

use crate::voxels::block::block_type::BlockType;
use crate::voxels::block::facing::Facing;
use crate::voxels::column::VisibleSurfaceIterator;
use crate::voxels::coords::{Position, CHUNK_SIZE};

use super::ChunkBlockGrid;

/// The local `(x, z)` columns of a chunk in a facing's draw order.
#[derive(Clone, Debug)]
pub struct ColumnOrder {
    facing: Facing,
    step: usize,
}

impl ColumnOrder {
    pub fn new(facing: Facing) -> Self {
        Self { facing, step: 0 }
    }
}

impl Iterator for ColumnOrder {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= CHUNK_SIZE * CHUNK_SIZE {
            return None;
        }
        let outer = self.step / CHUNK_SIZE;
        let inner = self.step % CHUNK_SIZE;
        self.step += 1;

        let x = if self.facing.reverses_x() { CHUNK_SIZE - 1 - outer } else { outer };
        let z = if self.facing.reverses_z() { CHUNK_SIZE - 1 - inner } else { inner };
        Some((x, z))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (CHUNK_SIZE * CHUNK_SIZE).saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnOrder {}

/// A lazy walk over the visible surface of a whole chunk.
///
/// Yields world positions: the chunk origin plus the column's local x/z and
/// the surface height.
pub struct ChunkSurfaceIterator<'a> {
    /// Chunk being walked
    chunk: &'a ChunkBlockGrid,
    /// Remaining columns
    columns: ColumnOrder,
    /// World x/z of the column currently being walked, and its surface
    current: Option<(i32, i32, VisibleSurfaceIterator<'a>)>,
}

impl<'a> ChunkSurfaceIterator<'a> {
    pub(super) fn new(chunk: &'a ChunkBlockGrid, facing: Facing) -> Self {
        Self {
            chunk,
            columns: ColumnOrder::new(facing),
            current: None,
        }
    }
}

impl Iterator for ChunkSurfaceIterator<'_> {
    type Item = (Position, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((world_x, world_z, surface)) = &mut self.current {
                if let Some((y, block_type)) = surface.next() {
                    return Some((Point3::new(*world_x, y as i32, *world_z), block_type));
                }
            }

            let (x, z) = self.columns.next()?;
            let origin = self.chunk.world_origin();
            self.current = Some((
                origin.x.saturating_add(x as i32),
                origin.z.saturating_add(z as i32),
                self.chunk.column(x, z).visible_surface(),
            ));
        }
    }
}
