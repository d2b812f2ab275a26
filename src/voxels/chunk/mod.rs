//! # Chunk Module
//!
//! This module provides `ChunkBlockGrid`, a `CHUNK_SIZE × CHUNK_SIZE` tile of
//! the world holding one `VoxelColumn` per (x, z).
//!
//! ## Addressing
//!
//! Columns are stored x-major: the column at local `(x, z)` lives at index
//! `x * CHUNK_SIZE + z`. That is also the order in which a chunk is written
//! by `serialize`.
//!
//! World positions are accepted by the `*_at` methods and reduced to local
//! columns with a euclidean remainder, so a chunk never checks that a position
//! actually belongs to it. The chunk index is responsible for routing.

use cgmath::Point3;

use crate::error::VoxelError;

use super::block::facing::Facing;
use super::block::Block;
use super::column::VoxelColumn;
use super::coords::{local_column_index, ChunkCoords, Position, CHUNK_HEIGHT, CHUNK_SIZE};

pub mod chunk_iteration;
pub mod chunk_serialization;

pub use chunk_iteration::{ChunkSurfaceIterator, ColumnOrder};

/// The height every chunk column is created with.
pub(crate) const COLUMN_HEIGHT: u8 = CHUNK_HEIGHT as u8;

/// A square tile of voxel columns at fixed chunk coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBlockGrid {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    coords: ChunkCoords,
    /// `CHUNK_SIZE²` columns, x-major.
    columns: Vec<VoxelColumn>,
}

impl ChunkBlockGrid {
    /// Creates a chunk with every block `Unknown`.
    ///
    /// # Arguments
    /// * `coords` - The chunk coordinates of the new chunk
    pub fn new(coords: ChunkCoords) -> Self {
        Self {
            coords,
            columns: vec![VoxelColumn::new(COLUMN_HEIGHT); CHUNK_SIZE * CHUNK_SIZE],
        }
    }

    /// The chunk coordinates this grid was built for.
    pub fn coords(&self) -> ChunkCoords {
        self.coords
    }

    /// World position of the chunk's (0, 0, 0) block.
    pub fn world_origin(&self) -> Position {
        Point3::new(self.coords.world_x(), 0, self.coords.world_z())
    }

    /// Returns the column at local `(x, z)`.
    ///
    /// # Panics
    /// Panics if `x` or `z` is not below `CHUNK_SIZE`.
    pub fn column(&self, x: usize, z: usize) -> &VoxelColumn {
        &self.columns[Self::column_index(x, z)]
    }

    /// Mutable access to the column at local `(x, z)`.
    ///
    /// # Panics
    /// Panics if `x` or `z` is not below `CHUNK_SIZE`.
    pub fn column_mut(&mut self, x: usize, z: usize) -> &mut VoxelColumn {
        &mut self.columns[Self::column_index(x, z)]
    }

    /// Reads the block at a chunk-local position.
    pub fn get_block(&self, local: Point3<usize>) -> Result<Block, VoxelError> {
        self.column(local.x, local.z).get(local.y)
    }

    /// Writes the block at a chunk-local position.
    pub fn set_block(&mut self, local: Point3<usize>, block: Block) -> Result<(), VoxelError> {
        self.column_mut(local.x, local.z).set(local.y, block)
    }

    /// Reads the block at a world position inside this chunk.
    ///
    /// # Errors
    /// `OutOfRange` if `y` is negative or not below `CHUNK_HEIGHT`.
    pub fn get_block_at(&self, position: Position) -> Result<Block, VoxelError> {
        let y = Self::height_index(position.y)?;
        self.column(local_column_index(position.x), local_column_index(position.z))
            .get(y)
    }

    /// Writes the block at a world position inside this chunk.
    ///
    /// # Errors
    /// `OutOfRange` if `y` is negative or not below `CHUNK_HEIGHT`.
    pub fn set_block_at(&mut self, position: Position, block: Block) -> Result<(), VoxelError> {
        let y = Self::height_index(position.y)?;
        self.column_mut(local_column_index(position.x), local_column_index(position.z))
            .set(y, block)
    }

    /// Height of the highest non-empty block in the column holding world `(x, z)`.
    pub fn top_block_height_at(&self, x: i32, z: i32) -> Option<usize> {
        self.column(local_column_index(x), local_column_index(z))
            .top_block_height()
    }

    /// Walks the visible surface of every column in `facing`'s draw order,
    /// yielding world positions.
    pub fn visible_blocks(&self, facing: Facing) -> ChunkSurfaceIterator<'_> {
        ChunkSurfaceIterator::new(self, facing)
    }

    #[inline]
    fn column_index(x: usize, z: usize) -> usize {
        assert!(x < CHUNK_SIZE && z < CHUNK_SIZE, "column ({x}, {z}) is outside the chunk");
        x * CHUNK_SIZE + z
    }

    fn height_index(y: i32) -> Result<usize, VoxelError> {
        usize::try_from(y)
            .ok()
            .filter(|y| *y < CHUNK_HEIGHT)
            .ok_or(VoxelError::OutOfRange {
                y: y as i64,
                height: CHUNK_HEIGHT,
            })
    }
}
