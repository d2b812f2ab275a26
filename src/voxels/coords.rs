//! # Coordinates Module
//!
//! World and chunk coordinate types plus the chunk dimensions every other
//! voxel module is built around.

use std::fmt;

use cgmath::Point3;
use num::Integer;

/// The number of columns along each horizontal axis of a chunk.
pub const CHUNK_SIZE: usize = 32;
/// `CHUNK_SIZE` as a signed value for world coordinate arithmetic.
pub const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
/// The number of blocks in every column of a chunk.
pub const CHUNK_HEIGHT: usize = 128;

/// The largest chunk coordinate whose every column has an `i32` world position.
pub const MAX_CHUNK_COORD: i32 = i32::MAX / CHUNK_SIZE_I32 - 1;

/// An absolute world block coordinate.
pub type Position = Point3<i32>;

/// Chunk-granular coordinate: a world position divided by `CHUNK_SIZE`.
///
/// Ordering is by `x`, then `z`, which is the traversal order of the chunk
/// index's ordered views.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoords {
    /// Chunk column along the world x axis.
    pub x: i32,
    /// Chunk row along the world z axis.
    pub z: i32,
}

impl ChunkCoords {
    /// Chunk coordinates from chunk-space `x` and `z`.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the chunk that owns the given world position.
    ///
    /// Uses floor division so negative world coordinates map to negative chunks.
    pub fn from_position(position: Position) -> Self {
        Self {
            x: Integer::div_floor(&position.x, &CHUNK_SIZE_I32),
            z: Integer::div_floor(&position.z, &CHUNK_SIZE_I32),
        }
    }

    /// World x of the chunk's first column.
    ///
    /// Saturates for chunks past `MAX_CHUNK_COORD`, which have no world position.
    pub fn world_x(&self) -> i32 {
        self.x.saturating_mul(CHUNK_SIZE_I32)
    }

    /// World z of the chunk's first column. Saturates like [`world_x`](Self::world_x).
    pub fn world_z(&self) -> i32 {
        self.z.saturating_mul(CHUNK_SIZE_I32)
    }
}

impl fmt::Display for ChunkCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Maps a world x or z coordinate to its column index within a chunk.
#[inline]
pub fn local_column_index(world: i32) -> usize {
    world.rem_euclid(CHUNK_SIZE_I32) as usize
}
