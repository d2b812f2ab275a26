//! # Facing Module
//!
//! This module defines the four horizontal viewing directions. A facing picks
//! both the painter's-algorithm draw order and which ordered view of the chunk
//! index is walked.

use crate::voxels::coords::ChunkCoords;

/// One of the four isometric viewing directions.
///
/// Each variant is assigned a stable index used to address the chunk index's
/// per-facing views.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Facing {
    /// Chunks by ascending x then z; columns by ascending x then z.
    North = 0,
    /// Chunks by descending x, ascending z; columns likewise.
    East = 1,
    /// Chunks by descending x then z; columns likewise.
    South = 2,
    /// Chunks by ascending x, descending z; columns likewise.
    West = 3,
}

impl Facing {
    /// Returns all four facings in index order.
    pub fn all() -> [Facing; 4] {
        [Facing::North, Facing::East, Facing::South, Facing::West]
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether traversal walks the x axis from high to low.
    #[inline]
    pub const fn reverses_x(self) -> bool {
        matches!(self, Facing::South | Facing::East)
    }

    /// Whether traversal walks the z axis from high to low.
    #[inline]
    pub const fn reverses_z(self) -> bool {
        matches!(self, Facing::South | Facing::West)
    }

    /// Transforms chunk coordinates into this facing's ordered-view key.
    ///
    /// Reversed axes are mirrored against `limit`, the global maximum chunk
    /// coordinate, so that ascending key order is this facing's draw order.
    /// Returns `None` if a mirrored coordinate overflows.
    pub fn view_key(self, coords: ChunkCoords, limit: i32) -> Option<ChunkCoords> {
        let x = if self.reverses_x() { limit.checked_sub(coords.x)? } else { coords.x };
        let z = if self.reverses_z() { limit.checked_sub(coords.z)? } else { coords.z };
        Some(ChunkCoords::new(x, z))
    }
}
