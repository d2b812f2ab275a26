//! # Error Module
//!
//! The single error type returned by every fallible operation in the crate.

use thiserror::Error;

use crate::voxels::coords::ChunkCoords;

/// Errors raised by columns, chunks, the chunk index and configuration loading.
///
/// Everything except `CorruptData` is recoverable at the call site. Corrupt
/// serialized data aborts only the load of the affected chunk.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// A height outside `[0, height)` of a column.
    #[error("height {y} is outside the column range 0..{height}")]
    OutOfRange { y: i64, height: usize },

    /// A serialized run stream that cannot be decoded into a valid column.
    #[error("corrupt voxel data: {0}")]
    CorruptData(String),

    /// A block edit or lookup in a chunk that has not been added to the index.
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkCoords),

    /// `add_chunk` called twice for the same coordinates.
    #[error("chunk {0} is already loaded")]
    DuplicateChunk(ChunkCoords),

    /// A chunk registered under coordinates other than its own.
    #[error("chunk built for {actual} cannot be registered at {expected}")]
    MismatchedCoords {
        expected: ChunkCoords,
        actual: ChunkCoords,
    },

    /// A chunk outside `0..=max_chunk_limit` on either axis.
    #[error("chunk {coords} is outside the index range 0..={limit}")]
    ChunkOutOfBounds { coords: ChunkCoords, limit: i32 },

    /// A world-map overlay access outside the overlay bounds.
    #[error("world map cell ({x}, {z}) is outside the overlay bounds")]
    OutsideWorldMap { x: i32, z: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
