//! # Voxel Storage
//!
//! This module contains the voxel world's storage and spatial queries.
//!
//! ## Architecture
//!
//! The components build on each other, leaves first:
//!
//! * **Coords**: world positions, chunk coordinates and the chunk dimensions
//! * **ScaledGrid2D**: a fixed-bounds, down-sampled 2D field used for the world-map overlays
//! * **Block**: block types, their metadata and the viewing facings
//! * **Column**: the run-length encoded vertical stack at one (x, z)
//! * **Chunk**: a square grid of columns with directional surface traversal
//! * **ChunkIndex**: the registry of loaded chunks under four facing-ordered views
//!
//! ## Data Flow
//!
//! 1. A generator builds a `ChunkBlockGrid` and registers it with `ChunkIndex::add_chunk`
//! 2. Editors call `ChunkIndex::set_block`, which routes to the owning chunk's column
//! 3. Renderers pull `ChunkIndex::get_blocks(facing)` for painter's-algorithm draw order,
//!    and `ChunkIndex::world_map_blocks` for terrain beyond the loaded chunks

pub mod block;
pub mod chunk;
pub mod chunk_index;
pub mod column;
pub mod coords;
pub mod scaled_grid;
