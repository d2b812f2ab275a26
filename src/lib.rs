#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! Storage and spatial queries for an isometric voxel world.
//!
//! Block data is kept per column as runs of identical blocks, grouped into
//! chunks, and the chunks are indexed under four coordinate transforms so that
//! each viewing facing can be walked in painter's-algorithm order. A coarse
//! height and terrain overlay covers ground that has no loaded chunk.
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, columns, chunks and the chunk index
//! * `config` - JSON-loadable settings for the chunk index
//! * `core` - The shared read-write lock container
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{Block, BlockType, ChunkBlockGrid, ChunkCoords, ChunkIndex, Facing, IndexConfig};
//!
//! let index = ChunkIndex::new(IndexConfig::default()).unwrap();
//! index.add_chunk(ChunkCoords::new(0, 0), ChunkBlockGrid::new(ChunkCoords::new(0, 0))).unwrap();
//! index.set_block(Point3::new(4, 0, 4), Block::new(BlockType::Grass)).unwrap();
//!
//! let first = index.get_blocks(Facing::North).next();
//! assert_eq!(first, Some((Point3::new(4, 0, 4), BlockType::Grass)));
//! ```

use log::info;
use web_time::Instant;

pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod voxels;

pub use config::IndexConfig;
pub use error::VoxelError;
pub use voxels::block::block_type::BlockType;
pub use voxels::block::facing::Facing;
pub use voxels::block::Block;
pub use voxels::chunk::ChunkBlockGrid;
pub use voxels::chunk_index::ChunkIndex;
pub use voxels::column::VoxelColumn;
pub use voxels::coords::{ChunkCoords, Position};

/// Side length, in chunks, of the square of chunks generated by `run`.
pub const DEMO_WORLD_CHUNKS: i32 = 4;
const DEMO_SEED: u32 = 2024;

/// Generates a small world, walks it from every facing and round-trips one
/// chunk through the binary format, logging what it finds.
///
/// The first command-line argument, if present, is a JSON `IndexConfig` file.
pub fn run() -> Result<(), VoxelError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            IndexConfig::from_json_file(path)?
        }
        None => IndexConfig::default(),
    };
    let index = ChunkIndex::new(config)?;
    let generator = demo::TerrainGenerator::new(DEMO_SEED);

    let start = Instant::now();
    demo::populate(&index, &generator, DEMO_WORLD_CHUNKS)?;
    info!(
        "Generated {} chunks in {:?}",
        index.chunk_count(),
        start.elapsed()
    );

    let start = Instant::now();
    generator.fill_world_map(&index);
    info!(
        "World map filled: {} cells in {:?}",
        index.world_map_blocks().len(),
        start.elapsed()
    );

    for facing in Facing::all() {
        let start = Instant::now();
        let visible = index.get_blocks(facing).count();
        info!(
            "{:?}: {} visible blocks in {:?}",
            facing,
            visible,
            start.elapsed()
        );
    }

    let coords = ChunkCoords::new(0, 0);
    let bytes = index.serialize_chunk(coords)?;
    let restored = ChunkBlockGrid::deserialize(coords, &bytes)?;
    let matches = match index.get_chunk(coords) {
        Some(chunk) => {
            let loaded = chunk.get();
            *loaded == restored
        }
        None => false,
    };
    info!(
        "Chunk {} serialized to {} bytes, round trip {}",
        coords,
        bytes.len(),
        if matches { "matches" } else { "differs" }
    );

    Ok(())
}
