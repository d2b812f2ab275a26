//! # Chunk Index Module
//!
//! This module provides `ChunkIndex`, the registry of every loaded chunk and
//! the single point of mutation and query for the voxel world.
//!
//! ## Architecture
//!
//! Chunks live in an arena, each behind its own `MtResource`. Four ordered
//! views map a transformed chunk coordinate to an arena handle, one view per
//! `Facing`. Walking a view in ascending key order visits chunks in that
//! facing's draw order:
//!
//! - North: `(x, z)`
//! - South: `(limit - x, limit - z)`
//! - East: `(limit - x, z)`
//! - West: `(x, limit - z)`
//!
//! All four keys of a chunk point at the same handle, so an edit through any
//! of them is seen by all of them.
//!
//! Alongside the chunks the index keeps two coarse overlays, a height map and
//! a terrain map, covering ground for which no chunk is loaded.
//!
//! ## Thread Safety
//!
//! `ChunkIndex` is cheap to clone; clones share the same world. There are two
//! lock levels: the index state (arena membership, views and overlays) and
//! each chunk. A chunk lock is never held while the index lock is requested.

use std::collections::BTreeMap;

use log::{debug, error, info, warn};

use crate::config::IndexConfig;
use crate::core::MtResource;
use crate::error::VoxelError;

use super::block::block_type::BlockType;
use super::block::facing::Facing;
use super::block::Block;
use super::chunk::ChunkBlockGrid;
use super::coords::{ChunkCoords, Position, CHUNK_HEIGHT};
use super::scaled_grid::{GridBounds, ScaledGrid2D};

pub mod view_iteration;

pub use view_iteration::ViewBlocks;

/// Position of a chunk in the index's arena.
type ChunkHandle = usize;

/// Everything guarded by the index lock.
struct IndexState {
    chunks: Vec<MtResource<ChunkBlockGrid>>,
    /// One ordered view per facing, addressed by `Facing::index`.
    views: [BTreeMap<ChunkCoords, ChunkHandle>; 4],
    world_map_height: ScaledGrid2D<u8>,
    world_map_terrain: ScaledGrid2D<u8>,
}

impl IndexState {
    fn chunk(&self, coords: ChunkCoords) -> Option<MtResource<ChunkBlockGrid>> {
        self.views[Facing::North.index()]
            .get(&coords)
            .map(|&handle| self.chunks[handle].clone())
    }

    fn check_world_map(&self, x: i32, z: i32) -> Result<(), VoxelError> {
        if self.world_map_height.bounds().contains(x, z) {
            Ok(())
        } else {
            Err(VoxelError::OutsideWorldMap { x, z })
        }
    }
}

/// The chunk registry and its four facing views.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::config::IndexConfig;
/// use voxel_world::voxels::block::{block_type::BlockType, facing::Facing, Block};
/// use voxel_world::voxels::chunk::ChunkBlockGrid;
/// use voxel_world::voxels::chunk_index::ChunkIndex;
/// use voxel_world::voxels::coords::ChunkCoords;
///
/// let index = ChunkIndex::new(IndexConfig::default()).unwrap();
/// let coords = ChunkCoords::new(2, 3);
/// index.add_chunk(coords, ChunkBlockGrid::new(coords)).unwrap();
///
/// index.set_block(Point3::new(70, 0, 100), Block::new(BlockType::Rock)).unwrap();
///
/// for facing in Facing::all() {
///     assert_eq!(index.get_blocks(facing).count(), 1);
/// }
/// ```
#[derive(Clone)]
pub struct ChunkIndex {
    config: IndexConfig,
    state: MtResource<IndexState>,
}

impl ChunkIndex {
    /// Creates an empty index with overlays allocated at the configured bounds.
    ///
    /// # Errors
    /// `InvalidConfig` if the configuration does not validate.
    pub fn new(config: IndexConfig) -> Result<Self, VoxelError> {
        config.validate()?;

        let bounds = config.world_map;
        let state = IndexState {
            chunks: Vec::new(),
            views: Default::default(),
            world_map_height: ScaledGrid2D::new(bounds),
            world_map_terrain: ScaledGrid2D::new(bounds),
        };
        info!(
            "Chunk index created: limit {}, world map {}x{} cells at stride {}",
            config.max_chunk_limit,
            bounds.width(),
            bounds.depth(),
            bounds.scale
        );

        Ok(Self {
            config,
            state: MtResource::new(state),
        })
    }

    /// Registers `chunk` under `coords` in all four views.
    ///
    /// # Errors
    /// - `MismatchedCoords` if the chunk was built for other coordinates
    /// - `ChunkOutOfBounds` if either coordinate is outside `0..=max_chunk_limit`
    /// - `DuplicateChunk` if a chunk is already registered at `coords`
    pub fn add_chunk(&self, coords: ChunkCoords, chunk: ChunkBlockGrid) -> Result<(), VoxelError> {
        if chunk.coords() != coords {
            warn!("Refusing chunk built for {} at {}", chunk.coords(), coords);
            return Err(VoxelError::MismatchedCoords {
                expected: coords,
                actual: chunk.coords(),
            });
        }

        let limit = self.config.max_chunk_limit;
        let out_of_bounds = || {
            warn!("Refusing chunk {} outside 0..={}", coords, limit);
            VoxelError::ChunkOutOfBounds { coords, limit }
        };
        if !(0..=limit).contains(&coords.x) || !(0..=limit).contains(&coords.z) {
            return Err(out_of_bounds());
        }
        let mut keys = [coords; 4];
        for facing in Facing::all() {
            keys[facing.index()] = facing.view_key(coords, limit).ok_or_else(out_of_bounds)?;
        }

        let mut state = self.state.get_mut();
        if state.views[Facing::North.index()].contains_key(&coords) {
            warn!("Chunk {} is already loaded", coords);
            return Err(VoxelError::DuplicateChunk(coords));
        }

        let handle = state.chunks.len();
        state.chunks.push(MtResource::new(chunk));
        for (view, key) in state.views.iter_mut().zip(keys) {
            view.insert(key, handle);
        }
        debug!("Chunk {} added ({} loaded)", coords, state.chunks.len());
        Ok(())
    }

    /// Decodes a serialized chunk and registers it.
    ///
    /// A corrupt stream is logged and returned; the index is left unchanged.
    pub fn load_chunk(&self, coords: ChunkCoords, bytes: &[u8]) -> Result<(), VoxelError> {
        let chunk = ChunkBlockGrid::deserialize(coords, bytes).map_err(|e| {
            error!("Chunk {} not loaded: {}", coords, e);
            e
        })?;
        self.add_chunk(coords, chunk)
    }

    /// Encodes the chunk at `coords`.
    pub fn serialize_chunk(&self, coords: ChunkCoords) -> Result<Vec<u8>, VoxelError> {
        let chunk = self.get_chunk(coords).ok_or(VoxelError::ChunkNotLoaded(coords))?;
        let bytes = chunk.get().serialize();
        Ok(bytes)
    }

    /// Returns a shared handle to the chunk at `coords`, if it is loaded.
    pub fn get_chunk(&self, coords: ChunkCoords) -> Option<MtResource<ChunkBlockGrid>> {
        self.state.get().chunk(coords)
    }

    pub fn contains_chunk(&self, coords: ChunkCoords) -> bool {
        self.state.get().views[Facing::North.index()].contains_key(&coords)
    }

    pub fn chunk_count(&self) -> usize {
        self.state.get().chunks.len()
    }

    /// The keys of `facing`'s view in traversal order.
    pub fn view_keys(&self, facing: Facing) -> Vec<ChunkCoords> {
        self.state.get().views[facing.index()].keys().copied().collect()
    }

    /// Writes one block of the world.
    ///
    /// # Errors
    /// - `ChunkNotLoaded` if no chunk covers `position`
    /// - `OutOfRange` if `position.y` is outside the column
    pub fn set_block(&self, position: Position, block: Block) -> Result<(), VoxelError> {
        let chunk = self.loaded_chunk_for(position)?;
        let result = chunk.get_mut().set_block_at(position, block);
        result
    }

    /// Reads one block of the world.
    ///
    /// # Errors
    /// - `ChunkNotLoaded` if no chunk covers `position`
    /// - `OutOfRange` if `position.y` is outside the column
    pub fn get_block(&self, position: Position) -> Result<Block, VoxelError> {
        let chunk = self.loaded_chunk_for(position)?;
        let block = chunk.get().get_block_at(position);
        block
    }

    /// Whether `position` is inside a loaded chunk and within column height.
    pub fn is_valid_block_location(&self, position: Position) -> bool {
        (0..CHUNK_HEIGHT as i32).contains(&position.y)
            && self.contains_chunk(ChunkCoords::from_position(position))
    }

    /// Height of the highest non-empty block at world `(x, z)`, or `None` for
    /// a column of only `Air` and `Unknown`.
    pub fn block_height(&self, x: i32, z: i32) -> Result<Option<usize>, VoxelError> {
        let chunk = self.loaded_chunk_for(Position::new(x, 0, z))?;
        let height = chunk.get().top_block_height_at(x, z);
        Ok(height)
    }

    /// Walks every loaded chunk's visible surface in `facing`'s draw order.
    ///
    /// See [`ViewBlocks`] for the locking behaviour.
    pub fn get_blocks(&self, facing: Facing) -> ViewBlocks {
        let state = self.state.get();
        let chunks: Vec<MtResource<ChunkBlockGrid>> = state.views[facing.index()]
            .values()
            .map(|&handle| state.chunks[handle].clone())
            .collect();
        drop(state);

        ViewBlocks::new(facing, chunks)
    }

    /// One block per world-map cell, z-major, positioned at the cell centre
    /// with the overlay height and terrain type.
    ///
    /// The overlays are copied out under the index lock before the iterator
    /// is returned. Terrain bytes that are not a block type read as `Unknown`.
    pub fn world_map_blocks(&self) -> std::vec::IntoIter<(Position, BlockType)> {
        let state = self.state.get();
        let bounds = *state.world_map_height.bounds();
        let half = bounds.scale / 2;

        let blocks: Vec<(Position, BlockType)> = bounds
            .sample_points()
            .map(|(x, z)| {
                let height = state.world_map_height.get(x, z) as i32;
                let terrain = BlockType::from_byte(state.world_map_terrain.get(x, z))
                    .unwrap_or(BlockType::Unknown);
                (Position::new(x + half, height, z + half), terrain)
            })
            .collect();
        blocks.into_iter()
    }

    pub fn world_map_bounds(&self) -> GridBounds {
        self.config.world_map
    }

    /// Writes both overlays for the cell containing world `(x, z)`.
    pub fn set_world_map_cell(
        &self,
        x: i32,
        z: i32,
        height: u8,
        terrain: BlockType,
    ) -> Result<(), VoxelError> {
        let mut state = self.state.get_mut();
        state.check_world_map(x, z)?;
        state.world_map_height.set(x, z, height);
        state.world_map_terrain.set(x, z, terrain_byte(terrain));
        Ok(())
    }

    pub fn set_world_map_height(&self, x: i32, z: i32, height: u8) -> Result<(), VoxelError> {
        let mut state = self.state.get_mut();
        state.check_world_map(x, z)?;
        state.world_map_height.set(x, z, height);
        Ok(())
    }

    pub fn set_world_map_terrain(&self, x: i32, z: i32, terrain: BlockType) -> Result<(), VoxelError> {
        let mut state = self.state.get_mut();
        state.check_world_map(x, z)?;
        state.world_map_terrain.set(x, z, terrain_byte(terrain));
        Ok(())
    }

    pub fn world_map_height(&self, x: i32, z: i32) -> Result<u8, VoxelError> {
        let state = self.state.get();
        state.check_world_map(x, z)?;
        Ok(state.world_map_height.get(x, z))
    }

    pub fn world_map_terrain(&self, x: i32, z: i32) -> Result<BlockType, VoxelError> {
        let state = self.state.get();
        state.check_world_map(x, z)?;
        Ok(BlockType::from_byte(state.world_map_terrain.get(x, z)).unwrap_or(BlockType::Unknown))
    }

    /// Overwrites every world-map cell with `cell(x, z)`, evaluated at each
    /// cell's corner, under a single lock.
    pub fn fill_world_map<F>(&self, mut cell: F)
    where
        F: FnMut(i32, i32) -> (u8, BlockType),
    {
        let mut state = self.state.get_mut();
        let bounds = *state.world_map_height.bounds();
        for (x, z) in bounds.sample_points() {
            let (height, terrain) = cell(x, z);
            state.world_map_height.set(x, z, height);
            state.world_map_terrain.set(x, z, terrain_byte(terrain));
        }
    }

    fn loaded_chunk_for(&self, position: Position) -> Result<MtResource<ChunkBlockGrid>, VoxelError> {
        let coords = ChunkCoords::from_position(position);
        self.get_chunk(coords).ok_or_else(|| {
            debug!("No chunk loaded at {} for block {:?}", coords, position);
            VoxelError::ChunkNotLoaded(coords)
        })
    }
}

/// Terrain overlay cells hold block type ids as bytes. Every id fits.
fn terrain_byte(terrain: BlockType) -> u8 {
    terrain.id() as u8
}
