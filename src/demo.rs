//! # Demo Terrain Module
//!
//! A small terrain generator used by the demo binary to put realistic data
//! into a `ChunkIndex`: Perlin height and mineral maps, layered the usual way
//! (lava rock base, deep rock, dirt and gravel under the surface, grass or a
//! sandy shoreline on top, water up to sea level).
//!
//! Output is deterministic for a given seed.

use cgmath::Point3;
use fastrand::Rng;
use noise::{NoiseFn, Perlin};

use crate::error::VoxelError;
use crate::voxels::block::block_type::BlockType;
use crate::voxels::block::Block;
use crate::voxels::chunk::ChunkBlockGrid;
use crate::voxels::chunk_index::ChunkIndex;
use crate::voxels::coords::{ChunkCoords, CHUNK_HEIGHT, CHUNK_SIZE};

const HALF_HEIGHT: i32 = CHUNK_HEIGHT as i32 / 2;
/// Highest y filled with water where the ground is lower.
pub const WATER_LEVEL: i32 = HALF_HEIGHT - 24;
const MIN_SURFACE_HEIGHT: i32 = HALF_HEIGHT - 40;
const MAX_SURFACE_HEIGHT: i32 = HALF_HEIGHT + 8;
/// Everything up to this height is solid rock.
const BEDROCK_DEPTH: i32 = 10;

/// Scaling factor applied to world coordinates when sampling the height noise.
const HEIGHT_SCALE_FACTOR: f64 = 0.01;
/// Scaling factor applied to world coordinates when sampling the mineral noise.
const MINERAL_SCALE_FACTOR: f64 = 0.09;
const MINERAL_THRESHOLD: f64 = 0.55;
/// Normalized distance from the world-map centre beyond which the overlay is ocean.
const COASTLINE: f64 = 0.9;

/// Seeded layered terrain: Perlin heights over rock, dirt and grass, with
/// mineral pockets and an ocean ring on the world-map overlay.
pub struct TerrainGenerator {
    seed: u64,
    height_noise: Perlin,
    mineral_noise: Perlin,
}

impl TerrainGenerator {
    /// Creates a generator; the same seed always gives the same world.
    pub fn new(seed: u32) -> Self {
        Self {
            seed: seed as u64,
            height_noise: Perlin::new(seed),
            mineral_noise: Perlin::new(seed.wrapping_add(1)),
        }
    }

    /// Ground height at world `(x, z)`, between the minimum and maximum surface heights.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let sample = self.height_noise.get([
            x as f64 * HEIGHT_SCALE_FACTOR,
            z as f64 * HEIGHT_SCALE_FACTOR,
        ]);
        let unit = ((sample + 1.0) / 2.0).clamp(0.0, 1.0);
        MIN_SURFACE_HEIGHT + (unit * (MAX_SURFACE_HEIGHT - MIN_SURFACE_HEIGHT) as f64) as i32
    }

    /// Builds one fully populated chunk.
    pub fn generate_chunk(&self, coords: ChunkCoords) -> Result<ChunkBlockGrid, VoxelError> {
        let mut rng = Rng::with_seed(self.chunk_seed(coords));
        let mut chunk = ChunkBlockGrid::new(coords);

        for local_x in 0..CHUNK_SIZE {
            for local_z in 0..CHUNK_SIZE {
                let x = coords.world_x() + local_x as i32;
                let z = coords.world_z() + local_z as i32;
                let surface = self.surface_height(x, z);

                for y in 0..=surface.max(WATER_LEVEL) {
                    let block_type = Self::layer_at(y, surface, &mut rng);
                    chunk.set_block(Point3::new(local_x, y as usize, local_z), Block::new(block_type))?;
                }

                if let Some((y, mineral)) = self.mineral_at(x, z, surface) {
                    chunk.set_block(Point3::new(local_x, y as usize, local_z), Block::new(mineral))?;
                }
            }
        }
        Ok(chunk)
    }

    /// Writes coarse heights and terrain for every world-map cell, sampled at
    /// the cell centre. Cells near the edge of the map are ocean.
    pub fn fill_world_map(&self, index: &ChunkIndex) {
        let bounds = index.world_map_bounds();
        let half = bounds.scale / 2;

        index.fill_world_map(|x, z| {
            let edge = (bounds.normalize_x(x + half) - 0.5)
                .abs()
                .max((bounds.normalize_z(z + half) - 0.5).abs())
                * 2.0;
            if edge > COASTLINE {
                return (WATER_LEVEL as u8, BlockType::Ocean);
            }

            let height = self.surface_height(x + half, z + half);
            let terrain = match height - WATER_LEVEL {
                d if d > 1 => BlockType::Grass,
                d if d >= -1 => BlockType::Sand,
                _ => BlockType::Water,
            };
            (height.max(WATER_LEVEL) as u8, terrain)
        });
    }

    fn layer_at(y: i32, surface: i32, rng: &mut Rng) -> BlockType {
        if y == 0 {
            BlockType::LavaRock
        } else if y <= BEDROCK_DEPTH {
            BlockType::Rock
        } else if y == surface {
            match WATER_LEVEL - y {
                d if d < 0 => BlockType::Grass,
                0 | 1 => BlockType::Sand,
                2..=5 => BlockType::SandDark,
                _ => BlockType::Gravel,
            }
        } else if y > surface {
            BlockType::Water
        } else if y > surface - 5 {
            match rng.u32(0..37) {
                0 => BlockType::SandDark,
                1..=3 => BlockType::Gravel,
                _ => BlockType::Dirt,
            }
        } else if rng.u32(0..5) == 0 {
            BlockType::Gravel
        } else {
            BlockType::Rock
        }
    }

    fn mineral_at(&self, x: i32, z: i32, surface: i32) -> Option<(i32, BlockType)> {
        let sample = self.mineral_noise.get([
            x as f64 * MINERAL_SCALE_FACTOR,
            z as f64 * MINERAL_SCALE_FACTOR,
        ]);
        if sample < MINERAL_THRESHOLD {
            return None;
        }

        let depth = surface - BEDROCK_DEPTH - 5;
        if depth <= 0 {
            return None;
        }
        let fraction = (sample - MINERAL_THRESHOLD) / (1.0 - MINERAL_THRESHOLD);
        let y = BEDROCK_DEPTH + 1 + (fraction * depth as f64) as i32 % depth;
        let mineral = match (sample * 1000.0) as i32 % 10 {
            0 | 1 => BlockType::Coal,
            4 | 5 => BlockType::Copper,
            6 | 7 => BlockType::Gold,
            8 | 9 => BlockType::Oil,
            _ => BlockType::Iron,
        };
        Some((y, mineral))
    }

    fn chunk_seed(&self, coords: ChunkCoords) -> u64 {
        self.seed ^ ((coords.x as u32 as u64) << 32) ^ (coords.z as u32 as u64)
    }
}

/// Generates and registers a `size × size` square of chunks starting at (0, 0).
pub fn populate(index: &ChunkIndex, generator: &TerrainGenerator, size: i32) -> Result<(), VoxelError> {
    for x in 0..size {
        for z in 0..size {
            let coords = ChunkCoords::new(x, z);
            index.add_chunk(coords, generator.generate_chunk(coords)?)?;
        }
    }
    Ok(())
}
