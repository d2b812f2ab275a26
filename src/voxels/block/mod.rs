//! # Block Module
//!
//! This module provides the `Block` value stored in columns and the predicates
//! derived from its type. Collaborators such as path finding only ever look at
//! blocks through these predicates.

use block_type::BlockType;

pub mod block_type;
pub mod facing;

/// The underlying integer type used to represent block types on disk.
pub type BlockTypeSize = u16;

/// Represents a single voxel block in the world.
///
/// This is a lightweight wrapper: every property is looked up from the block
/// type's metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub block_type: BlockType,
}

impl Block {
    /// Creates a new block of the specified type.
    pub const fn new(block_type: BlockType) -> Self {
        Block { block_type }
    }

    pub const fn air() -> Self {
        Block::new(BlockType::Air)
    }

    /// Whether the block stops movement.
    pub fn is_solid(&self) -> bool {
        self.block_type.properties().solid
    }

    pub fn is_water(&self) -> bool {
        self.block_type.properties().water
    }

    /// Whether light and line of sight pass through the block.
    pub fn is_transparent(&self) -> bool {
        self.block_type.properties().transparent
    }

    /// The water fill level used to score river growth: 1..=7 for flowing
    /// water, 8 for full water and 0 for everything else.
    pub fn water_height(&self) -> u8 {
        self.block_type.properties().water_level
    }
}

impl From<BlockType> for Block {
    fn from(block_type: BlockType) -> Self {
        Block::new(block_type)
    }
}
