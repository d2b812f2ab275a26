//! # Block Type Module
//!
//! This module defines the closed set of block kinds in the voxel world and the
//! static metadata attached to each of them.
//!
//! Metadata is resolved through an exhaustive `match` rather than an array
//! indexed by discriminant, so adding a variant without describing it is a
//! compile error instead of an out-of-range lookup.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Discriminants are stable: they are the ids written by the binary column
/// format and stored in the terrain overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
#[repr(u16)]
pub enum BlockType {
    /// Not generated yet. Every column starts out filled with it.
    #[default]
    Unknown = 0,
    Air = 1,
    Water = 2,
    Rock = 3,
    Grass = 4,
    Dirt = 5,
    Sand = 6,
    SandDark = 7,
    Gravel = 8,
    /// The world base layer.
    LavaRock = 9,
    Snow = 10,
    Ice = 11,
    Tree = 12,
    Leaves = 13,
    Coal = 14,
    Iron = 15,
    Copper = 16,
    Gold = 17,
    Oil = 18,
    Crate = 19,
    Ocean = 20,
    /// Water covered by more water; kept out of the visible surface by renderers.
    UnderWater = 21,
    WaterSource = 22,
    Water1 = 23,
    Water2 = 24,
    Water3 = 25,
    Water4 = 26,
    Water5 = 27,
    Water6 = 28,
    Water7 = 29,
    Placeholder1 = 30,
    /// Terrain overlay marker for carved river cells.
    River = 31,
    GrassSlopeN = 32,
    GrassSlopeS = 33,
    GrassSlopeE = 34,
    GrassSlopeW = 35,
    GrassSlopeNW = 36,
    GrassSlopeNE = 37,
    GrassSlopeSE = 38,
    GrassSlopeSW = 39,
    GrassSlopeNEW = 40,
    GrassSlopeNES = 41,
    GrassSlopeESW = 42,
    GrassSlopeNWS = 43,
}

/// Render and behaviour metadata for one block type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockProperties {
    /// Lowercase display name.
    pub name: &'static str,
    /// Texture file used by renderers. `None` for kinds that are never drawn.
    pub texture: Option<&'static str>,
    /// Blocks movement.
    pub solid: bool,
    /// Any kind of water, flowing or full.
    pub water: bool,
    /// Lets the blocks behind it show through.
    pub transparent: bool,
    /// Fill level of flowing water, 1..=7, or 8 for full water; 0 otherwise.
    pub water_level: u8,
}

const fn opaque(name: &'static str, texture: &'static str) -> BlockProperties {
    BlockProperties {
        name,
        texture: Some(texture),
        solid: true,
        water: false,
        transparent: false,
        water_level: 0,
    }
}

const fn water(name: &'static str, texture: &'static str, water_level: u8) -> BlockProperties {
    BlockProperties {
        name,
        texture: Some(texture),
        solid: false,
        water: true,
        transparent: true,
        water_level,
    }
}

const UNKNOWN: BlockProperties = BlockProperties {
    name: "unknown",
    texture: Some("block.png"),
    solid: false,
    water: false,
    transparent: true,
    water_level: 0,
};
const AIR: BlockProperties = BlockProperties {
    name: "air",
    texture: None,
    solid: false,
    water: false,
    transparent: true,
    water_level: 0,
};
const LEAVES: BlockProperties = BlockProperties {
    transparent: true,
    ..opaque("leaves", "leaves.png")
};

impl BlockType {
    /// Converts a raw id to a `BlockType`, returning `None` for unknown ids.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        Self::from_u16(id)
    }

    /// Converts an overlay byte to a `BlockType`, returning `None` for unknown ids.
    pub fn from_byte(id: u8) -> Option<Self> {
        Self::from_u8(id)
    }

    /// The raw id written by the binary column format.
    #[inline]
    pub const fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Returns `true` for `Air` and `Unknown`, the kinds the visible surface skips over.
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, BlockType::Air | BlockType::Unknown)
    }

    pub fn properties(self) -> &'static BlockProperties {
        use BlockType::*;

        const WATER: BlockProperties = water("water", "water.png", 8);
        const OCEAN: BlockProperties = water("ocean", "water.png", 8);
        const UNDER_WATER: BlockProperties = water("under water", "water.png", 8);
        const WATER_SOURCE: BlockProperties = water("water source", "water.png", 8);
        const RIVER: BlockProperties = water("river", "water.png", 8);
        const WATER1: BlockProperties = water("water 1", "water1.png", 1);
        const WATER2: BlockProperties = water("water 2", "water2.png", 2);
        const WATER3: BlockProperties = water("water 3", "water3.png", 3);
        const WATER4: BlockProperties = water("water 4", "water4.png", 4);
        const WATER5: BlockProperties = water("water 5", "water5.png", 5);
        const WATER6: BlockProperties = water("water 6", "water6.png", 6);
        const WATER7: BlockProperties = water("water 7", "water7.png", 7);

        const ROCK: BlockProperties = opaque("rock", "rock.png");
        const GRASS: BlockProperties = opaque("grass", "grass.png");
        const DIRT: BlockProperties = opaque("dirt", "grass.png");
        const SAND: BlockProperties = opaque("sand", "sand.png");
        const SAND_DARK: BlockProperties = opaque("dark sand", "sand_dark.png");
        const GRAVEL: BlockProperties = opaque("gravel", "gravel.png");
        const LAVA_ROCK: BlockProperties = opaque("lava rock", "lava_rock.png");
        const SNOW: BlockProperties = opaque("snow", "snow.png");
        const ICE: BlockProperties = opaque("ice", "ice.png");
        const TREE: BlockProperties = opaque("tree", "tree.png");
        const COAL: BlockProperties = opaque("coal", "coal.png");
        const IRON: BlockProperties = opaque("iron", "iron.png");
        const COPPER: BlockProperties = opaque("copper", "copper.png");
        const GOLD: BlockProperties = opaque("gold", "gold.png");
        const OIL: BlockProperties = opaque("oil", "oil.png");
        const CRATE: BlockProperties = opaque("crate", "crate.png");
        const PLACEHOLDER1: BlockProperties = opaque("placeholder", "character.png");
        const SLOPE_N: BlockProperties = opaque("grass slope n", "grass_slope_n.png");
        const SLOPE_S: BlockProperties = opaque("grass slope s", "grass_slope_s.png");
        const SLOPE_E: BlockProperties = opaque("grass slope e", "grass_slope_e.png");
        const SLOPE_W: BlockProperties = opaque("grass slope w", "grass_slope_w.png");
        const SLOPE_NW: BlockProperties = opaque("grass slope nw", "grass_slope_nw.png");
        const SLOPE_NE: BlockProperties = opaque("grass slope ne", "grass_slope_ne.png");
        const SLOPE_SE: BlockProperties = opaque("grass slope se", "grass_slope_se.png");
        const SLOPE_SW: BlockProperties = opaque("grass slope sw", "grass_slope_sw.png");
        const SLOPE_NEW: BlockProperties = opaque("grass slope new", "grass_slope_new.png");
        const SLOPE_NES: BlockProperties = opaque("grass slope nes", "grass_slope_nes.png");
        const SLOPE_ESW: BlockProperties = opaque("grass slope esw", "grass_slope_esw.png");
        const SLOPE_NWS: BlockProperties = opaque("grass slope nws", "grass_slope_nws.png");

        match self {
            Unknown => &UNKNOWN,
            Air => &AIR,
            Water => &WATER,
            Rock => &ROCK,
            Grass => &GRASS,
            Dirt => &DIRT,
            Sand => &SAND,
            SandDark => &SAND_DARK,
            Gravel => &GRAVEL,
            LavaRock => &LAVA_ROCK,
            Snow => &SNOW,
            Ice => &ICE,
            Tree => &TREE,
            Leaves => &LEAVES,
            Coal => &COAL,
            Iron => &IRON,
            Copper => &COPPER,
            Gold => &GOLD,
            Oil => &OIL,
            Crate => &CRATE,
            Ocean => &OCEAN,
            UnderWater => &UNDER_WATER,
            WaterSource => &WATER_SOURCE,
            Water1 => &WATER1,
            Water2 => &WATER2,
            Water3 => &WATER3,
            Water4 => &WATER4,
            Water5 => &WATER5,
            Water6 => &WATER6,
            Water7 => &WATER7,
            Placeholder1 => &PLACEHOLDER1,
            River => &RIVER,
            GrassSlopeN => &SLOPE_N,
            GrassSlopeS => &SLOPE_S,
            GrassSlopeE => &SLOPE_E,
            GrassSlopeW => &SLOPE_W,
            GrassSlopeNW => &SLOPE_NW,
            GrassSlopeNE => &SLOPE_NE,
            GrassSlopeSE => &SLOPE_SE,
            GrassSlopeSW => &SLOPE_SW,
            GrassSlopeNEW => &SLOPE_NEW,
            GrassSlopeNES => &SLOPE_NES,
            GrassSlopeESW => &SLOPE_ESW,
            GrassSlopeNWS => &SLOPE_NWS,
        }
    }
}
