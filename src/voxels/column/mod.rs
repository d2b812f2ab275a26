//! # Column Module
//!
//! This module provides `VoxelColumn`, the run-length encoded vertical stack of
//! blocks at one (x, z) of a chunk.
//!
//! ## Storage Format
//!
//! A column is an ordered list of runs, bottom to top. Each run is a block type
//! and a count of consecutive heights. Three invariants hold after every
//! operation:
//! 1. The counts sum to the column height.
//! 2. No two adjacent runs share a block type.
//! 3. Every count is at least 1.
//!
//! A freshly generated column is a handful of runs (base rock, dirt, grass, air),
//! so lookups and edits are linear in the run count rather than the height.

use std::fmt;

use crate::error::VoxelError;

use super::block::block_type::BlockType;
use super::block::Block;

pub mod column_iteration;
pub mod column_serialization;

pub use column_iteration::VisibleSurfaceIterator;

/// A maximal span of identical blocks within a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VoxelRun {
    /// Type shared by every block of the run.
    pub block_type: BlockType,
    /// Number of consecutive heights, at least 1 inside a column.
    pub count: u8,
}

impl VoxelRun {
    pub const fn new(block_type: BlockType, count: u8) -> Self {
        Self { block_type, count }
    }
}

/// One vertical stack of blocks, stored as runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelColumn {
    runs: Vec<VoxelRun>,
    height: usize,
}

impl VoxelColumn {
    /// Creates a column of `height` blocks, all `Unknown`.
    ///
    /// # Panics
    /// Panics if `height` is zero.
    pub fn new(height: u8) -> Self {
        assert_ne!(height, 0, "a column holds at least one block");
        Self {
            runs: vec![VoxelRun::new(BlockType::Unknown, height)],
            height: height as usize,
        }
    }

    /// The number of blocks in the column.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The runs from bottom to top.
    pub fn runs(&self) -> &[VoxelRun] {
        &self.runs
    }

    /// Returns the block at height `y`.
    ///
    /// # Errors
    /// `OutOfRange` if `y` is not below the column height.
    pub fn get(&self, y: usize) -> Result<Block, VoxelError> {
        let (index, _) = self.locate(y)?;
        Ok(Block::new(self.runs[index].block_type))
    }

    /// Rewrites the single height `y` to `block`'s type.
    ///
    /// The run covering `y` is replaced, trimmed or split depending on where
    /// `y` falls in it, and the modified run is then merged with at most one
    /// neighbour on each side. Setting a block to the type it already has
    /// leaves the runs untouched.
    ///
    /// # Errors
    /// `OutOfRange` if `y` is not below the column height.
    pub fn set(&mut self, y: usize, block: Block) -> Result<(), VoxelError> {
        let (index, offset) = self.locate(y)?;
        let new_type = block.block_type;
        let run = self.runs[index];

        if run.block_type == new_type {
            return Ok(());
        }

        let modified = if run.count == 1 {
            self.runs[index].block_type = new_type;
            index
        } else if offset == 0 {
            self.runs[index].count -= 1;
            self.runs.insert(index, VoxelRun::new(new_type, 1));
            index
        } else if offset == run.count as usize - 1 {
            self.runs[index].count -= 1;
            self.runs.insert(index + 1, VoxelRun::new(new_type, 1));
            index + 1
        } else {
            // offset < count - 1, so both remainders are non-empty
            let lower = offset as u8;
            let upper = run.count - lower - 1;
            self.runs[index].count = lower;
            self.runs.splice(
                index + 1..index + 1,
                [
                    VoxelRun::new(new_type, 1),
                    VoxelRun::new(run.block_type, upper),
                ],
            );
            index + 1
        };

        self.merge_neighbours(modified);
        Ok(())
    }

    /// Height of the highest block that is neither `Air` nor `Unknown`.
    pub fn top_block_height(&self) -> Option<usize> {
        let mut top = None;
        let mut height = 0;
        for run in &self.runs {
            height += run.count as usize;
            if !run.block_type.is_empty() {
                top = Some(height - 1);
            }
        }
        top
    }

    /// Walks the exposed surface of the column from bottom to top.
    ///
    /// `Air` and `Unknown` runs are skipped and every other height is reported
    /// once. Horizontal neighbours are ignored: this is a draw-order
    /// approximation, not an occlusion test.
    pub fn visible_surface(&self) -> VisibleSurfaceIterator<'_> {
        VisibleSurfaceIterator::new(&self.runs)
    }

    /// Finds the run covering `y` and `y`'s offset within it.
    fn locate(&self, y: usize) -> Result<(usize, usize), VoxelError> {
        let mut bottom = 0;
        for (index, run) in self.runs.iter().enumerate() {
            let top = bottom + run.count as usize;
            if y < top {
                return Ok((index, y - bottom));
            }
            bottom = top;
        }
        Err(VoxelError::OutOfRange {
            y: y as i64,
            height: self.height,
        })
    }

    fn merge_neighbours(&mut self, index: usize) {
        let block_type = self.runs[index].block_type;

        if index + 1 < self.runs.len() && self.runs[index + 1].block_type == block_type {
            self.runs[index].count += self.runs[index + 1].count;
            self.runs.remove(index + 1);
        }

        if index > 0 && self.runs[index - 1].block_type == block_type {
            self.runs[index - 1].count += self.runs[index].count;
            self.runs.remove(index);
        }
    }
}

impl fmt::Display for VoxelColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            write!(f, "{}x{},", run.block_type.id(), run.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_from(height: u8, layers: &[(BlockType, usize)]) -> VoxelColumn {
        let mut column = VoxelColumn::new(height);
        let mut y = 0;
        for &(block_type, count) in layers {
            for _ in 0..count {
                column.set(y, Block::new(block_type)).unwrap();
                y += 1;
            }
        }
        column
    }

    fn assert_invariants(column: &VoxelColumn) {
        let total: usize = column.runs().iter().map(|r| r.count as usize).sum();
        assert_eq!(total, column.height(), "run counts must sum to the height");
        assert!(column.runs().iter().all(|r| r.count >= 1));
        for pair in column.runs().windows(2) {
            assert_ne!(pair[0].block_type, pair[1].block_type, "{column}");
        }
    }

    #[test]
    fn new_column_is_a_single_unknown_run() {
        let column = VoxelColumn::new(128);
        assert_eq!(column.runs(), &[VoxelRun::new(BlockType::Unknown, 128)]);
        assert_eq!(column.get(127).unwrap().block_type, BlockType::Unknown);
    }

    #[test]
    fn out_of_range_heights_are_rejected() {
        let mut column = VoxelColumn::new(16);
        assert!(matches!(
            column.get(16),
            Err(VoxelError::OutOfRange { y: 16, height: 16 })
        ));
        assert!(column.set(200, Block::air()).is_err());
    }

    #[test]
    fn set_replaces_singleton_run_in_place() {
        let mut column = column_from(8, &[(BlockType::Rock, 3), (BlockType::Dirt, 1)]);
        column.set(3, Block::new(BlockType::Sand)).unwrap();
        assert_eq!(
            column.runs(),
            &[
                VoxelRun::new(BlockType::Rock, 3),
                VoxelRun::new(BlockType::Sand, 1),
                VoxelRun::new(BlockType::Unknown, 4),
            ]
        );
    }

    #[test]
    fn set_at_bottom_of_run_inserts_before() {
        let mut column = column_from(8, &[(BlockType::Rock, 2)]);
        column.set(2, Block::new(BlockType::Dirt)).unwrap();
        assert_eq!(
            column.runs(),
            &[
                VoxelRun::new(BlockType::Rock, 2),
                VoxelRun::new(BlockType::Dirt, 1),
                VoxelRun::new(BlockType::Unknown, 5),
            ]
        );
    }

    #[test]
    fn set_at_top_of_run_inserts_after() {
        let mut column = column_from(8, &[(BlockType::Rock, 4)]);
        column.set(3, Block::new(BlockType::Grass)).unwrap();
        assert_eq!(
            column.runs(),
            &[
                VoxelRun::new(BlockType::Rock, 3),
                VoxelRun::new(BlockType::Grass, 1),
                VoxelRun::new(BlockType::Unknown, 4),
            ]
        );
    }

    #[test]
    fn set_mid_run_splits_in_three() {
        let mut column = VoxelColumn::new(10);
        column.set(4, Block::new(BlockType::Gold)).unwrap();
        assert_eq!(
            column.runs(),
            &[
                VoxelRun::new(BlockType::Unknown, 4),
                VoxelRun::new(BlockType::Gold, 1),
                VoxelRun::new(BlockType::Unknown, 5),
            ]
        );
        assert_invariants(&column);
    }

    #[test]
    fn filling_a_gap_merges_both_neighbours() {
        let mut column = VoxelColumn::new(10);
        column.set(4, Block::new(BlockType::Gold)).unwrap();
        column.set(4, Block::new(BlockType::Unknown)).unwrap();
        assert_eq!(column.runs(), &[VoxelRun::new(BlockType::Unknown, 10)]);
    }

    #[test]
    fn trimming_merges_into_the_adjacent_run() {
        let mut column = column_from(8, &[(BlockType::Rock, 2), (BlockType::Dirt, 3)]);
        column.set(2, Block::new(BlockType::Rock)).unwrap();
        assert_eq!(
            column.runs(),
            &[
                VoxelRun::new(BlockType::Rock, 3),
                VoxelRun::new(BlockType::Dirt, 2),
                VoxelRun::new(BlockType::Unknown, 3),
            ]
        );
        column.set(4, Block::new(BlockType::Unknown)).unwrap();
        assert_eq!(
            column.runs(),
            &[
                VoxelRun::new(BlockType::Rock, 3),
                VoxelRun::new(BlockType::Dirt, 1),
                VoxelRun::new(BlockType::Unknown, 4),
            ]
        );
    }

    #[test]
    fn setting_the_existing_type_is_a_no_op() {
        let mut column = column_from(16, &[(BlockType::Rock, 5), (BlockType::Air, 3)]);
        let before = column.clone();
        for y in 0..16 {
            let existing = column.get(y).unwrap();
            column.set(y, existing).unwrap();
        }
        assert_eq!(column, before);
    }

    #[test]
    fn invariants_hold_under_pseudo_random_edits() {
        let palette = [
            BlockType::Air,
            BlockType::Rock,
            BlockType::Dirt,
            BlockType::Water,
        ];
        let mut rng = fastrand::Rng::with_seed(7);
        let mut column = VoxelColumn::new(32);
        let mut model = vec![BlockType::Unknown; 32];

        for _ in 0..2_000 {
            let y = rng.usize(0..32);
            let block_type = palette[rng.usize(0..palette.len())];
            column.set(y, Block::new(block_type)).unwrap();
            model[y] = block_type;

            assert_invariants(&column);
        }
        for (y, expected) in model.iter().enumerate() {
            assert_eq!(column.get(y).unwrap().block_type, *expected);
        }
    }

    #[test]
    fn top_block_height_skips_air_and_unknown() {
        assert_eq!(VoxelColumn::new(16).top_block_height(), None);

        let column = column_from(
            16,
            &[(BlockType::Rock, 4), (BlockType::Grass, 1), (BlockType::Air, 11)],
        );
        assert_eq!(column.top_block_height(), Some(4));
    }

    #[test]
    fn display_lists_runs_by_id() {
        let column = column_from(8, &[(BlockType::Rock, 3)]);
        assert_eq!(column.to_string(), "3x3,0x5,");
    }
}
