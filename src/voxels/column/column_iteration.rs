//! # Column Iteration Module
//!
//! This module provides the iterator behind `VoxelColumn::visible_surface`.
//!
//! The walk keeps two heights: the top of the runs consumed so far, and a
//! cursor. An `Air` or `Unknown` run moves the cursor straight to its own top
//! without yielding anything; any other run yields one height per step until
//! the cursor catches up with the top.
//!
//! For a 16-high column of `[Unknown x8, Rock x4, Air x2, Grass x2]` the
//! iterator yields heights 8 to 11 as `Rock` and 14 to 15 as `Grass`.

use crate::voxels::block::block_type::BlockType;

use super::VoxelRun;

/// A lazy walk over the `(height, BlockType)` pairs a column exposes.
///
/// A clone continues from the same point. Call `VoxelColumn::visible_surface`
/// again to start over.
#[derive(Clone, Debug)]
pub struct VisibleSurfaceIterator<'a> {
    runs: &'a [VoxelRun],
    /// Index of the next run to consume
    next_run: usize,
    /// Next height to yield
    cursor: usize,
    /// Top of the runs consumed so far
    top: usize,
    /// Type of the last consumed run that was not empty
    current: BlockType,
}

impl<'a> VisibleSurfaceIterator<'a> {
    pub(super) fn new(runs: &'a [VoxelRun]) -> Self {
        Self {
            runs,
            next_run: 0,
            cursor: 0,
            top: 0,
            current: BlockType::Unknown,
        }
    }
}

impl Iterator for VisibleSurfaceIterator<'_> {
    type Item = (usize, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor < self.top {
                let item = (self.cursor, self.current);
                self.cursor += 1;
                return Some(item);
            }

            let run = self.runs.get(self.next_run)?;
            self.next_run += 1;
            self.top += run.count as usize;

            if run.block_type.is_empty() {
                self.cursor = self.top;
            } else {
                self.current = run.block_type;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::voxels::block::Block;
    use crate::voxels::column::VoxelColumn;

    use super::*;

    fn layered(height: u8, layers: &[(BlockType, usize)]) -> VoxelColumn {
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

    #[test]
    fn surface_skips_heights_under_empty_runs() {
        let column = layered(
            16,
            &[
                (BlockType::Unknown, 8),
                (BlockType::Rock, 4),
                (BlockType::Air, 2),
                (BlockType::Grass, 2),
            ],
        );

        let surface: Vec<(usize, BlockType)> = column.visible_surface().collect();
        assert_eq!(
            surface,
            vec![
                (8, BlockType::Rock),
                (9, BlockType::Rock),
                (10, BlockType::Rock),
                (11, BlockType::Rock),
                (14, BlockType::Grass),
                (15, BlockType::Grass),
            ]
        );
    }

    #[test]
    fn stacked_solid_runs_are_all_reported() {
        let column = layered(6, &[(BlockType::Rock, 2), (BlockType::Dirt, 2), (BlockType::Air, 2)]);
        let surface: Vec<(usize, BlockType)> = column.visible_surface().collect();
        assert_eq!(
            surface,
            vec![
                (0, BlockType::Rock),
                (1, BlockType::Rock),
                (2, BlockType::Dirt),
                (3, BlockType::Dirt),
            ]
        );
    }

    #[test]
    fn unknown_column_has_no_surface() {
        assert_eq!(VoxelColumn::new(128).visible_surface().count(), 0);
    }

    #[test]
    fn iterator_can_be_restarted() {
        let column = layered(4, &[(BlockType::Air, 1), (BlockType::Sand, 1)]);
        let first: Vec<_> = column.visible_surface().collect();
        let second: Vec<_> = column.visible_surface().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![(1, BlockType::Sand)]);
    }
}
