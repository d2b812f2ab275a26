//! # Column Serialization Module
//!
//! Binary encoding of a column: each run is three bytes, the block type id as
//! a big-endian `u16` followed by the count as a `u8`. There is no length
//! prefix or terminator; a reader stops once the decoded counts reach the
//! column height.

use std::io::{ErrorKind, Read, Write};

use crate::error::VoxelError;
use crate::voxels::block::block_type::BlockType;

use super::{VoxelColumn, VoxelRun};

/// Encoded size of one run.
pub const RUN_BYTES: usize = 3;

impl VoxelRun {
    /// The run's encoding: id high byte, id low byte, count.
    pub fn to_bytes(&self) -> [u8; RUN_BYTES] {
        let [high, low] = self.block_type.id().to_be_bytes();
        [high, low, self.count]
    }
}

impl VoxelColumn {
    /// Writes the column's runs, bottom to top.
    pub fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<(), VoxelError> {
        for run in &self.runs {
            writer.write_all(&run.to_bytes())?;
        }
        Ok(())
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.runs.iter().flat_map(VoxelRun::to_bytes).collect()
    }

    /// Reads exactly one column of `height` blocks from `reader`.
    ///
    /// Adjacent runs of the same type are merged on the way in, so the loaded
    /// column is maximally merged even if the writer was not.
    ///
    /// # Errors
    /// `CorruptData` if the stream ends early, a count is zero, a block id is
    /// unknown, or the counts overshoot `height`. Other read failures are
    /// returned as `Io`.
    pub fn deserialize_from<R: Read>(reader: &mut R, height: u8) -> Result<Self, VoxelError> {
        let height = height as usize;
        let mut runs: Vec<VoxelRun> = Vec::new();
        let mut total = 0;

        while total < height {
            let mut triple = [0u8; RUN_BYTES];
            reader.read_exact(&mut triple).map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => VoxelError::CorruptData(format!(
                    "column ended after {total} of {height} blocks"
                )),
                _ => VoxelError::Io(e),
            })?;

            let id = u16::from_be_bytes([triple[0], triple[1]]);
            let count = triple[2];
            let block_type = BlockType::from_id(id)
                .ok_or_else(|| VoxelError::CorruptData(format!("unknown block type id {id}")))?;

            if count == 0 {
                return Err(VoxelError::CorruptData(format!(
                    "zero-length run of block type {id}"
                )));
            }
            total += count as usize;
            if total > height {
                return Err(VoxelError::CorruptData(format!(
                    "run counts reach {total}, past the column height {height}"
                )));
            }

            match runs.last_mut() {
                Some(last) if last.block_type == block_type => last.count += count,
                _ => runs.push(VoxelRun::new(block_type, count)),
            }
        }

        Ok(Self { runs, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::Block;

    #[test]
    fn serialize_writes_big_endian_triples() {
        let mut column = VoxelColumn::new(8);
        column.set(0, Block::new(BlockType::GrassSlopeNWS)).unwrap();

        assert_eq!(column.serialize(), vec![0, 43, 1, 0, 0, 7]);

        let mut streamed = Vec::new();
        column.serialize_into(&mut streamed).unwrap();
        assert_eq!(streamed, column.serialize());
    }

    #[test]
    fn run_bytes_hold_the_full_u16_id() {
        let run = VoxelRun::new(BlockType::GrassSlopeNWS, 200);
        assert_eq!(run.to_bytes(), [0, 43, 200]);

        let wide = u16::from_be_bytes([run.to_bytes()[0], run.to_bytes()[1]]);
        assert_eq!(BlockType::from_id(wide), Some(BlockType::GrassSlopeNWS));
    }

    #[test]
    fn deserialize_restores_every_height() {
        let mut column = VoxelColumn::new(128);
        for y in 0..40 {
            column.set(y, Block::new(BlockType::Rock)).unwrap();
        }
        column.set(40, Block::new(BlockType::Grass)).unwrap();
        column.set(20, Block::new(BlockType::Iron)).unwrap();
        column.set(41, Block::air()).unwrap();

        let bytes = column.serialize();
        let restored = VoxelColumn::deserialize_from(&mut bytes.as_slice(), 128).unwrap();

        assert_eq!(restored, column);
    }

    #[test]
    fn deserialize_leaves_following_bytes_unread() {
        let bytes = [0, 3, 4, 0, 1, 4, 0xAA];
        let mut reader = &bytes[..];
        let column = VoxelColumn::deserialize_from(&mut reader, 8).unwrap();

        assert_eq!(column.get(3).unwrap().block_type, BlockType::Rock);
        assert_eq!(column.get(4).unwrap().block_type, BlockType::Air);
        assert_eq!(reader, &[0xAA]);
    }

    #[test]
    fn deserialize_merges_adjacent_equal_runs() {
        let bytes = [0, 3, 2, 0, 3, 2];
        let column = VoxelColumn::deserialize_from(&mut &bytes[..], 4).unwrap();
        assert_eq!(column.runs(), &[VoxelRun::new(BlockType::Rock, 4)]);
    }

    #[test]
    fn deserialize_rejects_corrupt_streams() {
        let cases: [&[u8]; 5] = [
            // overshoots the height
            &[0, 3, 5],
            // never reaches the height
            &[0, 3, 2],
            // partial triple
            &[0, 3, 2, 0],
            // zero count
            &[0, 3, 0, 0, 1, 4],
            // unknown id
            &[0x12, 0x34, 4],
        ];
        for bytes in cases {
            let result = VoxelColumn::deserialize_from(&mut &bytes[..], 4);
            assert!(
                matches!(result, Err(VoxelError::CorruptData(_))),
                "{bytes:?} decoded as {result:?}"
            );
        }
    }
}
