//! # Chunk Serialization Module
//!
//! A chunk is encoded as its columns' encodings back to back, x-major then
//! z-minor over `0..CHUNK_SIZE`. Like the column format there is no header:
//! the chunk coordinates travel separately.

use std::io::Write;

use crate::error::VoxelError;
use crate::voxels::column::{VoxelColumn, VoxelRun};
use crate::voxels::coords::{ChunkCoords, CHUNK_SIZE};

use super::{ChunkBlockGrid, COLUMN_HEIGHT};

impl ChunkBlockGrid {
    pub fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<(), VoxelError> {
        for column in &self.columns {
            column.serialize_into(writer)?;
        }
        Ok(())
    }

    /// Encodes every column of the chunk.
    pub fn serialize(&self) -> Vec<u8> {
        self.columns
            .iter()
            .flat_map(VoxelColumn::runs)
            .flat_map(VoxelRun::to_bytes)
            .collect()
    }

    /// Decodes a chunk previously written by [`serialize`](Self::serialize).
    ///
    /// # Errors
    /// `CorruptData` if any column fails to decode or bytes remain after the
    /// last column.
    pub fn deserialize(coords: ChunkCoords, bytes: &[u8]) -> Result<Self, VoxelError> {
        let mut reader = bytes;
        let mut columns = Vec::with_capacity(CHUNK_SIZE * CHUNK_SIZE);

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let column = VoxelColumn::deserialize_from(&mut reader, COLUMN_HEIGHT).map_err(
                    |e| match e {
                        VoxelError::CorruptData(reason) => {
                            VoxelError::CorruptData(format!("column ({x}, {z}): {reason}"))
                        }
                        other => other,
                    },
                )?;
                columns.push(column);
            }
        }

        if !reader.is_empty() {
            return Err(VoxelError::CorruptData(format!(
                "{} trailing bytes after the last column",
                reader.len()
            )));
        }

        Ok(Self { coords, columns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_type::BlockType;
    use crate::voxels::block::Block;
    use crate::voxels::column::column_serialization::RUN_BYTES;
    use cgmath::Point3;

    #[test]
    fn empty_chunk_is_one_run_per_column() {
        let chunk = ChunkBlockGrid::new(ChunkCoords::new(0, 0));
        let bytes = chunk.serialize();
        assert_eq!(bytes.len(), CHUNK_SIZE * CHUNK_SIZE * RUN_BYTES);
        assert_eq!(&bytes[..3], &[0, 0, 128]);
    }

    #[test]
    fn columns_are_written_x_major() {
        let mut chunk = ChunkBlockGrid::new(ChunkCoords::new(0, 0));
        chunk
            .set_block(Point3::new(0, 0, 1), Block::new(BlockType::Rock))
            .unwrap();

        let bytes = chunk.serialize();
        // column (0, 0) is untouched, column (0, 1) follows it
        assert_eq!(&bytes[3..9], &[0, 3, 1, 0, 0, 127]);

        let mut streamed = Vec::new();
        chunk.serialize_into(&mut streamed).unwrap();
        assert_eq!(streamed, bytes);
    }

    #[test]
    fn round_trip_preserves_blocks() {
        let coords = ChunkCoords::new(4, -2);
        let mut chunk = ChunkBlockGrid::new(coords);
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..500 {
            let local = Point3::new(rng.usize(0..CHUNK_SIZE), rng.usize(0..128), rng.usize(0..CHUNK_SIZE));
            let block_type = [BlockType::Air, BlockType::Sand, BlockType::Water][rng.usize(0..3)];
            chunk.set_block(local, Block::new(block_type)).unwrap();
        }

        let mut streamed = Vec::new();
        chunk.serialize_into(&mut streamed).unwrap();
        assert_eq!(streamed, chunk.serialize());

        let restored = ChunkBlockGrid::deserialize(coords, &streamed).unwrap();
        assert_eq!(restored, chunk);
    }

    #[test]
    fn trailing_bytes_are_corrupt() {
        let mut bytes = ChunkBlockGrid::new(ChunkCoords::new(0, 0)).serialize();
        bytes.push(0);
        assert!(matches!(
            ChunkBlockGrid::deserialize(ChunkCoords::new(0, 0), &bytes),
            Err(VoxelError::CorruptData(_))
        ));
    }

    #[test]
    fn truncated_chunk_is_corrupt() {
        let bytes = ChunkBlockGrid::new(ChunkCoords::new(0, 0)).serialize();
        let result = ChunkBlockGrid::deserialize(ChunkCoords::new(0, 0), &bytes[..bytes.len() - 3]);
        match result {
            Err(VoxelError::CorruptData(reason)) => assert!(reason.starts_with("column (31, 31)")),
            other => panic!("expected corrupt data, got {other:?}"),
        }
    }
}
