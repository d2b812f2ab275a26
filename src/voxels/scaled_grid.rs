//! # Scaled Grid Module
//!
//! A fixed-bounds 2D field over world x/z coordinates, optionally down-sampled
//! by an integer stride. The chunk index keeps two of them as coarse height and
//! terrain overlays for ground that has no loaded chunk.
//!
//! Coordinates are translated to storage with `(coord - min) / scale`. Callers
//! must stay inside the declared bounds; use [`GridBounds::contains`] to check.

use num::Integer;
use serde::{Deserialize, Serialize};

/// The world rectangle `[min_x, max_x) × [min_z, max_z)` covered by a grid,
/// and its sampling stride.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Lowest covered world x.
    pub min_x: i32,
    /// First world x past the covered range.
    pub max_x: i32,
    /// Lowest covered world z.
    pub min_z: i32,
    /// First world z past the covered range.
    pub max_z: i32,
    /// Blocks per cell along each axis.
    pub scale: i32,
}

impl GridBounds {
    pub fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32, scale: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
            scale,
        }
    }

    pub fn x_extent(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn z_extent(&self) -> i32 {
        self.max_z - self.min_z
    }

    /// Number of stored cells along x: `ceil(x_extent / scale)`.
    pub fn width(&self) -> usize {
        Integer::div_ceil(&self.x_extent(), &self.scale).max(0) as usize
    }

    /// Number of stored cells along z: `ceil(z_extent / scale)`.
    pub fn depth(&self) -> usize {
        Integer::div_ceil(&self.z_extent(), &self.scale).max(0) as usize
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min_x && x < self.max_x && z >= self.min_z && z < self.max_z
    }

    /// The world coordinate of every stored cell's corner, z-major, stepping by `scale`.
    pub fn sample_points(&self) -> impl Iterator<Item = (i32, i32)> {
        let bounds = *self;
        let step = bounds.scale.max(1) as usize;
        (bounds.min_z..bounds.max_z)
            .step_by(step)
            .flat_map(move |z| (bounds.min_x..bounds.max_x).step_by(step).map(move |x| (x, z)))
    }

    /// Maps a world x into `[0, 1)` across the grid's extent.
    pub fn normalize_x(&self, x: i32) -> f64 {
        (x - self.min_x) as f64 / self.x_extent() as f64
    }

    /// Maps a world z into `[0, 1)` across the grid's extent.
    pub fn normalize_z(&self, z: i32) -> f64 {
        (z - self.min_z) as f64 / self.z_extent() as f64
    }

    /// Inverse of [`normalize_x`](Self::normalize_x), truncating toward the grid origin.
    pub fn denormalize_x(&self, x: f64) -> i32 {
        (x * self.x_extent() as f64) as i32 + self.min_x
    }

    /// Inverse of [`normalize_z`](Self::normalize_z), truncating toward the grid origin.
    pub fn denormalize_z(&self, z: f64) -> i32 {
        (z * self.z_extent() as f64) as i32 + self.min_z
    }
}

/// A down-sampled 2D field of `T` over [`GridBounds`].
///
/// # Examples
///
/// ```
/// use voxel_world::voxels::scaled_grid::{GridBounds, ScaledGrid2D};
///
/// let mut heights = ScaledGrid2D::<u8>::new(GridBounds::new(0, 64, 0, 64, 32));
/// heights.set(40, 10, 7);
///
/// // Every world coordinate in the same 32x32 cell reads the same value.
/// assert_eq!(heights.get(63, 0), 7);
/// assert_eq!(heights.get(0, 0), 0);
/// ```
///
/// Grids are only built through [`new`](ScaledGrid2D::new), so the storage
/// always matches the bounds. Only the bounds are serializable.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledGrid2D<T> {
    bounds: GridBounds,
    width: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> ScaledGrid2D<T> {
    /// Allocates a grid covering `bounds`, filled with `T::default()`.
    pub fn new(bounds: GridBounds) -> Self {
        let width = bounds.width();
        Self {
            bounds,
            width,
            cells: vec![T::default(); width * bounds.depth()],
        }
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    pub fn get(&self, x: i32, z: i32) -> T {
        self.cells[self.cell_index(x, z)]
    }

    pub fn set(&mut self, x: i32, z: i32, value: T) {
        let index = self.cell_index(x, z);
        self.cells[index] = value;
    }

    #[inline]
    fn cell_index(&self, x: i32, z: i32) -> usize {
        debug_assert!(self.bounds.contains(x, z), "({x}, {z}) outside {:?}", self.bounds);
        let column = ((x - self.bounds.min_x) / self.bounds.scale) as usize;
        let row = ((z - self.bounds.min_z) / self.bounds.scale) as usize;
        row * self.width + column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_from_loaded_bounds_addresses_every_sample() {
        let bounds: GridBounds = serde_json::from_str(
            r#"{ "min_x": -5, "max_x": 20, "min_z": 3, "max_z": 10, "scale": 4 }"#,
        )
        .unwrap();
        let mut grid = ScaledGrid2D::<u8>::new(bounds);

        for (i, (x, z)) in bounds.sample_points().enumerate() {
            grid.set(x, z, i as u8);
            assert_eq!(grid.get(x, z), i as u8);
        }
        assert_eq!(grid.get(19, 9), (bounds.width() * bounds.depth() - 1) as u8);
    }

    #[test]
    fn storage_size_rounds_up() {
        let bounds = GridBounds::new(0, 100, -10, 20, 32);
        assert_eq!(bounds.width(), 4);
        assert_eq!(bounds.depth(), 1);

        let unscaled = GridBounds::new(5, 9, 5, 6, 1);
        assert_eq!(unscaled.width(), 4);
        assert_eq!(unscaled.depth(), 1);
    }

    #[test]
    fn cells_are_shared_within_a_stride() {
        let mut grid = ScaledGrid2D::<u8>::new(GridBounds::new(-16, 16, -16, 16, 8));
        grid.set(-16, -16, 1);
        grid.set(15, 15, 2);

        assert_eq!(grid.get(-9, -9), 1);
        assert_eq!(grid.get(-8, -9), 0);
        assert_eq!(grid.get(8, 8), 2);
    }

    #[test]
    fn partial_last_cell_is_addressable() {
        let mut grid = ScaledGrid2D::<u8>::new(GridBounds::new(0, 10, 0, 10, 4));
        grid.set(9, 9, 5);
        assert_eq!(grid.get(8, 8), 5);
    }

    #[test]
    fn sample_points_walk_z_major_by_stride() {
        let bounds = GridBounds::new(0, 64, 0, 64, 32);
        let points: Vec<(i32, i32)> = bounds.sample_points().collect();
        assert_eq!(points, vec![(0, 0), (32, 0), (0, 32), (32, 32)]);
    }

    #[test]
    fn normalize_round_trips() {
        let bounds = GridBounds::new(100, 300, -50, 50, 10);
        assert_eq!(bounds.normalize_x(100), 0.0);
        assert_eq!(bounds.normalize_x(200), 0.5);
        assert_eq!(bounds.normalize_z(0), 0.5);
        for x in [100, 150, 199, 299] {
            assert_eq!(bounds.denormalize_x(bounds.normalize_x(x)), x);
        }
        for z in [-50, -1, 0, 49] {
            assert_eq!(bounds.denormalize_z(bounds.normalize_z(z)), z);
        }
    }

    #[test]
    fn contains_excludes_upper_bounds() {
        let bounds = GridBounds::new(0, 10, 0, 10, 1);
        assert!(bounds.contains(0, 9));
        assert!(!bounds.contains(10, 0));
        assert!(!bounds.contains(-1, 0));
    }
}
