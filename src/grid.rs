//! Regular-grid resampling of a fitted surface.
//!
//! Produces a size × size Cartesian mesh over the sample set's bounding box
//! and fills each cell with the nearest sample's Z. The grid exists for
//! visualization and analysis by the shell; correction never touches it.

use crate::error::{Error, Result};
use crate::index::{FittedSurface, SpatialIndex};
use crate::surface::SurfaceMap;

pub const DEFAULT_GRID_SIZE: usize = 30;

/// A regular rectangular grid: three row-major size × size arrays.
///
/// Meshgrid convention: X varies along columns, Y along rows. Both axis
/// sequences are inclusive of their endpoints, which equal the sample set's
/// observed min and max exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Grid {
    /// Build the X/Y mesh over the map's bounding box, Z zero-filled.
    ///
    /// Fails with [`Error::InvalidGridSize`] when `size < 2` (a single row
    /// or column cannot carry both range endpoints) and
    /// [`Error::EmptyInput`] when the map has no points to bound.
    pub fn make(map: &SurfaceMap, size: usize) -> Result<Self> {
        if size < 2 {
            return Err(Error::InvalidGridSize { size });
        }
        let x_range = map.x_range().ok_or(Error::EmptyInput)?;
        let y_range = map.y_range().ok_or(Error::EmptyInput)?;

        let xs = linspace(x_range.min, x_range.max, size);
        let ys = linspace(y_range.min, y_range.max, size);

        let mut x = Vec::with_capacity(size * size);
        let mut y = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                x.push(xs[col]);
                y.push(ys[row]);
            }
        }

        Ok(Self {
            size,
            x,
            y,
            z: vec![0.0; size * size],
        })
    }

    /// Fill every cell's Z with the nearest sample height.
    ///
    /// Cost is O(size² · query). Cells are independent; the surface is
    /// read-only, so a host may shard rows across threads if it wants to.
    pub fn resample<I: SpatialIndex>(&mut self, surface: &FittedSurface<I>) {
        for cell in 0..self.x.len() {
            self.z[cell] = surface.nearest_z(self.x[cell], self.y[cell]);
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn x(&self, row: usize, col: usize) -> f64 {
        self.x[self.cell(row, col)]
    }

    pub fn y(&self, row: usize, col: usize) -> f64 {
        self.y[self.cell(row, col)]
    }

    pub fn z(&self, row: usize, col: usize) -> f64 {
        self.z[self.cell(row, col)]
    }

    fn cell(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    /// Render the grid as `x,y,z` CSV lines for external plotting tools.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for cell in 0..self.x.len() {
            out.push_str(&format!("{},{},{}\n", self.x[cell], self.y[cell], self.z[cell]));
        }
        out
    }
}

/// `n` evenly spaced values from `start` to `end`, endpoints exact.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / last;
            // lerp form keeps both endpoints exact
            start * (1.0 - t) + end * t
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> SurfaceMap {
        SurfaceMap::parse("0,0,10\n10,0,20\n0,10,30\n").unwrap()
    }

    #[test]
    fn test_grid_size_below_two_is_rejected() {
        let err = Grid::make(&map(), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidGridSize { size: 1 }));
        assert!(Grid::make(&map(), 2).is_ok());
    }

    #[test]
    fn test_grid_endpoints_match_observed_ranges() {
        let grid = Grid::make(&map(), 7).unwrap();
        let last = grid.size() - 1;
        assert_eq!(grid.x(0, 0), 0.0);
        assert_eq!(grid.x(0, last), 10.0);
        assert_eq!(grid.y(0, 0), 0.0);
        assert_eq!(grid.y(last, 0), 10.0);
    }

    #[test]
    fn test_meshgrid_orientation() {
        let grid = Grid::make(&map(), 3).unwrap();
        // X varies along columns, constant down rows
        assert_eq!(grid.x(0, 1), 5.0);
        assert_eq!(grid.x(2, 1), 5.0);
        // Y varies along rows, constant across columns
        assert_eq!(grid.y(1, 0), 5.0);
        assert_eq!(grid.y(1, 2), 5.0);
    }

    #[test]
    fn test_endpoint_exactness_with_uneven_span() {
        let map = SurfaceMap::parse("0.1,0.1,1\n0.3,0.3,2\n").unwrap();
        let grid = Grid::make(&map, 3).unwrap();
        // must be exactly the observed max, not 0.1 + 2 * 0.1
        assert_eq!(grid.x(0, 2), 0.3);
        assert_eq!(grid.y(2, 0), 0.3);
    }

    #[test]
    fn test_resample_fills_nearest_heights() {
        let map = map();
        let surface = FittedSurface::fit(&map).unwrap();
        let mut grid = Grid::make(&map, 3).unwrap();
        grid.resample(&surface);
        assert_eq!(grid.z(0, 0), 10.0); // at (0,0)
        assert_eq!(grid.z(0, 2), 20.0); // at (10,0)
        assert_eq!(grid.z(2, 0), 30.0); // at (0,10)
    }

    #[test]
    fn test_csv_has_one_line_per_cell() {
        let grid = Grid::make(&map(), 4).unwrap();
        assert_eq!(grid.to_csv().lines().count(), 16);
    }
}
