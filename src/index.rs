//! Spatial indexing of surface samples.
//!
//! Nearest-neighbor lookup over the X/Y plane of a sample set. The concrete
//! structure sits behind the [`SpatialIndex`] trait so the corrector and the
//! grid resampler never depend on it directly.

use kiddo::SquaredEuclidean;

use crate::error::{Error, Result};
use crate::surface::SurfaceMap;

/// Result of a nearest-neighbor query: the sample's position in insertion
/// order and its Euclidean distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub position: usize,
    pub distance: f64,
}

/// Nearest-neighbor capability over a fixed set of (x, y) sample positions.
///
/// Implementations are immutable once built and may be shared read-only
/// across threads. Ties between exactly equidistant samples are broken by
/// the structure's internal traversal order: deterministic for identical
/// inputs, but no particular winner is guaranteed.
pub trait SpatialIndex {
    fn nearest(&self, x: f64, y: f64) -> Nearest;

    /// Number of indexed samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket size tuned for scattered probe grids in the hundreds-to-thousands
/// of points range.
type Tree = kiddo::float::kdtree::KdTree<f64, u32, 2, 32, u32>;

/// KD-tree over the X/Y coordinates of a sample set.
#[derive(Debug)]
pub struct KdTreeIndex {
    tree: Tree,
    len: usize,
}

impl KdTreeIndex {
    /// Build an index over every sample in the map.
    ///
    /// Fails with [`Error::EmptyInput`] for an empty map; everything else
    /// about a built index is infallible.
    pub fn build(map: &SurfaceMap) -> Result<Self> {
        if map.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut tree = Tree::new();
        for (position, point) in map.points().iter().enumerate() {
            tree.add(&[point.x, point.y], position as u32);
        }

        Ok(Self {
            tree,
            len: map.len(),
        })
    }
}

impl SpatialIndex for KdTreeIndex {
    fn nearest(&self, x: f64, y: f64) -> Nearest {
        let neighbour = self.tree.nearest_one::<SquaredEuclidean>(&[x, y]);
        Nearest {
            position: neighbour.item as usize,
            distance: neighbour.distance.sqrt(),
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// A built index paired with the Z values it was built from.
///
/// Index positions address `heights` directly, so `nearest_z` is the full
/// measured-surface lookup used by the corrector and the resampler.
#[derive(Debug)]
pub struct FittedSurface<I: SpatialIndex = KdTreeIndex> {
    index: I,
    heights: Vec<f64>,
}

impl FittedSurface<KdTreeIndex> {
    /// Index a sample set with the default KD-tree structure.
    pub fn fit(map: &SurfaceMap) -> Result<Self> {
        Ok(Self {
            index: KdTreeIndex::build(map)?,
            heights: map.heights(),
        })
    }
}

impl<I: SpatialIndex> FittedSurface<I> {
    pub fn with_index(index: I, heights: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), heights.len());
        Self { index, heights }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Measured Z of the sample nearest to (x, y).
    pub fn nearest_z(&self, x: f64, y: f64) -> f64 {
        self.heights[self.index.nearest(x, y).position]
    }
}
