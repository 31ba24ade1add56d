//! Affine normalization of sample coordinate ranges.
//!
//! Each axis is remapped independently from its observed min/max to a
//! caller-specified target range. X/Y and Z are separate knobs: a fit can
//! rescale the probe plane without touching measured heights, or vice versa.
//! Transforms are value-producing; the input map is never mutated, so the
//! shell can report both original and normalized ranges.

use crate::error::{Error, Result};
use crate::gcode::Axis;
use crate::surface::{AxisRange, SurfaceMap, SurfacePoint};

/// A target range for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

/// One axis's affine remapping: `v' = v * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMap {
    scale: f64,
    offset: f64,
}

impl AffineMap {
    /// Derive the map taking `src.min..src.max` onto `dst.min..dst.max`.
    ///
    /// Fails with [`Error::DegenerateRange`] when the source range has zero
    /// width (the mapping would divide by zero).
    pub fn between(axis: Axis, src: AxisRange, dst: TargetRange) -> Result<Self> {
        if src.span() == 0.0 {
            return Err(Error::DegenerateRange { axis });
        }
        let scale = (dst.max - dst.min) / src.span();
        Ok(Self {
            scale,
            offset: dst.min - src.min * scale,
        })
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }
}

/// Remap X and Y onto their target ranges, leaving Z untouched.
pub fn normalize_xy(
    map: &SurfaceMap,
    x_target: TargetRange,
    y_target: TargetRange,
) -> Result<SurfaceMap> {
    let x_map = AffineMap::between(Axis::X, observed(map, Axis::X)?, x_target)?;
    let y_map = AffineMap::between(Axis::Y, observed(map, Axis::Y)?, y_target)?;
    Ok(transform(map, |p| SurfacePoint {
        x: x_map.apply(p.x),
        y: y_map.apply(p.y),
        z: p.z,
    }))
}

/// Remap Z onto its target range, leaving X and Y untouched.
pub fn normalize_z(map: &SurfaceMap, z_target: TargetRange) -> Result<SurfaceMap> {
    let z_map = AffineMap::between(Axis::Z, observed(map, Axis::Z)?, z_target)?;
    Ok(transform(map, |p| SurfacePoint {
        x: p.x,
        y: p.y,
        z: z_map.apply(p.z),
    }))
}

fn observed(map: &SurfaceMap, axis: Axis) -> Result<AxisRange> {
    let range = match axis {
        Axis::X => map.x_range(),
        Axis::Y => map.y_range(),
        Axis::Z => map.z_range(),
    };
    // an empty map has no observed range to normalize from
    range.ok_or(Error::EmptyInput)
}

fn transform(map: &SurfaceMap, f: impl Fn(&SurfacePoint) -> SurfacePoint) -> SurfaceMap {
    SurfaceMap::new(map.points().iter().map(f).collect())
}
