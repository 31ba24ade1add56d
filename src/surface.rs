//! Surface sample sets.
//!
//! A surface map is an ordered sequence of measured (x, y, z) points loaded
//! from a comma-delimited text file. Order is insertion order from the source
//! file and defines the positions the spatial index reports back.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// One measured surface sample: actual physical height z at (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Observed min/max of one axis over a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Width of the range. Zero for a degenerate (single-valued) axis.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// An ordered set of surface samples.
///
/// Duplicate points are legal; they only add ambiguity to nearest-neighbor
/// queries, resolved deterministically by the index's tie-break.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMap {
    points: Vec<SurfacePoint>,
}

impl SurfaceMap {
    pub fn new(points: Vec<SurfacePoint>) -> Self {
        Self { points }
    }

    /// Load a surface map from a comma-delimited text file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse `x,y,z` lines into a sample set.
    ///
    /// Blank lines are skipped; any other line that is not three
    /// comma-separated finite numbers is a [`Error::MalformedSample`] with
    /// its 1-based line number.
    pub fn parse(content: &str) -> Result<Self> {
        let mut points = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split(',').collect();
            if fields.len() != 3 {
                return Err(Error::MalformedSample {
                    line,
                    reason: format!("expected 3 comma-separated fields, found {}", fields.len()),
                });
            }

            let mut values = [0.0f64; 3];
            for (value, field) in values.iter_mut().zip(&fields) {
                *value = field.trim().parse().map_err(|_| Error::MalformedSample {
                    line,
                    reason: format!("'{}' is not a number", field.trim()),
                })?;
                if !value.is_finite() {
                    return Err(Error::MalformedSample {
                        line,
                        reason: format!("'{}' is not finite", field.trim()),
                    });
                }
            }

            points.push(SurfacePoint {
                x: values[0],
                y: values[1],
                z: values[2],
            });
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Z values in sample order, parallel to index positions.
    pub fn heights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.z).collect()
    }

    pub fn x_range(&self) -> Option<AxisRange> {
        observed_range(self.points.iter().map(|p| p.x))
    }

    pub fn y_range(&self) -> Option<AxisRange> {
        observed_range(self.points.iter().map(|p| p.y))
    }

    pub fn z_range(&self) -> Option<AxisRange> {
        observed_range(self.points.iter().map(|p| p.z))
    }
}

fn observed_range(values: impl Iterator<Item = f64>) -> Option<AxisRange> {
    let mut range: Option<AxisRange> = None;
    for v in values {
        range = Some(match range {
            None => AxisRange { min: v, max: v },
            Some(r) => AxisRange {
                min: r.min.min(v),
                max: r.max.max(v),
            },
        });
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_map() {
        let map = SurfaceMap::parse("0.0,0.0,10.0\n10.0,0.0,20.0\n0.0,10.0,30.0\n").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.points()[1], SurfacePoint { x: 10.0, y: 0.0, z: 20.0 });
        assert_eq!(map.heights(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let map = SurfaceMap::parse("1,2,3\n\n   \n4,5,6\n").unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = SurfaceMap::parse("1,2,3\n4,5\n").unwrap_err();
        match err {
            Error::MalformedSample { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let err = SurfaceMap::parse("1,two,3\n").unwrap_err();
        assert!(matches!(err, Error::MalformedSample { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_non_finite_field() {
        let err = SurfaceMap::parse("1,2,inf\n").unwrap_err();
        assert!(matches!(err, Error::MalformedSample { line: 1, .. }));
    }

    #[test]
    fn test_observed_ranges() {
        let map = SurfaceMap::parse("2,5,-1\n8,7,4\n5,6,0\n").unwrap();
        assert_eq!(map.x_range().unwrap(), AxisRange { min: 2.0, max: 8.0 });
        assert_eq!(map.y_range().unwrap(), AxisRange { min: 5.0, max: 7.0 });
        assert_eq!(map.z_range().unwrap(), AxisRange { min: -1.0, max: 4.0 });
        assert!(SurfaceMap::default().x_range().is_none());
    }
}
