//! Fit and correction orchestration.
//!
//! A [`Session`] holds whatever inputs the shell has loaded so far and
//! exposes the two operations the shell can request: fitting the surface
//! and correcting the program. Requesting either before its inputs are
//! loaded is a [`Error::MissingPrerequisite`]. Each operation takes
//! immutable inputs and returns new values; nothing reaches back into the
//! shell.

use crate::error::{Error, Result};
use crate::gcode::{Corrector, detect_depth};
use crate::grid::{DEFAULT_GRID_SIZE, Grid};
use crate::index::{FittedSurface, KdTreeIndex};
use crate::normalize::{TargetRange, normalize_xy, normalize_z};
use crate::surface::{AxisRange, SurfaceMap};

/// Knobs for one fit request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub grid_size: usize,
    /// Target ranges for X and Y, both or neither.
    pub xy_targets: Option<(TargetRange, TargetRange)>,
    /// Target range for Z, wired independently of X/Y.
    pub z_target: Option<TargetRange>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            xy_targets: None,
            z_target: None,
        }
    }
}

/// Observed range of one axis before and, when normalization ran, after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisReport {
    pub original: AxisRange,
    pub normalized: Option<AxisRange>,
}

/// What one fit saw: sample count and per-axis ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub samples: usize,
    pub x: AxisReport,
    pub y: AxisReport,
    pub z: AxisReport,
}

/// Result of a fit: the queryable surface, the resampled grid, and the
/// ranges report for the shell.
#[derive(Debug)]
pub struct Fit {
    pub surface: FittedSurface<KdTreeIndex>,
    pub grid: Grid,
    pub report: FitReport,
}

/// Result of a correction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub lines: Vec<String>,
    pub depth: f64,
}

/// The shell-facing state: inputs loaded so far.
#[derive(Debug, Default)]
pub struct Session {
    surface: Option<SurfaceMap>,
    program: Option<Vec<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_surface(&mut self, map: SurfaceMap) {
        self.surface = Some(map);
    }

    pub fn load_program(&mut self, lines: Vec<String>) {
        self.program = Some(lines);
    }

    pub fn surface(&self) -> Option<&SurfaceMap> {
        self.surface.as_ref()
    }

    pub fn program(&self) -> Option<&[String]> {
        self.program.as_deref()
    }

    /// Normalize (if requested), build the spatial index, and resample the
    /// visualization grid. The index is rebuilt from scratch on every fit.
    pub fn fit(&self, options: &FitOptions) -> Result<Fit> {
        let original = self.surface.as_ref().ok_or(Error::MissingPrerequisite {
            what: "no surface map loaded",
        })?;

        let original_x = original.x_range().ok_or(Error::EmptyInput)?;
        let original_y = original.y_range().ok_or(Error::EmptyInput)?;
        let original_z = original.z_range().ok_or(Error::EmptyInput)?;

        let mut working = original.clone();
        if let Some(z_target) = options.z_target {
            working = normalize_z(&working, z_target)?;
        }
        if let Some((x_target, y_target)) = options.xy_targets {
            working = normalize_xy(&working, x_target, y_target)?;
        }
        let xy_normalized = options.xy_targets.is_some();
        let z_normalized = options.z_target.is_some();

        let surface = FittedSurface::fit(&working)?;
        let mut grid = Grid::make(&working, options.grid_size)?;
        grid.resample(&surface);

        let report = FitReport {
            samples: working.len(),
            x: AxisReport {
                original: original_x,
                normalized: xy_normalized.then(|| working.x_range()).flatten(),
            },
            y: AxisReport {
                original: original_y,
                normalized: xy_normalized.then(|| working.y_range()).flatten(),
            },
            z: AxisReport {
                original: original_z,
                normalized: z_normalized.then(|| working.z_range()).flatten(),
            },
        };

        Ok(Fit {
            surface,
            grid,
            report,
        })
    }

    /// Detect the reference depth and run one correction pass against a
    /// previously computed fit.
    pub fn correct(&self, fit: &Fit) -> Result<Correction> {
        let program = self.program.as_ref().ok_or(Error::MissingPrerequisite {
            what: "no G-code program loaded",
        })?;

        let depth = detect_depth(program);
        let mut corrector = Corrector::new(&fit.surface, depth);
        Ok(Correction {
            lines: corrector.correct_program(program),
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.load_surface(SurfaceMap::parse("0,0,10\n10,0,20\n0,10,30\n").unwrap());
        session.load_program(vec!["G01 Z-2.5".to_string(), "G01 X1 Y1".to_string()]);
        session
    }

    #[test]
    fn test_fit_requires_surface() {
        let session = Session::new();
        let err = session.fit(&FitOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite { .. }));
    }

    #[test]
    fn test_correct_requires_program() {
        let mut session = Session::new();
        session.load_surface(SurfaceMap::parse("0,0,1\n1,1,2\n").unwrap());
        let fit = session.fit(&FitOptions::default()).unwrap();
        let err = session.correct(&fit).unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite { .. }));
    }

    #[test]
    fn test_fit_and_correct_round_trip() {
        let session = loaded_session();
        let fit = session.fit(&FitOptions::default()).unwrap();
        assert_eq!(fit.report.samples, 3);
        assert_eq!(fit.grid.size(), DEFAULT_GRID_SIZE);

        let correction = session.correct(&fit).unwrap();
        assert_eq!(correction.depth, 2.5);
        assert_eq!(correction.lines.len(), 2);
        // nearest to (1,1) is (0,0,10); 10 - 2.5
        assert_eq!(correction.lines[1], "G01 X1 Y1 Z7.5000\n");
    }

    #[test]
    fn test_fit_reports_normalized_ranges() {
        let session = loaded_session();
        let options = FitOptions {
            xy_targets: Some((
                TargetRange { min: 0.0, max: 1.0 },
                TargetRange { min: 0.0, max: 1.0 },
            )),
            ..FitOptions::default()
        };
        let fit = session.fit(&options).unwrap();
        assert_eq!(fit.report.x.original, AxisRange { min: 0.0, max: 10.0 });
        assert_eq!(
            fit.report.x.normalized,
            Some(AxisRange { min: 0.0, max: 1.0 })
        );
        // Z was not requested, so it is reported as untouched
        assert_eq!(fit.report.z.normalized, None);

        // original map in the session is untouched
        assert_eq!(
            session.surface().unwrap().x_range().unwrap(),
            AxisRange { min: 0.0, max: 10.0 }
        );
    }
}
