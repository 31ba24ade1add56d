//! GCode Surface Fit
//!
//! Corrects the Z heights of G-code motion commands so toolpaths follow a
//! physically measured surface instead of an idealized flat plane.
//!
//! This library provides:
//! - Surface map loading and spatial (nearest-neighbor) indexing
//! - Optional affine normalization of coordinate ranges
//! - Regular-grid resampling of the surface for visualization
//! - The line-oriented G-code correction state machine

pub mod cli;
pub mod config;
pub mod error;
pub mod gcode;
pub mod grid;
pub mod index;
pub mod normalize;
pub mod session;
pub mod surface;

// Re-exports for clean public API
pub use config::Config;
pub use error::{Error, Result};
pub use gcode::{Corrector, detect_depth};
pub use grid::Grid;
pub use index::{FittedSurface, KdTreeIndex, SpatialIndex};
pub use normalize::TargetRange;
pub use session::{Correction, Fit, FitOptions, Session};
pub use surface::{SurfaceMap, SurfacePoint};
