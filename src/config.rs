//! Configuration for the surface-fit tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML job files carrying the same knobs (CLI flags win)

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::grid::DEFAULT_GRID_SIZE;
use crate::normalize::TargetRange;
use crate::session::FitOptions;

/// Command-line arguments for the surface-fit tool
#[derive(Debug, Parser)]
#[command(name = "surface-fit")]
#[command(about = "Correct G-code Z heights against a measured surface map")]
#[command(version)]
pub struct Args {
    /// Surface map file: one `x,y,z` triple per line, comma-separated
    #[arg(long)]
    pub surface: PathBuf,

    /// G-code program to correct
    #[arg(long)]
    pub gcode: Option<PathBuf>,

    /// Destination for the corrected program
    #[arg(long, requires = "gcode")]
    pub output: Option<PathBuf>,

    /// Resampling grid dimension (grid is NxN)
    #[arg(long, help = "Grid dimension, at least 2")]
    pub grid_size: Option<usize>,

    /// Write the resampled grid as x,y,z CSV for external plotting
    #[arg(long)]
    pub grid_out: Option<PathBuf>,

    /// Normalize X coordinates into this target range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    pub x_range: Option<Vec<f64>>,

    /// Normalize Y coordinates into this target range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    pub y_range: Option<Vec<f64>>,

    /// Normalize Z heights into this target range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    pub z_range: Option<Vec<f64>>,

    /// TOML job file with the same knobs; explicit flags take precedence
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Log level for the tool
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// A min/max pair as it appears in job files.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
}

impl From<RangeSpec> for TargetRange {
    fn from(spec: RangeSpec) -> Self {
        TargetRange {
            min: spec.min,
            max: spec.max,
        }
    }
}

/// `[normalize]` section of a job file.
#[derive(Debug, Default, Deserialize)]
pub struct NormalizeSection {
    pub x: Option<RangeSpec>,
    pub y: Option<RangeSpec>,
    pub z: Option<RangeSpec>,
}

/// On-disk job file schema.
#[derive(Debug, Default, Deserialize)]
pub struct JobFile {
    pub grid_size: Option<usize>,
    #[serde(default)]
    pub normalize: NormalizeSection,
}

impl JobFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid job file")
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub surface: PathBuf,
    pub gcode: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub grid_out: Option<PathBuf>,
    pub grid_size: usize,
    pub xy_targets: Option<(TargetRange, TargetRange)>,
    pub z_target: Option<TargetRange>,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let job = match &args.job {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read job file {}", path.display()))?;
                JobFile::parse(&content)?
            }
            None => JobFile::default(),
        };

        let x_target = flag_range(&args.x_range).or(job.normalize.x);
        let y_target = flag_range(&args.y_range).or(job.normalize.y);
        let z_target = flag_range(&args.z_range).or(job.normalize.z);

        // X/Y normalization is an axis pair: all four bounds or none.
        let xy_targets = match (x_target, y_target) {
            (Some(x), Some(y)) => Some((x.into(), y.into())),
            (None, None) => None,
            _ => bail!("X/Y normalization needs both --x-range and --y-range"),
        };

        Ok(Config {
            surface: args.surface,
            gcode: args.gcode,
            output: args.output,
            grid_out: args.grid_out,
            grid_size: args.grid_size.or(job.grid_size).unwrap_or(DEFAULT_GRID_SIZE),
            xy_targets,
            z_target: z_target.map(Into::into),
            log_level: args.log_level,
        })
    }

    /// The fit knobs this configuration asks for.
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            grid_size: self.grid_size,
            xy_targets: self.xy_targets,
            z_target: self.z_target,
        }
    }
}

fn flag_range(bounds: &Option<Vec<f64>>) -> Option<RangeSpec> {
    bounds.as_ref().map(|b| RangeSpec {
        min: b[0],
        max: b[1],
    })
}
