//! The command-line shell around the core.
//!
//! File loading, fit/correct orchestration, and result reporting. All of
//! the actual computation lives in the library modules; this is wiring.

use std::fs;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::session::{AxisReport, Correction, Fit, Session};
use crate::surface::SurfaceMap;

/// Run the tool with configuration from the command line.
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();
    execute(&config)
}

fn execute(config: &Config) -> Result<()> {
    let mut session = Session::new();

    let map = SurfaceMap::load(&config.surface)
        .with_context(|| format!("Failed to load surface map {}", config.surface.display()))?;
    log::info!(
        "Loaded {} surface points from {}",
        map.len(),
        config.surface.display()
    );
    session.load_surface(map);

    if let Some(path) = &config.gcode {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to load G-code file {}", path.display()))?;
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        log::info!("Loaded {} G-code lines from {}", lines.len(), path.display());
        session.load_program(lines);
    }

    let fit = session.fit(&config.fit_options())?;
    report_fit(&fit);

    if let Some(path) = &config.grid_out {
        fs::write(path, fit.grid.to_csv())
            .with_context(|| format!("Failed to write grid {}", path.display()))?;
        log::info!(
            "Wrote {}x{} resampled grid to {}",
            fit.grid.size(),
            fit.grid.size(),
            path.display()
        );
    }

    if config.gcode.is_some() {
        let output = config
            .output
            .as_ref()
            .context("--output is required when correcting a G-code file")?;
        let correction = session.correct(&fit)?;
        write_correction(&correction, output)?;
    }

    Ok(())
}

fn report_fit(fit: &Fit) {
    log::info!("Spatial index built over {} samples", fit.report.samples);
    report_axis("X", &fit.report.x);
    report_axis("Y", &fit.report.y);
    report_axis("Z", &fit.report.z);
}

fn report_axis(name: &str, report: &AxisReport) {
    match report.normalized {
        Some(normalized) => log::info!(
            "{} range: ({:.4}, {:.4}) normalized to ({:.4}, {:.4})",
            name,
            report.original.min,
            report.original.max,
            normalized.min,
            normalized.max
        ),
        None => log::info!(
            "{} range: ({:.4}, {:.4})",
            name,
            report.original.min,
            report.original.max
        ),
    }
}

fn write_correction(correction: &Correction, path: &std::path::Path) -> Result<()> {
    fs::write(path, correction.lines.concat())
        .with_context(|| format!("Failed to write corrected G-code {}", path.display()))?;
    log::info!(
        "Corrected {} lines with depth {:.4}, saved to {}",
        correction.lines.len(),
        correction.depth,
        path.display()
    );
    Ok(())
}
