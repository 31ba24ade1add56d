//! Normalized fits and grid resampling through the public API.

use gcode_surface_fit::normalize::TargetRange;
use gcode_surface_fit::{Error, FitOptions, Session, SurfaceMap};

fn session_with(points: &str) -> Session {
    let mut session = Session::new();
    session.load_surface(SurfaceMap::parse(points).expect("parse surface"));
    session
}

#[test]
fn test_grid_spans_observed_ranges_exactly() {
    let session = session_with("2,5,1\n8,9,2\n5,7,3\n");
    let fit = session
        .fit(&FitOptions {
            grid_size: 9,
            ..FitOptions::default()
        })
        .expect("fit");

    let grid = &fit.grid;
    let last = grid.size() - 1;
    assert_eq!(grid.x(0, 0), 2.0);
    assert_eq!(grid.x(0, last), 8.0);
    assert_eq!(grid.y(0, 0), 5.0);
    assert_eq!(grid.y(last, 0), 9.0);
}

#[test]
fn test_grid_size_validation_through_fit() {
    let session = session_with("0,0,1\n1,1,2\n");
    let err = session
        .fit(&FitOptions {
            grid_size: 1,
            ..FitOptions::default()
        })
        .expect_err("grid size 1 must fail");
    assert!(matches!(err, Error::InvalidGridSize { size: 1 }));
}

#[test]
fn test_normalized_fit_queries_in_target_space() {
    // Heights rise with x; after normalizing X/Y to the unit square the
    // corrector and grid must query in normalized coordinates.
    let session = session_with("2,2,0\n8,2,1\n2,8,2\n8,8,3\n");
    let fit = session
        .fit(&FitOptions {
            grid_size: 2,
            xy_targets: Some((
                TargetRange { min: 0.0, max: 1.0 },
                TargetRange { min: 0.0, max: 1.0 },
            )),
            z_target: None,
        })
        .expect("fit");

    assert_eq!(fit.grid.x(0, 1), 1.0);
    assert_eq!(fit.grid.z(0, 0), 0.0);
    assert_eq!(fit.grid.z(1, 1), 3.0);
    assert_eq!(fit.surface.nearest_z(0.9, 0.1), 1.0);
}

#[test]
fn test_z_normalization_rescales_heights_only() {
    let session = session_with("0,0,100\n10,10,200\n");
    let fit = session
        .fit(&FitOptions {
            grid_size: 2,
            xy_targets: None,
            z_target: Some(TargetRange { min: 0.0, max: 1.0 }),
        })
        .expect("fit");

    // X/Y untouched, Z rescaled
    assert_eq!(fit.grid.x(0, 1), 10.0);
    assert_eq!(fit.surface.nearest_z(0.0, 0.0), 0.0);
    assert_eq!(fit.surface.nearest_z(10.0, 10.0), 1.0);
    assert_eq!(
        fit.report.z.normalized.map(|r| (r.min, r.max)),
        Some((0.0, 1.0))
    );
}

#[test]
fn test_degenerate_axis_fails_the_fit() {
    // all samples share one y value
    let session = session_with("0,5,1\n10,5,2\n");
    let err = session
        .fit(&FitOptions {
            grid_size: 2,
            xy_targets: Some((
                TargetRange { min: 0.0, max: 1.0 },
                TargetRange { min: 0.0, max: 1.0 },
            )),
            z_target: None,
        })
        .expect_err("degenerate y range must fail");
    assert!(matches!(err, Error::DegenerateRange { .. }));
}
