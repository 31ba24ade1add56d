//! Reference depth detection.

use crate::gcode::words::{AxisWord, extract_words};

/// Scan a whole program and return the reference depth.
///
/// The depth is the absolute value of the minimum Z coordinate word found
/// anywhere in the program. A program with no Z words has no correction
/// floor and yields 0.0.
pub fn detect_depth<S: AsRef<str>>(lines: &[S]) -> f64 {
    let mut min_z: Option<f64> = None;
    for line in lines {
        for word in extract_words(line.as_ref()) {
            if let AxisWord::Z(value) = word {
                min_z = Some(match min_z {
                    None => value,
                    Some(current) => current.min(value),
                });
            }
        }
    }
    min_z.map(f64::abs).unwrap_or(0.0)
}
