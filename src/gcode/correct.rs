//! The G-code correction state machine.
//!
//! Processes a program line by line, tracking the last-seen X/Y position
//! across lines. Every `G01` line with a known position gets its Z word
//! rewritten to the measured surface height minus the reference depth; all
//! other lines pass through unchanged. One output line per input line,
//! always.

use crate::gcode::words::{AxisWord, extract_words, replace_first_z};
use crate::index::{FittedSurface, SpatialIndex};

/// The corrector's running memory: the most recent X and Y word values,
/// unset until first seen. No history beyond the latest value per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// One correction pass over a program.
///
/// Line processing is inherently sequential (the cursor carries forward),
/// so a corrector is single-owner and never shared across passes.
pub struct Corrector<'a, I: SpatialIndex> {
    surface: &'a FittedSurface<I>,
    depth: f64,
    cursor: CursorState,
}

impl<'a, I: SpatialIndex> Corrector<'a, I> {
    pub fn new(surface: &'a FittedSurface<I>, depth: f64) -> Self {
        Self {
            surface,
            depth,
            cursor: CursorState::default(),
        }
    }

    /// Correct a whole program, resetting the cursor first.
    ///
    /// The output has exactly one newline-terminated line per input line,
    /// in the same order.
    pub fn correct_program<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<String> {
        self.cursor = CursorState::default();
        lines
            .iter()
            .map(|line| self.correct_line(line.as_ref()))
            .collect()
    }

    /// Correct a single line, updating the cursor from its X/Y words.
    pub fn correct_line(&mut self, line: &str) -> String {
        let stripped = line.trim_end();

        // Scan every coordinate word left to right. Later words for the
        // same axis win. Z words are only noted for presence; their values
        // are about to be replaced anyway.
        let mut has_z = false;
        for word in extract_words(stripped) {
            match word {
                AxisWord::X(value) => self.cursor.x = Some(value),
                AxisWord::Y(value) => self.cursor.y = Some(value),
                AxisWord::Z(_) => has_z = true,
            }
        }

        let qualifies = stripped.starts_with("G01");
        let corrected = match (qualifies, self.cursor.x, self.cursor.y) {
            (true, Some(x), Some(y)) => {
                let corrected_z = self.surface.nearest_z(x, y) - self.depth;
                let z_word = format!("Z{corrected_z:.4}");
                if has_z {
                    replace_first_z(stripped, &z_word)
                } else {
                    format!("{stripped} {z_word}")
                }
            }
            // A G01 before any positioning word is a defined no-op,
            // not an error.
            _ => stripped.to_string(),
        };

        format!("{corrected}\n")
    }
}
