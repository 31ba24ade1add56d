//! Coordinate word extraction.
//!
//! A coordinate word is an axis letter immediately followed by a signed
//! decimal literal (`X12.5`, `Y-3`, `Z.25`). No exponent notation, no
//! whitespace between letter and number. A bare axis letter is not a word.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Decimal literal: optional sign, then digits with optional fraction, or a
/// bare fraction with required digits.
const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)";

static AXIS_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"([XYZ])({NUMBER})")).expect("valid axis word pattern"));

static Z_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"Z{NUMBER}")).expect("valid Z word pattern"));

/// One of the three Cartesian axes handled by the corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// A coordinate word tagged by its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisWord {
    X(f64),
    Y(f64),
    Z(f64),
}

/// Extract every coordinate word on a line, in left-to-right order.
pub fn extract_words(line: &str) -> Vec<AxisWord> {
    AXIS_WORD_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let value: f64 = caps[2].parse().ok()?;
            let word = match &caps[1] {
                "X" => AxisWord::X(value),
                "Y" => AxisWord::Y(value),
                "Z" => AxisWord::Z(value),
                _ => unreachable!("pattern only matches X, Y, or Z"),
            };
            Some(word)
        })
        .collect()
}

/// True if the line carries at least one Z coordinate word.
pub fn has_z_word(line: &str) -> bool {
    Z_WORD_RE.is_match(line)
}

/// Replace the first Z coordinate word on the line with `replacement`.
///
/// The caller guarantees a Z word is present; if none is, the line is
/// returned unchanged.
pub fn replace_first_z(line: &str, replacement: &str) -> String {
    Z_WORD_RE.replace(line, replacement).into_owned()
}
