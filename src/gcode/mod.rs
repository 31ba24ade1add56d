//! G-code reading and rewriting.
//!
//! Line-oriented: coordinate word extraction, reference depth detection,
//! and the Z-correction state machine.

pub mod correct;
pub mod depth;
pub mod words;

pub use correct::{Corrector, CursorState};
pub use depth::detect_depth;
pub use words::{Axis, AxisWord, extract_words};
