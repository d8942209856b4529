//! Static Clue Data
//!
//! Author-provided clue definitions and the ordered sequence they form.
//! Pure data, no behavior beyond construction-time invariant checks.

pub mod definition;
pub mod sequence;

pub use definition::{ClueDefinition, ClueKind, NumberFormat};
pub use sequence::{ClueSequence, SequenceError};
