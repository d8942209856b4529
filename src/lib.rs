//! # Clue Trail Engine
//!
//! Persisted clue-progression engine for a linear, multi-step puzzle hunt.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CLUE TRAIL                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  clue/           - Static data model (immutable)             │
//! │  ├── definition.rs - Clue kinds, answers, hints, formats     │
//! │  └── sequence.rs   - Ordered, invariant-checked sequence     │
//! │                                                              │
//! │  engine/         - Session logic (mutable state)             │
//! │  ├── state.rs    - Persisted session fields                  │
//! │  ├── progress.rs - Transitions, hints, clock, submission     │
//! │  ├── validate.rs - Answer checking rules                     │
//! │  ├── digits.rs   - Split-digit input capture                 │
//! │  ├── restore.rs  - Persisted state -> render state           │
//! │  └── timing.rs   - Elapsed time and performance tiers        │
//! │                                                              │
//! │  store/          - Persistence (abstract key-value)          │
//! │  ├── memory.rs   - In-memory store for tests                 │
//! │  ├── file.rs     - JSON-file-backed store                    │
//! │  └── codec.rs    - Field codecs, recover-to-default          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Restore Guarantee
//!
//! Every piece of UI-facing state is **re-derived from persisted data** on
//! each render pass, never cached from a transient "just submitted" flag:
//! - Solved/locked/continue state comes from re-validating saved answers
//! - Hint visibility comes solely from the persisted hints-shown set
//! - Reloading mid-puzzle reproduces the exact pre-reload render state
//!   without re-spending hint credits or re-firing side effects

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod clue;
pub mod engine;
pub mod store;

// Re-export commonly used types
pub use clue::definition::{ClueDefinition, ClueKind, NumberFormat};
pub use clue::sequence::{ClueSequence, SequenceError};
pub use engine::digits::{DigitGroupInput, SlotUpdate};
pub use engine::progress::{EngineConfig, Progress, ProgressEngine, SessionSummary, SubmitOutcome};
pub use engine::restore::{resolve, HintButton, RenderHints};
pub use engine::state::SessionState;
pub use engine::timing::{format_duration, PerformanceTier, TierThresholds};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed budget of hint reveals per session.
pub const MAX_HINTS: u32 = 3;
