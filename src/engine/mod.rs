//! Session Logic
//!
//! Everything that mutates or derives from session state: the progress
//! engine, answer validation, split-digit input capture, the restore
//! resolver, and timing.

pub mod digits;
pub mod progress;
pub mod restore;
pub mod state;
pub mod timing;
pub mod validate;

pub use digits::{DigitGroupInput, SlotUpdate};
pub use progress::{EngineConfig, Progress, ProgressEngine, SessionSummary, SubmitOutcome};
pub use restore::{resolve, HintButton, RenderHints};
pub use state::SessionState;
pub use timing::{format_duration, PerformanceTier, TierThresholds};
