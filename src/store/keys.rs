//! Persisted Key Space
//!
//! Flat namespace, one entry per session field.

/// Current clue index.
pub const PROGRESS: &str = "trail-progress";

/// Saved answers map (JSON object, clue key to submitted string).
pub const ANSWERS: &str = "trail-answers";

/// Hints-used count.
pub const HINTS_USED: &str = "trail-hints-used";

/// Hints-shown set (JSON array of clue keys).
pub const HINTS_SHOWN: &str = "trail-hints-shown";

/// Player names list (JSON array).
pub const PLAYER_NAMES: &str = "trail-player-names";

/// Session start timestamp (RFC 3339).
pub const START_TIME: &str = "trail-start-time";

/// Session completion timestamp (RFC 3339).
pub const COMPLETION_TIME: &str = "trail-completion-time";

/// Every persisted key, for reset.
pub const ALL: [&str; 7] = [
    PROGRESS,
    ANSWERS,
    HINTS_USED,
    HINTS_SHOWN,
    PLAYER_NAMES,
    START_TIME,
    COMPLETION_TIME,
];
