//! Timing
//!
//! Elapsed-time formatting and the coarse performance classification of
//! total solve time.

use chrono::Duration;
use serde::{Deserialize, Serialize};

// =============================================================================
// PERFORMANCE TIER
// =============================================================================

/// Upper bounds (in minutes, inclusive) for each tier, checked in
/// ascending order, first match wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierThresholds {
    /// Upper bound for [`PerformanceTier::Excellent`].
    pub excellent_minutes: f64,
    /// Upper bound for [`PerformanceTier::Good`].
    pub good_minutes: f64,
    /// Upper bound for [`PerformanceTier::Average`].
    pub average_minutes: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent_minutes: 5.0,
            good_minutes: 10.0,
            average_minutes: 15.0,
        }
    }
}

/// Coarse classification of total solve time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    /// Finished within the excellent bound.
    Excellent,
    /// Finished within the good bound.
    Good,
    /// Finished within the average bound.
    Average,
    /// Took longer than every bound.
    Explorer,
}

impl PerformanceTier {
    /// Classify an elapsed time in minutes.
    ///
    /// Bounds are inclusive: exactly 5 minutes is still excellent.
    pub fn classify(minutes: f64, thresholds: &TierThresholds) -> Self {
        if minutes <= thresholds.excellent_minutes {
            PerformanceTier::Excellent
        } else if minutes <= thresholds.good_minutes {
            PerformanceTier::Good
        } else if minutes <= thresholds.average_minutes {
            PerformanceTier::Average
        } else {
            PerformanceTier::Explorer
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "EXCELLENT",
            PerformanceTier::Good => "GOOD",
            PerformanceTier::Average => "AVERAGE",
            PerformanceTier::Explorer => "EXPLORER",
        }
    }

    /// Flavor message shown on the summary screen.
    pub fn message(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => {
                "Lightning fast! You're a true treasure hunting master!"
            }
            PerformanceTier::Good => "Well done! You solved the mysteries efficiently!",
            PerformanceTier::Average => {
                "Great job! You took your time to solve everything carefully!"
            }
            PerformanceTier::Explorer => {
                "Excellent! You thoroughly explored every clue and mystery!"
            }
        }
    }
}

// =============================================================================
// DURATION FORMATTING
// =============================================================================

/// Render a duration as `"Xh Ym Zs"`, omitting zero leading units.
///
/// Negative durations render as `"0s"`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

// =============================================================================
// TESTS
// =============================================================================
