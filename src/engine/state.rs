//! Session State
//!
//! The mutable, persisted fields of one play session. Mutated exclusively
//! through [`crate::ProgressEngine`] operations; every field defaults to
//! its empty/zero value when absent from the store.
//!
//! Uses BTree collections for deterministic iteration and stable
//! serialization.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutable, persisted per-session state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current position in the clue sequence.
    /// Invariant: `current_index < sequence.len()`.
    pub current_index: usize,

    /// Clue key to the literal string the user submitted (the accepted
    /// one). Not re-validated on mutation, only on restore.
    pub saved_answers: BTreeMap<String, String>,

    /// Hint credits spent. Invariant: `hints_used <= max_hints`, and
    /// `hints_used == hints_shown.len()` after any valid operation
    /// sequence (the two change atomically).
    pub hints_used: u32,

    /// Clue keys whose hint has been revealed. Grows monotonically.
    pub hints_shown: BTreeSet<String>,

    /// Team / player identity, set once during registration.
    pub player_names: Vec<String>,

    /// When the session clock started. First call wins.
    pub started_at: Option<DateTime<Utc>>,

    /// When the terminal clue was first reached. Set at most once, only
    /// after `started_at`.
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// The saved answer for a clue key, if any.
    pub fn answer_for(&self, key: &str) -> Option<&str> {
        self.saved_answers.get(key).map(String::as_str)
    }

    /// Whether a hint has been revealed for this clue key.
    pub fn hint_shown(&self, key: &str) -> bool {
        self.hints_shown.contains(key)
    }
}

// =============================================================================
// TESTS
// =============================================================================
