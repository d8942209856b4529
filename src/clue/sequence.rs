//! Clue Sequence
//!
//! The ordered progression, validated at construction so every consumer
//! can rely on the data-model invariants without re-checking them.

use thiserror::Error;

use crate::clue::definition::{ClueDefinition, ClueKind, NumberFormat};

/// Invariant violations detected when building a [`ClueSequence`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// The sequence has no clues.
    #[error("clue sequence is empty")]
    Empty,

    /// A puzzle clue has no key.
    #[error("puzzle clue at index {index} has no key")]
    MissingKey {
        /// Position of the offending clue.
        index: usize,
    },

    /// A puzzle clue has an empty answer set.
    #[error("puzzle clue at index {index} has no accepted answers")]
    MissingAnswers {
        /// Position of the offending clue.
        index: usize,
    },

    /// A non-puzzle clue carries a key.
    #[error("non-puzzle clue at index {index} carries key `{key}`")]
    StrayKey {
        /// Position of the offending clue.
        index: usize,
        /// The unexpected key.
        key: String,
    },

    /// Two clues share a key.
    #[error("duplicate clue key `{key}`")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}

/// Ordered, immutable list of clue definitions.
///
/// Guaranteed non-empty, with unique keys and non-empty answer sets on
/// every puzzle clue.
#[derive(Clone, Debug, PartialEq)]
pub struct ClueSequence {
    clues: Vec<ClueDefinition>,
}

impl ClueSequence {
    /// Build a sequence, checking the data-model invariants.
    pub fn new(clues: Vec<ClueDefinition>) -> Result<Self, SequenceError> {
        if clues.is_empty() {
            return Err(SequenceError::Empty);
        }

        let mut seen_keys: Vec<&str> = Vec::new();
        for (index, clue) in clues.iter().enumerate() {
            if clue.kind.is_puzzle() {
                let key = match clue.key_str() {
                    Some(key) if !key.is_empty() => key,
                    _ => return Err(SequenceError::MissingKey { index }),
                };
                if clue.accepted_answers.is_empty() {
                    return Err(SequenceError::MissingAnswers { index });
                }
                if seen_keys.contains(&key) {
                    return Err(SequenceError::DuplicateKey {
                        key: key.to_string(),
                    });
                }
                seen_keys.push(key);
            } else if let Some(key) = clue.key_str() {
                return Err(SequenceError::StrayKey {
                    index,
                    key: key.to_string(),
                });
            }
        }

        Ok(Self { clues })
    }

    /// Number of clues.
    #[inline]
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    /// A valid sequence is never empty; provided for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    /// Index of the last clue.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.clues.len() - 1
    }

    /// Clue at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&ClueDefinition> {
        self.clues.get(index)
    }

    /// Clue at `index`, clamped into `[0, len - 1]`.
    ///
    /// Total by construction: a sequence always holds at least one clue.
    pub fn clamped(&self, index: usize) -> &ClueDefinition {
        &self.clues[index.min(self.last_index())]
    }

    /// Look up a puzzle clue by its key.
    pub fn clue_by_key(&self, key: &str) -> Option<&ClueDefinition> {
        self.clues.iter().find(|c| c.key_str() == Some(key))
    }

    /// Iterate over the clues in progression order.
    pub fn iter(&self) -> impl Iterator<Item = &ClueDefinition> {
        self.clues.iter()
    }

    /// The shipped office-mission trail.
    ///
    /// Reproduces the original hunt: opener, registration, briefing,
    /// three text puzzles, a split-digit vault code, and the summary.
    pub fn office_mission() -> Self {
        let clues = vec![
            ClueDefinition::screen(
                ClueKind::MissionStart,
                "The Last Office Mission",
                "Welcome to the ultimate challenge!",
            ),
            ClueDefinition::screen(
                ClueKind::Registration,
                "Team Registration",
                "Enter your team name to unlock the mission.",
            ),
            ClueDefinition::screen(
                ClueKind::Welcome,
                "Operation Last Call",
                "The message must be delivered, but the means to do so is \
                 missing. Locate the asset hidden on this office floor \
                 before time runs out.",
            ),
            ClueDefinition::text_puzzle(
                "puzzle-boost",
                "Every great mission starts with energy",
                "",
                &["222"],
            )
            .with_hint("Grab a cup? Stronger is better.")
            .with_placeholder("sequence that fuels this mission"),
            ClueDefinition::text_puzzle(
                "puzzle-sequence",
                "The Silent Force",
                "The transformation unit on this floor is no mere vehicle. \
                 It is the lifeblood of the messaging system.",
                &["apollo", "APOLLO"],
            )
            .with_hint("Find the rocket")
            .with_placeholder("the force that powers the system"),
            ClueDefinition::text_puzzle(
                "puzzle-frame",
                "Four Urban Dwellings",
                "I am neither alive nor do I speak, yet I reveal the truths \
                 you seek. Frozen in time, I hold the clue.",
                &["3222"],
            )
            .with_placeholder("type your answer"),
            ClueDefinition::number_puzzle(
                "puzzle-vault",
                "The Vault Code",
                "Six digits stand between you and the asset.",
                NumberFormat::SplitDigits { width: 6 },
                &["314159"],
            )
            .with_hint("Check the supply room door."),
            ClueDefinition::screen(
                ClueKind::Final,
                "Mission Accomplished",
                "You have unlocked the messaging system.",
            )
            .with_link("https://example.com/send-message"),
        ];

        match Self::new(clues) {
            Ok(sequence) => sequence,
            // Fixture data is statically valid.
            Err(err) => unreachable!("office mission fixture: {err}"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
