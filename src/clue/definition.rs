//! Clue Definitions
//!
//! One immutable, author-provided step in the trail: what kind of screen
//! it renders as, how it is completed, and which answers unlock it.

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUE KIND
// =============================================================================

/// Input layout for a number puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    /// One free-form numeric entry field.
    Single,
    /// Fixed number of separate single-digit fields, validated only once
    /// every field is populated.
    SplitDigits {
        /// Number of digit fields.
        width: usize,
    },
}

/// Closed set of clue types.
///
/// Validation and restore both match on this exhaustively, so adding a
/// kind is a compile-time-checked change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClueKind {
    /// Opening title screen.
    MissionStart,
    /// Collects the team / player names.
    Registration,
    /// Informational screen with a continue action.
    Welcome,
    /// Free-text puzzle. Answers compare case-insensitively.
    TextPuzzle,
    /// Numeric-code puzzle. Answers compare as exact strings, no numeric
    /// coercion: "007" and "7" are distinct.
    NumberPuzzle(NumberFormat),
    /// Terminal summary screen. Retreat is disallowed once reached.
    Final,
}

impl ClueKind {
    /// Whether this kind requires a correct submission to be solved.
    #[inline]
    pub fn is_puzzle(&self) -> bool {
        matches!(self, ClueKind::TextPuzzle | ClueKind::NumberPuzzle(_))
    }
}

// =============================================================================
// CLUE DEFINITION
// =============================================================================

/// One step in the ordered clue progression.
///
/// Position in the owning [`crate::ClueSequence`] is the canonical
/// progression order; definitions carry no index of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClueDefinition {
    /// What kind of screen this clue renders as.
    pub kind: ClueKind,

    /// Stable identifier used to index saved answers and hint state.
    /// Present on puzzle kinds, absent otherwise.
    pub key: Option<String>,

    /// Display title.
    pub title: String,

    /// Display body text.
    pub content: String,

    /// Accepted answers. Non-empty for puzzle kinds, empty otherwise.
    pub accepted_answers: Vec<String>,

    /// Optional hint text. Presence determines whether hint UI is offered.
    pub hint: Option<String>,

    /// Placeholder text for the answer input.
    pub input_placeholder: Option<String>,

    /// Optional external link shown on the final screen.
    pub link_url: Option<String>,
}

impl ClueDefinition {
    /// Create a non-puzzle screen (no key, no answers).
    pub fn screen(kind: ClueKind, title: &str, content: &str) -> Self {
        Self {
            kind,
            key: None,
            title: title.to_string(),
            content: content.to_string(),
            accepted_answers: Vec::new(),
            hint: None,
            input_placeholder: None,
            link_url: None,
        }
    }

    /// Create a free-text puzzle.
    pub fn text_puzzle(key: &str, title: &str, content: &str, answers: &[&str]) -> Self {
        Self {
            kind: ClueKind::TextPuzzle,
            key: Some(key.to_string()),
            title: title.to_string(),
            content: content.to_string(),
            accepted_answers: answers.iter().map(|a| a.to_string()).collect(),
            hint: None,
            input_placeholder: None,
            link_url: None,
        }
    }

    /// Create a numeric-code puzzle.
    pub fn number_puzzle(
        key: &str,
        title: &str,
        content: &str,
        format: NumberFormat,
        answers: &[&str],
    ) -> Self {
        Self {
            kind: ClueKind::NumberPuzzle(format),
            key: Some(key.to_string()),
            title: title.to_string(),
            content: content.to_string(),
            accepted_answers: answers.iter().map(|a| a.to_string()).collect(),
            hint: None,
            input_placeholder: None,
            link_url: None,
        }
    }

    /// Attach a hint.
    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// Attach an input placeholder.
    pub fn with_placeholder(mut self, text: &str) -> Self {
        self.input_placeholder = Some(text.to_string());
        self
    }

    /// Attach an external link.
    pub fn with_link(mut self, url: &str) -> Self {
        self.link_url = Some(url.to_string());
        self
    }

    /// The clue key as a borrowed str, if any.
    #[inline]
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
