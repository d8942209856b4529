//! Restore Resolver
//!
//! Pure function from persisted state to UI-facing render state, run on
//! every render pass. Because it reads only [`SessionState`] (never a
//! transient "just submitted" flag), a full reload mid-puzzle is
//! indistinguishable from the live post-submission state, and resolving
//! never re-fires side effects.

use crate::clue::definition::ClueDefinition;
use crate::engine::state::SessionState;
use crate::engine::validate;

/// State of the hint control for the current clue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintButton {
    /// The clue offers no hint; show nothing.
    Hidden,
    /// Hint available; shows the remaining credit count.
    Available {
        /// Hint credits left in the session budget.
        remaining: u32,
    },
    /// Hint already revealed for this clue; control disabled.
    Revealed,
    /// Budget exhausted and this hint never revealed; control disabled.
    Exhausted,
}

/// Derived render state for one clue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderHints {
    /// Value to pre-fill into the answer input.
    pub prefill: Option<String>,

    /// Whether the answer input (and submit control) is locked.
    pub locked: bool,

    /// Whether to show the success indicator.
    pub solved: bool,

    /// Whether the continue affordance is visible.
    pub show_continue: bool,

    /// Hint control state.
    pub hint_button: HintButton,

    /// Revealed hint text, only when the hint has been spent.
    pub hint_text: Option<String>,
}

/// Whether the saved answer for this clue still validates as correct.
///
/// Always re-derived from the saved value: a save that no longer
/// validates renders as editable again.
pub fn is_solved(clue: &ClueDefinition, session: &SessionState) -> bool {
    clue.key_str()
        .and_then(|key| session.answer_for(key))
        .is_some_and(|saved| validate::is_correct(clue, saved))
}

/// Recompute the UI-facing derived state for `clue` from persisted data.
pub fn resolve(clue: &ClueDefinition, session: &SessionState, max_hints: u32) -> RenderHints {
    let is_puzzle = clue.kind.is_puzzle();
    let saved = clue
        .key_str()
        .and_then(|key| session.answer_for(key))
        .map(str::to_string);
    let solved = is_puzzle && saved.as_deref().is_some_and(|s| validate::is_correct(clue, s));

    let hint_shown = clue.key_str().is_some_and(|key| session.hint_shown(key));
    let hint_button = match &clue.hint {
        None => HintButton::Hidden,
        Some(_) if hint_shown => HintButton::Revealed,
        Some(_) if session.hints_used < max_hints => HintButton::Available {
            remaining: max_hints - session.hints_used,
        },
        Some(_) => HintButton::Exhausted,
    };

    RenderHints {
        prefill: if is_puzzle { saved } else { None },
        locked: solved,
        solved,
        // Puzzles gate continuation on being solved; informational
        // screens always offer it.
        show_continue: if is_puzzle { solved } else { true },
        hint_button,
        hint_text: if hint_shown { clue.hint.clone() } else { None },
    }
}

// =============================================================================
// TESTS
// =============================================================================
