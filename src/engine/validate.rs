//! Answer Validation
//!
//! Pure checking of a raw submission against a clue's accepted answers.
//! Comparison policy differs by kind: text puzzles fold case, numeric
//! puzzles match the exact string (no numeric coercion, so "007" and "7"
//! stay distinct). Submissions are trimmed before any comparison.

use crate::clue::definition::{ClueDefinition, ClueKind};

/// Check a raw submission against a clue.
///
/// Total over all clue kinds: non-puzzle kinds accept nothing.
pub fn is_correct(clue: &ClueDefinition, submission: &str) -> bool {
    let submission = submission.trim();
    match clue.kind {
        ClueKind::TextPuzzle => {
            let folded = submission.to_lowercase();
            clue.accepted_answers
                .iter()
                .any(|accepted| accepted.to_lowercase() == folded)
        }
        ClueKind::NumberPuzzle(_) => clue
            .accepted_answers
            .iter()
            .any(|accepted| accepted == submission),
        ClueKind::MissionStart | ClueKind::Registration | ClueKind::Welcome | ClueKind::Final => {
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clue::definition::NumberFormat;

    fn apollo() -> ClueDefinition {
        ClueDefinition::text_puzzle("puzzle-sequence", "t", "c", &["apollo", "APOLLO"])
    }

    #[test]
    fn test_text_puzzle_case_insensitive() {
        let clue = apollo();
        assert!(is_correct(&clue, "Apollo"));
        assert!(is_correct(&clue, " apollo "));
        assert!(is_correct(&clue, "APOLLO"));
        assert!(!is_correct(&clue, "apolo"));
    }

    #[test]
    fn test_text_puzzle_trims_whitespace() {
        let clue = apollo();
        assert!(is_correct(&clue, "\tapollo\n"));
        assert!(!is_correct(&clue, "apo llo"));
    }

    #[test]
    fn test_number_puzzle_exact_match() {
        let clue = ClueDefinition::number_puzzle(
            "puzzle-code",
            "t",
            "c",
            NumberFormat::Single,
            &["7"],
        );
        assert!(is_correct(&clue, "7"));
        assert!(is_correct(&clue, " 7 "));
        // No numeric-value coercion.
        assert!(!is_correct(&clue, "007"));
        assert!(!is_correct(&clue, "7.0"));
    }

    #[test]
    fn test_number_puzzle_no_case_folding_needed() {
        let clue = ClueDefinition::number_puzzle(
            "puzzle-vault",
            "t",
            "c",
            NumberFormat::SplitDigits { width: 6 },
            &["314159"],
        );
        assert!(is_correct(&clue, "314159"));
        assert!(!is_correct(&clue, "314158"));
    }

    #[test]
    fn test_non_puzzle_accepts_nothing() {
        let clue = ClueDefinition::screen(ClueKind::Welcome, "t", "c");
        assert!(!is_correct(&clue, ""));
        assert!(!is_correct(&clue, "anything"));
    }
}
