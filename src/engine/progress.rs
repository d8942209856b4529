//! Progress Engine
//!
//! Owns the session state and the clue sequence, and exposes every
//! transition, validation, and persistence operation. All operations are
//! total: "failure" is a returned outcome or a no-op, never a panic or an
//! error, so a user-action handler can never be interrupted mid-mutation.
//!
//! Each mutation updates memory and persists the affected field within
//! the same call. A store write failure is logged and the in-memory
//! state stays authoritative for the rest of the session.

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::clue::definition::{ClueDefinition, ClueKind};
use crate::clue::sequence::ClueSequence;
use crate::engine::digits::DigitGroupInput;
use crate::engine::restore::{self, RenderHints};
use crate::engine::state::SessionState;
use crate::engine::timing::{self, PerformanceTier, TierThresholds};
use crate::engine::validate;
use crate::store::{codec, keys, KeyValueStore};
use crate::MAX_HINTS;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tunables for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Hint credits per session.
    pub max_hints: u32,
    /// Performance tier bounds.
    pub tiers: TierThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_hints: MAX_HINTS,
            tiers: TierThresholds::default(),
        }
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Result of handling an answer submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct: answer recorded, inputs lock, continue appears.
    Correct,
    /// Incorrect: no state change; UI shows transient negative feedback.
    Incorrect,
    /// Digit group not fully populated; no validation attempted.
    Incomplete,
    /// The puzzle is already solved and locked; submission ignored.
    AlreadySolved,
    /// No puzzle clue with this key exists in the sequence.
    NotAPuzzle,
}

/// One-based position indicator for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Current step, starting at 1.
    pub step: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Final-screen summary data.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    /// Registered team / player names.
    pub player_names: Vec<String>,
    /// Total elapsed time, if the clock ever started.
    pub duration: Option<Duration>,
    /// Elapsed time rendered as `"Xh Ym Zs"`.
    pub duration_text: Option<String>,
    /// Performance classification of the elapsed time.
    pub tier: Option<PerformanceTier>,
    /// Hint credits spent.
    pub hints_used: u32,
}

// =============================================================================
// PROGRESS ENGINE
// =============================================================================

/// The session controller: immutable clue sequence, mutable session
/// state, and the store the state persists through.
///
/// One value owns the whole session; the renderer holds a reference and
/// reads derived state, never mutating fields directly.
#[derive(Debug)]
pub struct ProgressEngine<S: KeyValueStore> {
    sequence: ClueSequence,
    state: SessionState,
    store: S,
    config: EngineConfig,
}

impl<S: KeyValueStore> ProgressEngine<S> {
    /// Load a session from `store` with default configuration.
    ///
    /// Every absent field defaults to its empty/zero value; malformed
    /// fields recover to the same defaults.
    pub fn load(sequence: ClueSequence, store: S) -> Self {
        Self::load_with_config(sequence, store, EngineConfig::default())
    }

    /// Load a session from `store` with explicit configuration.
    pub fn load_with_config(sequence: ClueSequence, store: S, config: EngineConfig) -> Self {
        let raw_index = codec::decode_index(store.get(keys::PROGRESS));
        let current_index = raw_index.min(sequence.last_index());
        if current_index != raw_index {
            warn!(raw_index, current_index, "stored index out of range, clamped");
        }

        let raw_hints = codec::decode_count(store.get(keys::HINTS_USED));
        let hints_used = raw_hints.min(config.max_hints);
        if hints_used != raw_hints {
            warn!(raw_hints, hints_used, "stored hint count over budget, clamped");
        }

        let started_at = codec::decode_timestamp(store.get(keys::START_TIME));
        let mut completed_at = codec::decode_timestamp(store.get(keys::COMPLETION_TIME));
        if completed_at.is_some() && started_at.is_none() {
            warn!("completion time without start time, treating as unset");
            completed_at = None;
        }

        let state = SessionState {
            current_index,
            saved_answers: codec::decode_map(store.get(keys::ANSWERS)),
            hints_used,
            hints_shown: codec::decode_set(store.get(keys::HINTS_SHOWN)),
            player_names: codec::decode_list(store.get(keys::PLAYER_NAMES)),
            started_at,
            completed_at,
        };

        debug!(
            index = state.current_index,
            answers = state.saved_answers.len(),
            hints = state.hints_used,
            "session loaded"
        );

        Self {
            sequence,
            state,
            store,
            config,
        }
    }

    /// The persisted session state (read-only).
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The clue sequence this session runs over.
    pub fn sequence(&self) -> &ClueSequence {
        &self.sequence
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// The clue at the current position.
    ///
    /// Total: an externally violated index invariant clamps into range.
    pub fn current_clue(&self) -> &ClueDefinition {
        self.sequence.clamped(self.state.current_index)
    }

    /// Whether a next clue exists.
    pub fn can_advance(&self) -> bool {
        self.state.current_index < self.sequence.last_index()
    }

    /// Whether stepping back is allowed.
    ///
    /// The terminal screen is a one-way gate: no retreat once reached.
    pub fn can_retreat(&self) -> bool {
        self.state.current_index > 0 && self.current_clue().kind != ClueKind::Final
    }

    /// Step to the next clue. No-op at the end of the sequence.
    pub fn advance(&mut self) {
        if !self.can_advance() {
            return;
        }
        self.state.current_index += 1;
        self.persist_index();
        info!(index = self.state.current_index, "advanced");
    }

    /// Step to the previous clue. No-op at the start or on the terminal
    /// screen.
    pub fn retreat(&mut self) {
        if !self.can_retreat() {
            return;
        }
        self.state.current_index -= 1;
        self.persist_index();
        info!(index = self.state.current_index, "retreated");
    }

    /// Step-X-of-N data for the renderer.
    pub fn progress(&self) -> Progress {
        Progress {
            step: self.state.current_index + 1,
            total: self.sequence.len(),
        }
    }

    // =========================================================================
    // Answers
    // =========================================================================

    /// Store `value` under `key` unconditionally and persist the map.
    ///
    /// A pure store: correctness checking is the submission handler's
    /// responsibility.
    pub fn record_answer(&mut self, key: &str, value: &str) {
        self.state
            .saved_answers
            .insert(key.to_string(), value.to_string());
        let encoded = codec::encode_map(&self.state.saved_answers);
        self.persist(keys::ANSWERS, &encoded);
        debug!(key, "answer recorded");
    }

    /// Handle an answer submission for the puzzle clue under `key`.
    ///
    /// Trims the submission, validates it under the clue's comparison
    /// policy, and on success records it. Never mutates state on failure.
    pub fn submit_answer(&mut self, key: &str, raw: &str) -> SubmitOutcome {
        let submission = raw.trim().to_string();

        let outcome = match self.sequence.clue_by_key(key) {
            Some(clue) if clue.kind.is_puzzle() => {
                if restore::is_solved(clue, &self.state) {
                    SubmitOutcome::AlreadySolved
                } else if validate::is_correct(clue, &submission) {
                    SubmitOutcome::Correct
                } else {
                    SubmitOutcome::Incorrect
                }
            }
            _ => SubmitOutcome::NotAPuzzle,
        };

        match outcome {
            SubmitOutcome::Correct => {
                self.record_answer(key, &submission);
                info!(key, "answer accepted");
            }
            SubmitOutcome::Incorrect => debug!(key, "answer rejected"),
            _ => {}
        }
        outcome
    }

    /// Handle a split-digit submission.
    ///
    /// Validation is attempted only once every digit slot is populated.
    pub fn submit_digits(&mut self, key: &str, digits: &DigitGroupInput) -> SubmitOutcome {
        match digits.assembled() {
            Some(code) => self.submit_answer(key, &code),
            None => SubmitOutcome::Incomplete,
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Replace the registered player names and persist. Last write wins.
    pub fn set_player_names(&mut self, names: Vec<String>) {
        self.state.player_names = names;
        let encoded = codec::encode_list(&self.state.player_names);
        self.persist(keys::PLAYER_NAMES, &encoded);
        info!(count = self.state.player_names.len(), "player names saved");
    }

    /// Handle the registration form: trims the name, rejects an empty
    /// result with no state change.
    pub fn register_team_name(&mut self, raw: &str) -> bool {
        let name = raw.trim();
        if name.is_empty() {
            debug!("empty team name rejected");
            return false;
        }
        self.set_player_names(vec![name.to_string()]);
        true
    }

    // =========================================================================
    // Hints
    // =========================================================================

    /// Spend a hint credit on the clue under `key`.
    ///
    /// Succeeds only if budget remains **and** this clue's hint is not
    /// already shown; re-requesting a shown hint never consumes a second
    /// credit. Count and shown-set change atomically within this call.
    pub fn use_hint(&mut self, key: &str) -> bool {
        if self.state.hints_shown.contains(key) {
            return false;
        }
        if self.state.hints_used >= self.config.max_hints {
            return false;
        }

        self.state.hints_used += 1;
        self.state.hints_shown.insert(key.to_string());
        let count = self.state.hints_used.to_string();
        let shown = codec::encode_set(&self.state.hints_shown);
        self.persist(keys::HINTS_USED, &count);
        self.persist(keys::HINTS_SHOWN, &shown);
        info!(key, used = self.state.hints_used, "hint revealed");
        true
    }

    /// Whether the hint for `key` has been revealed.
    pub fn is_hint_shown(&self, key: &str) -> bool {
        self.state.hint_shown(key)
    }

    /// Hint credits left.
    pub fn hints_remaining(&self) -> u32 {
        self.config.max_hints.saturating_sub(self.state.hints_used)
    }

    /// Whether any hint credit remains.
    pub fn can_use_hint(&self) -> bool {
        self.state.hints_used < self.config.max_hints
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Start the session clock. First call wins; later calls are no-ops.
    pub fn start_clock(&mut self) {
        if self.state.started_at.is_some() {
            return;
        }
        let now = Utc::now();
        self.state.started_at = Some(now);
        self.persist(keys::START_TIME, &codec::encode_timestamp(now));
        info!("clock started");
    }

    /// Record completion. No-op unless the clock started and completion
    /// is not yet set.
    pub fn complete_clock(&mut self) {
        if self.state.started_at.is_none() || self.state.completed_at.is_some() {
            return;
        }
        let now = Utc::now();
        self.state.completed_at = Some(now);
        self.persist(keys::COMPLETION_TIME, &codec::encode_timestamp(now));
        info!("completed");
    }

    /// Elapsed play time: `None` before the clock starts; once completed,
    /// frozen at the completion instant.
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.state.started_at?;
        let end = self.state.completed_at.unwrap_or_else(Utc::now);
        Some(end - started)
    }

    /// Classify an elapsed time in minutes against the configured bounds.
    pub fn performance_tier(&self, minutes: f64) -> PerformanceTier {
        PerformanceTier::classify(minutes, &self.config.tiers)
    }

    /// Final-screen summary of the session.
    pub fn summary(&self) -> SessionSummary {
        let duration = self.elapsed();
        SessionSummary {
            player_names: self.state.player_names.clone(),
            duration_text: duration.map(timing::format_duration),
            tier: duration
                .map(|d| self.performance_tier(d.num_seconds() as f64 / 60.0)),
            hints_used: self.state.hints_used,
            duration,
        }
    }

    // =========================================================================
    // Derived render state
    // =========================================================================

    /// Render hints for the current clue, re-derived from persisted state.
    pub fn render_hints(&self) -> RenderHints {
        restore::resolve(self.current_clue(), &self.state, self.config.max_hints)
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Clear every persisted field and re-default the in-memory state,
    /// equivalent to a fresh, never-played session.
    pub fn reset(&mut self) {
        for key in keys::ALL {
            if let Err(err) = self.store.remove(key) {
                warn!(key, %err, "failed to clear persisted field");
            }
        }
        self.state = SessionState::default();
        info!("session reset");
    }

    // =========================================================================
    // Persistence helpers
    // =========================================================================

    fn persist_index(&mut self) {
        let value = self.state.current_index.to_string();
        self.persist(keys::PROGRESS, &value);
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, %err, "failed to persist field, in-memory state stands");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clue::definition::{ClueDefinition, NumberFormat};
    use crate::store::MemoryStore;
    use proptest::prelude::*;

    fn engine() -> ProgressEngine<MemoryStore> {
        ProgressEngine::load(ClueSequence::office_mission(), MemoryStore::new())
    }

    fn advance_to_final(engine: &mut ProgressEngine<MemoryStore>) {
        while engine.can_advance() {
            engine.advance();
        }
    }

    #[test]
    fn test_advance_retreat_bounds() {
        let mut engine = engine();
        assert!(!engine.can_retreat());

        // Retreat at the start is a no-op.
        engine.retreat();
        assert_eq!(engine.state().current_index, 0);

        engine.advance();
        assert_eq!(engine.state().current_index, 1);
        assert!(engine.can_retreat());

        engine.retreat();
        assert_eq!(engine.state().current_index, 0);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut engine = engine();
        advance_to_final(&mut engine);
        let last = engine.state().current_index;

        engine.advance();
        assert_eq!(engine.state().current_index, last);
    }

    #[test]
    fn test_no_retreat_from_final_screen() {
        let mut engine = engine();
        advance_to_final(&mut engine);
        assert_eq!(engine.current_clue().kind, ClueKind::Final);

        assert!(!engine.can_retreat());
        engine.retreat();
        assert_eq!(engine.current_clue().kind, ClueKind::Final);
    }

    #[test]
    fn test_retreat_allowed_everywhere_else() {
        let mut engine = engine();
        let last = engine.sequence().last_index();
        for index in 1..last {
            engine.advance();
            assert_eq!(engine.state().current_index, index);
            assert!(engine.can_retreat(), "index {index} should allow retreat");
        }
    }

    #[test]
    fn test_index_persists_across_reload() {
        let mut engine = engine();
        engine.advance();
        engine.advance();

        let store = engine.store.clone();
        let reloaded = ProgressEngine::load(ClueSequence::office_mission(), store);
        assert_eq!(reloaded.state().current_index, 2);
    }

    #[test]
    fn test_submit_text_answer_flow() {
        let mut engine = engine();

        assert_eq!(
            engine.submit_answer("puzzle-sequence", "apolo"),
            SubmitOutcome::Incorrect
        );
        assert!(engine.state().saved_answers.is_empty());

        assert_eq!(
            engine.submit_answer("puzzle-sequence", " Apollo "),
            SubmitOutcome::Correct
        );
        assert_eq!(engine.state().answer_for("puzzle-sequence"), Some("Apollo"));

        // Locked after success.
        assert_eq!(
            engine.submit_answer("puzzle-sequence", "apollo"),
            SubmitOutcome::AlreadySolved
        );
    }

    #[test]
    fn test_submit_unknown_key() {
        let mut engine = engine();
        assert_eq!(
            engine.submit_answer("no-such-puzzle", "x"),
            SubmitOutcome::NotAPuzzle
        );
    }

    #[test]
    fn test_submit_digits_requires_full_group() {
        let mut engine = engine();
        let mut digits = DigitGroupInput::new(6);

        for (i, d) in ["3", "1", "4", "1", "5"].iter().enumerate() {
            digits.set_digit(i, d);
            assert_eq!(
                engine.submit_digits("puzzle-vault", &digits),
                SubmitOutcome::Incomplete
            );
        }

        // Wrong full code fails without locking.
        digits.set_digit(5, "8");
        assert_eq!(
            engine.submit_digits("puzzle-vault", &digits),
            SubmitOutcome::Incorrect
        );
        assert!(engine.state().answer_for("puzzle-vault").is_none());

        digits.set_digit(5, "9");
        assert_eq!(
            engine.submit_digits("puzzle-vault", &digits),
            SubmitOutcome::Correct
        );
        assert_eq!(engine.state().answer_for("puzzle-vault"), Some("314159"));
    }

    #[test]
    fn test_hint_double_request_charges_once() {
        let mut engine = engine();
        assert!(engine.use_hint("puzzle-boost"));
        assert_eq!(engine.state().hints_used, 1);

        // Same key again: no second credit.
        assert!(!engine.use_hint("puzzle-boost"));
        assert_eq!(engine.state().hints_used, 1);
        assert!(engine.is_hint_shown("puzzle-boost"));
    }

    #[test]
    fn test_hint_budget_exhaustion() {
        let mut engine = engine();
        assert!(engine.use_hint("puzzle-boost"));
        assert!(engine.use_hint("puzzle-sequence"));
        assert!(engine.use_hint("puzzle-frame"));
        assert_eq!(engine.hints_remaining(), 0);
        assert!(!engine.can_use_hint());

        let before = engine.state().clone();
        assert!(!engine.use_hint("puzzle-vault"));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_register_team_name() {
        let mut engine = engine();
        assert!(!engine.register_team_name("   "));
        assert!(engine.state().player_names.is_empty());

        assert!(engine.register_team_name("  Dream Team  "));
        assert_eq!(engine.state().player_names, vec!["Dream Team"]);

        // Last write wins.
        engine.set_player_names(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(engine.state().player_names.len(), 2);
    }

    #[test]
    fn test_clock_idempotence() {
        let mut engine = engine();

        // Completion before start is a no-op.
        engine.complete_clock();
        assert!(engine.state().completed_at.is_none());
        assert!(engine.elapsed().is_none());

        engine.start_clock();
        let started = engine.state().started_at;
        assert!(started.is_some());

        engine.start_clock();
        assert_eq!(engine.state().started_at, started);

        engine.complete_clock();
        let completed = engine.state().completed_at;
        assert!(completed.is_some());

        engine.complete_clock();
        assert_eq!(engine.state().completed_at, completed);

        assert!(engine.elapsed().is_some());
    }

    #[test]
    fn test_reset_restores_documented_defaults() {
        let mut engine = engine();
        engine.advance();
        engine.register_team_name("Team");
        engine.submit_answer("puzzle-boost", "222");
        engine.use_hint("puzzle-boost");
        engine.start_clock();

        engine.reset();
        assert_eq!(engine.state(), &SessionState::default());

        // Store is cleared too: a reload sees a fresh session.
        let reloaded = ProgressEngine::load(ClueSequence::office_mission(), engine.store.clone());
        assert_eq!(reloaded.state(), &SessionState::default());
    }

    #[test]
    fn test_full_session_roundtrip_through_store() {
        let mut engine = engine();
        engine.start_clock();
        engine.advance();
        engine.register_team_name("Dream Team");
        engine.advance();
        engine.advance();
        engine.submit_answer("puzzle-boost", "222");
        engine.use_hint("puzzle-sequence");
        advance_to_final(&mut engine);
        engine.complete_clock();

        let reloaded = ProgressEngine::load(ClueSequence::office_mission(), engine.store.clone());
        assert_eq!(reloaded.state(), engine.state());
        assert_eq!(reloaded.render_hints(), engine.render_hints());
    }

    #[test]
    fn test_corrupt_stored_fields_recover_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(keys::PROGRESS, "99").unwrap();
        store.set(keys::ANSWERS, "{broken").unwrap();
        store.set(keys::HINTS_USED, "royal").unwrap();
        store.set(keys::HINTS_SHOWN, "42").unwrap();
        store.set(keys::COMPLETION_TIME, Utc::now().to_rfc3339().as_str()).unwrap();

        let engine = ProgressEngine::load(ClueSequence::office_mission(), store);
        // Out-of-range index clamps to the last clue.
        assert_eq!(
            engine.state().current_index,
            engine.sequence().last_index()
        );
        assert!(engine.state().saved_answers.is_empty());
        assert_eq!(engine.state().hints_used, 0);
        assert!(engine.state().hints_shown.is_empty());
        // Completion without a start is dropped.
        assert!(engine.state().completed_at.is_none());
    }

    #[test]
    fn test_progress_indicator() {
        let mut engine = engine();
        assert_eq!(engine.progress(), Progress { step: 1, total: 8 });
        engine.advance();
        assert_eq!(engine.progress(), Progress { step: 2, total: 8 });
    }

    #[test]
    fn test_summary_before_and_after_clock() {
        let mut engine = engine();
        let summary = engine.summary();
        assert!(summary.duration.is_none());
        assert!(summary.duration_text.is_none());
        assert!(summary.tier.is_none());

        engine.register_team_name("Dream Team");
        engine.start_clock();
        engine.complete_clock();
        let summary = engine.summary();
        assert_eq!(summary.player_names, vec!["Dream Team"]);
        assert!(summary.duration.is_some());
        assert_eq!(summary.tier, Some(PerformanceTier::Excellent));
        assert_eq!(summary.hints_used, 0);
    }

    #[test]
    fn test_single_number_puzzle_path() {
        // The single-value numeric format is reachable even though the
        // shipped trail uses the split form.
        let sequence = ClueSequence::new(vec![
            ClueDefinition::number_puzzle(
                "puzzle-code",
                "t",
                "c",
                NumberFormat::Single,
                &["042"],
            ),
            ClueDefinition::screen(ClueKind::Final, "t", "c"),
        ])
        .unwrap();
        let mut engine = ProgressEngine::load(sequence, MemoryStore::new());

        assert_eq!(engine.submit_answer("puzzle-code", "42"), SubmitOutcome::Incorrect);
        assert_eq!(engine.submit_answer("puzzle-code", " 042 "), SubmitOutcome::Correct);
        assert!(engine.render_hints().locked);
    }

    proptest! {
        // Hint accounting: shown-set size always equals the spent count,
        // and the budget is never exceeded, for any request pattern.
        #[test]
        fn prop_hint_accounting(requests in prop::collection::vec("[a-z]{1,6}", 0..24)) {
            let mut engine = engine();
            for key in &requests {
                engine.use_hint(key);
            }
            prop_assert_eq!(
                engine.state().hints_shown.len() as u32,
                engine.state().hints_used
            );
            prop_assert!(engine.state().hints_used <= MAX_HINTS);
        }

        // Any stored index loads to a valid position.
        #[test]
        fn prop_stored_index_always_clamped(raw in any::<usize>()) {
            let mut store = MemoryStore::new();
            store.set(keys::PROGRESS, &raw.to_string()).unwrap();
            let engine = ProgressEngine::load(ClueSequence::office_mission(), store);
            prop_assert!(engine.state().current_index <= engine.sequence().last_index());
        }
    }
}
