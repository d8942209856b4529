//! Clue Trail Demo
//!
//! Drives a scripted playthrough of the office-mission trail against a
//! file-backed store, then reloads the session from disk and verifies
//! that the restored render state matches the live one.

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use clue_trail::{
    ClueKind, ClueSequence, DigitGroupInput, HintButton, JsonFileStore, KeyValueStore,
    NumberFormat, ProgressEngine, SubmitOutcome, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Clue Trail v{}", VERSION);

    let store_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "clue-trail-session.json".to_string());
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("opening session store at {store_path}"))?;

    let mut engine = ProgressEngine::load(ClueSequence::office_mission(), store);
    engine.reset();

    demo_playthrough(&mut engine);
    verify_restore(&engine, &store_path)?;
    Ok(())
}

/// Walk every screen of the trail, exercising each engine operation.
fn demo_playthrough<S: KeyValueStore>(engine: &mut ProgressEngine<S>) {
    info!("=== Starting Demo Playthrough ===");
    engine.start_clock();

    loop {
        render_screen(engine);

        let clue = engine.current_clue();
        let kind = clue.kind;
        let key = clue.key_str().map(str::to_string);
        let solution = clue.accepted_answers.first().cloned();

        match kind {
            ClueKind::MissionStart | ClueKind::Welcome => {
                engine.advance();
            }
            ClueKind::Registration => {
                // An empty name is rejected with no state change.
                if !engine.register_team_name("   ") {
                    info!("(transient feedback: please enter a team name)");
                }
                if engine.register_team_name("Dream Team") {
                    engine.advance();
                }
            }
            ClueKind::TextPuzzle | ClueKind::NumberPuzzle(NumberFormat::Single) => {
                solve_puzzle(engine, kind, key, solution);
            }
            ClueKind::NumberPuzzle(NumberFormat::SplitDigits { width }) => {
                solve_split_digits(engine, key, solution, width);
            }
            ClueKind::Final => {
                engine.complete_clock();
                render_summary(engine);
                break;
            }
        }

        if !engine.can_advance() && engine.current_clue().kind != ClueKind::Final {
            warn!("trail ended before the final screen");
            break;
        }
    }
}

/// Submit a wrong answer, spend a hint when offered, then solve.
fn solve_puzzle<S: KeyValueStore>(
    engine: &mut ProgressEngine<S>,
    kind: ClueKind,
    key: Option<String>,
    solution: Option<String>,
) {
    let (Some(key), Some(solution)) = (key, solution) else {
        warn!(?kind, "puzzle clue without key or answers");
        return;
    };

    if engine.submit_answer(&key, "wrong guess") == SubmitOutcome::Incorrect {
        info!(%key, "(transient feedback: shake animation)");
    }

    if let HintButton::Available { remaining } = engine.render_hints().hint_button {
        if engine.use_hint(&key) {
            let hints = engine.render_hints();
            info!(
                %key,
                remaining = remaining - 1,
                hint = hints.hint_text.as_deref().unwrap_or(""),
                "hint revealed"
            );
        }
    }

    match engine.submit_answer(&key, &solution) {
        SubmitOutcome::Correct => {
            let hints = engine.render_hints();
            info!(%key, locked = hints.locked, "solved, continue affordance shown");
            engine.advance();
        }
        outcome => warn!(%key, ?outcome, "expected the demo solution to be accepted"),
    }
}

/// Feed the vault code digit by digit; validation fires on the last one.
fn solve_split_digits<S: KeyValueStore>(
    engine: &mut ProgressEngine<S>,
    key: Option<String>,
    solution: Option<String>,
    width: usize,
) {
    let (Some(key), Some(solution)) = (key, solution) else {
        warn!("split-digit clue without key or answers");
        return;
    };

    let mut digits = DigitGroupInput::new(width);
    for (position, digit) in solution.chars().enumerate() {
        digits.set_digit(position, &digit.to_string());
        let outcome = engine.submit_digits(&key, &digits);
        info!(%key, position, ?outcome, "digit entered");
    }

    if engine.render_hints().solved {
        engine.advance();
    } else {
        warn!(%key, "expected the assembled code to be accepted");
    }
}

/// Print the current screen from derived render state alone.
fn render_screen<S: KeyValueStore>(engine: &ProgressEngine<S>) {
    let progress = engine.progress();
    let clue = engine.current_clue();
    let hints = engine.render_hints();

    info!("--- Step {} of {} ---", progress.step, progress.total);
    if clue.title.is_empty() && clue.content.is_empty() {
        // Never render a blank screen.
        info!("(nothing to show for this screen)");
    } else {
        info!("{}", clue.title);
        if !clue.content.is_empty() {
            info!("{}", clue.content);
        }
    }

    if let Some(prefill) = &hints.prefill {
        info!(
            prefill = %prefill,
            locked = hints.locked,
            solved = hints.solved,
            "restored input state"
        );
    }
    match hints.hint_button {
        HintButton::Available { remaining } => info!("[hint available, {remaining} left]"),
        HintButton::Revealed => info!("[hint revealed]"),
        HintButton::Exhausted => info!("[no more hints available]"),
        HintButton::Hidden => {}
    }
    if engine.can_retreat() {
        info!("[back]");
    }
    if hints.show_continue && engine.can_advance() {
        info!("[continue]");
    }
}

/// Print the final-screen summary.
fn render_summary<S: KeyValueStore>(engine: &ProgressEngine<S>) {
    let summary = engine.summary();
    info!("=== Mission Summary ===");
    info!("Team: {}", summary.player_names.join(", "));
    if let Some(text) = &summary.duration_text {
        info!("Time: {}", text);
    }
    if let Some(tier) = summary.tier {
        info!("Rating: {} - {}", tier.label(), tier.message());
    }
    info!("Hints used: {}", summary.hints_used);
    if let Some(url) = &engine.current_clue().link_url {
        info!("Deliver your message: {}", url);
    }
}

/// Reload the session from disk and check restore parity.
fn verify_restore<S: KeyValueStore>(
    live: &ProgressEngine<S>,
    store_path: &str,
) -> anyhow::Result<()> {
    info!("=== Verifying Restore ===");
    let store = JsonFileStore::open(store_path)
        .with_context(|| format!("reopening session store at {store_path}"))?;
    let restored = ProgressEngine::load(ClueSequence::office_mission(), store);

    if restored.state() == live.state() && restored.render_hints() == live.render_hints() {
        info!("RESTORE VERIFIED: reloaded session matches live session");
    } else {
        warn!("RESTORE FAILURE: reloaded session differs from live session");
    }
    Ok(())
}
