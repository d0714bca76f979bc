use quizboard::{
    visualize_board, AnswerOutcome, GradeOutcome, Player, Question, QuestionPool, TurnEngine,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::contestant::Contestant;
use crate::recording::{EventKind, Recorder};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    ReachedFinish { player_idx: usize, turns: usize },
    OutOfQuestions { turns: usize },
    TurnLimit,
}

/// Plays one game from the start box until somebody reaches the last box,
/// every question has been asked, or `max_turns` turns have been played.
///
/// Returns an error only if the engine rejects an action, which would be a
/// bug in the runner.
pub fn play_game(
    rng: &mut StdRng,
    players: &[Player],
    questions: &[Question],
    contestant: &mut dyn Contestant,
    max_turns: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut engine = TurnEngine::new(
        players.to_vec(),
        QuestionPool::new(questions.to_vec()),
        StdRng::seed_from_u64(rng.gen()),
    )?;

    let mut turns = 0;
    let result = loop {
        if let Some(player_idx) = engine.player_on_finish() {
            break GameResult::ReachedFinish { player_idx, turns };
        }
        if engine.pool().remaining_total() == 0 {
            break GameResult::OutOfQuestions { turns };
        }
        if turns >= max_turns {
            break GameResult::TurnLimit;
        }
        play_turn(&mut engine, contestant, recorder)?;
        turns += 1;
        trace!("After turn {}:\n{}", turns, visualize_board(&engine));
    };

    if let Some(rec) = recorder {
        let path = rec.write_game_recording()?;
        debug!(path = %path.display(), "Wrote game recording");
    }
    Ok(result)
}

fn play_turn(
    engine: &mut TurnEngine,
    contestant: &mut dyn Contestant,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<()> {
    let player = engine.current_player().name.clone();
    let roll = engine.roll()?;
    record(recorder, engine, EventKind::Rolled { player, roll });
    run_scheduled_steps(engine, recorder);

    let grades: Vec<(&str, usize)> = engine
        .grades()
        .into_iter()
        .map(|grade| (grade, engine.pool().remaining(grade)))
        .collect();
    let grade = contestant.choose_grade(&grades);

    let question_id = match engine.select_grade(&grade)? {
        GradeOutcome::QuestionOpened { question_id } => Some(question_id),
        GradeOutcome::NoQuestionsLeft => None,
    };
    record(
        recorder,
        engine,
        EventKind::GradeSelected { grade, question_id },
    );

    if let Some(question) = engine.state().current_question.clone() {
        let option = contestant.answer(&question);
        let outcome = engine.answer(option)?;
        let correct = matches!(outcome, AnswerOutcome::Correct { .. });
        record(
            recorder,
            engine,
            EventKind::Answered {
                question_id: question.id,
                option,
                correct,
            },
        );
        run_scheduled_steps(engine, recorder);
    }
    Ok(())
}

/// Jumps the clock from one scheduled step to the next until nothing is left.
fn run_scheduled_steps(engine: &mut TurnEngine, recorder: &mut Option<Recorder>) {
    while let Some(at) = engine.next_due() {
        for step in engine.advance_to(at) {
            record(recorder, engine, EventKind::Step { step });
        }
    }
}

fn record(recorder: &mut Option<Recorder>, engine: &TurnEngine, kind: EventKind) {
    if let Some(rec) = recorder {
        rec.store(engine.clock(), kind);
    }
}
