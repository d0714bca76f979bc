use std::io;
use std::time::{Duration, Instant};

use quizboard::{AnswerOutcome, GradeOutcome, TurnEngine};
use ratatui::{
    backend::Backend,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    Terminal,
};
use tracing::{debug, info};

use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Couples the engine to the wall clock and the keyboard.
pub struct App {
    engine: TurnEngine,
    started: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(engine: TurnEngine) -> Self {
        Self {
            engine,
            started: Instant::now(),
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while !self.should_quit {
            self.engine.advance_to(self.started.elapsed());
            terminal.draw(|frame| ui::draw(frame, &self.engine))?;
            self.handle_events()?;
        }
        self.engine.teardown();
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.on_key(key.code);
                }
            }
        }
        Ok(())
    }

    fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char(' ') => match self.engine.roll() {
                Ok(roll) => info!(player = self.engine.current_player().name, roll, "Rolled"),
                Err(err) => debug!("{}", err),
            },
            KeyCode::Char('t') => self.engine.swap_turn(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.choose(index);
            }
            _ => {}
        }
    }

    /// Number keys pick a grade while the grade picker is open, and an
    /// answer while a question is open.
    fn choose(&mut self, index: usize) {
        if self.engine.state().show_grade_picker {
            let Some(grade) = self.engine.grades().get(index).map(|g| g.to_string()) else {
                return;
            };
            match self.engine.select_grade(&grade) {
                Ok(GradeOutcome::QuestionOpened { question_id }) => {
                    info!(grade, question_id, "Question opened")
                }
                Ok(GradeOutcome::NoQuestionsLeft) => info!(grade, "No questions left"),
                Err(err) => debug!("{}", err),
            }
        } else if self.engine.state().current_question.is_some() {
            match self.engine.answer(index) {
                Ok(AnswerOutcome::Correct { question_id, target }) => {
                    info!(question_id, target, "Correct answer")
                }
                Ok(AnswerOutcome::Incorrect { question_id }) => {
                    info!(question_id, "Incorrect answer")
                }
                Err(err) => debug!("{}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quizboard::{default_players, Phase, Question, QuestionPool};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn app() -> App {
        let questions = vec![Question {
            id: 1,
            text: String::from("2 + 2?"),
            options: vec![String::from("3"), String::from("4"), String::from("5")],
            correct_answer: Some(1),
            grade: String::from("Junior 5"),
        }];
        let engine = TurnEngine::new(
            default_players(),
            QuestionPool::new(questions),
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        App::new(engine)
    }

    fn settle(app: &mut App) {
        while let Some(at) = app.engine.next_due() {
            app.engine.advance_to(at);
        }
    }

    #[test]
    fn keys_drive_a_whole_turn() {
        let mut app = app();
        app.on_key(KeyCode::Char('r'));
        assert_eq!(app.engine.phase(), Phase::Rolling);
        let (from, target) = app.engine.pending_move().unwrap();
        assert_eq!(from, 1);

        settle(&mut app);
        assert_eq!(app.engine.phase(), Phase::GradeSelect);
        // Only one grade, so '2' picks nothing
        app.on_key(KeyCode::Char('2'));
        assert_eq!(app.engine.phase(), Phase::GradeSelect);
        app.on_key(KeyCode::Char('1'));
        assert_eq!(app.engine.phase(), Phase::QuestionOpen);

        app.on_key(KeyCode::Char('2'));
        assert_eq!(app.engine.phase(), Phase::Resolving);
        settle(&mut app);
        assert_eq!(app.engine.players()[0].position, target);
        assert_eq!(app.engine.current_player_idx(), 1);
    }

    #[test]
    fn swap_and_quit_keys() {
        let mut app = app();
        app.on_key(KeyCode::Char('t'));
        assert_eq!(app.engine.current_player_idx(), 1);
        app.on_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.on_key(KeyCode::Esc);
        assert!(app.should_quit);
    }
}
