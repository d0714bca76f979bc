use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use crate::turn::TurnPlan;
use crate::{
    is_finish_box, path, target_position, ActionRejected, AnswerOutcome, GradeOutcome, Phase,
    Player, QuestionPool, Sequencer, SetupError, Step, TurnState, BANNER_DELAY,
    BANNER_DURATION, BOUNCE_DURATION, DICE_FACE_CHANGES, DICE_FACE_INTERVAL, GRADE_PICKER_DELAY,
    HANDOFF_DELAY, HIGHLIGHT_START, HIGHLIGHT_WALK, MOVE_STEP,
};

/// Owns everything about a running game and advances it through the turn cycle.
///
/// Time does not pass on its own. The caller moves the engine's clock with
/// [`advance_to()`](Self::advance_to), which applies whatever scheduled steps
/// became due, and triggers user actions in between. All actions are relative
/// to the engine's clock at the time they are called.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    players: Vec<Player>,
    current_player: usize,
    pool: QuestionPool,
    rng: StdRng,
    clock: Duration,
    sequencer: Sequencer<Step>,
    state: TurnState,
    plan: Option<TurnPlan>,
}

impl TurnEngine {
    pub fn new(players: Vec<Player>, pool: QuestionPool, rng: StdRng) -> Result<Self, SetupError> {
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if pool.is_empty() {
            return Err(SetupError::NoQuestions);
        }
        Ok(Self {
            players,
            current_player: 0,
            pool,
            rng,
            clock: Duration::ZERO,
            sequencer: Sequencer::new(),
            state: TurnState::default(),
            plan: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_idx(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    /// The grades offered by the grade picker.
    pub fn grades(&self) -> Vec<&str> {
        self.pool.grades()
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// When the next scheduled step is due, if a sequence is in flight.
    pub fn next_due(&self) -> Option<Duration> {
        self.sequencer.next_due()
    }

    /// The index of a player standing on the last box, if any.
    pub fn player_on_finish(&self) -> Option<usize> {
        self.players.iter().position(|p| is_finish_box(p.position))
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_rolling {
            Phase::Rolling
        } else if self.state.current_question.is_some() {
            Phase::QuestionOpen
        } else if self.state.show_grade_picker {
            Phase::GradeSelect
        } else {
            match self.plan {
                Some(TurnPlan {
                    resolving: true, ..
                }) => Phase::Resolving,
                Some(_) => Phase::PathHighlighting,
                None => Phase::Idle,
            }
        }
    }

    /// Whether the roll trigger is enabled.
    pub fn can_roll(&self) -> bool {
        self.state.current_question.is_none()
            && !self.state.show_grade_picker
            && !self.state.is_rolling
            && self.plan.is_none()
    }

    /// The boxes the rolling player moves between if they answer correctly.
    pub fn pending_move(&self) -> Option<(u8, u8)> {
        self.plan.map(|plan| (plan.from, plan.target))
    }

    /// Moves the clock forward to `now` and applies all steps that became due,
    /// in order. The clock never goes backwards.
    pub fn advance_to(&mut self, now: Duration) -> Vec<Step> {
        self.clock = self.clock.max(now);
        let mut applied = Vec::new();
        while let Some(due) = self.sequencer.pop_due(self.clock) {
            if !self.sequencer.is_current(due.generation) {
                trace!(step = ?due.step, "Dropping step of a cancelled sequence");
                continue;
            }
            trace!(at = ?due.at, step = ?due.step, "Applying step");
            self.apply(&due.step);
            applied.push(due.step);
        }
        applied
    }

    /// Rolls the dice for the current player and schedules the rolling effect,
    /// the highlight walk and the grade picker.
    pub fn roll(&mut self) -> Result<u8, ActionRejected> {
        if !self.can_roll() {
            return Err(ActionRejected::RollDisabled);
        }
        let roll = self.rng.gen_range(1..=6);
        self.start_turn(roll);
        Ok(roll)
    }

    pub(crate) fn start_turn(&mut self, roll: u8) {
        let player_idx = self.current_player;
        let from = self.players[player_idx].position;
        let target = target_position(from, roll);
        let generation = self.sequencer.begin();
        let start = self.clock;

        self.state.reset();
        self.state.dice_roll = Some(roll);
        self.state.is_rolling = true;

        for tick in 1..DICE_FACE_CHANGES {
            let face = self.rng.gen_range(1..=6);
            self.sequencer.schedule(
                generation,
                start + DICE_FACE_INTERVAL * tick,
                Step::ShowDiceFace(face),
            );
        }
        let settled = start + DICE_FACE_INTERVAL * DICE_FACE_CHANGES;
        self.sequencer.schedule(generation, settled, Step::ShowDiceFace(roll));
        self.sequencer.schedule(generation, settled, Step::FinishRolling);

        let path_len = path(from, target).count() as u32;
        let per_box = HIGHLIGHT_WALK / path_len;
        for (k, box_id) in path(from, target).enumerate() {
            self.sequencer.schedule(
                generation,
                start + HIGHLIGHT_START + per_box * k as u32,
                Step::Highlight(box_id),
            );
        }
        self.sequencer.schedule(
            generation,
            start + HIGHLIGHT_START + HIGHLIGHT_WALK + GRADE_PICKER_DELAY,
            Step::OpenGradePicker,
        );

        self.plan = Some(TurnPlan {
            player_idx,
            roll,
            from,
            target,
            generation,
            resolving: false,
        });
        debug!(
            player = self.players[player_idx].name,
            roll, from, target, "Rolled the dice"
        );
    }

    /// Picks a grade in the grade picker and opens a random unanswered question of it.
    pub fn select_grade(&mut self, grade: &str) -> Result<GradeOutcome, ActionRejected> {
        if !self.state.show_grade_picker {
            return Err(ActionRejected::GradePickerClosed);
        }
        self.state.show_grade_picker = false;

        match self.pool.draw(grade, &mut self.rng).cloned() {
            Some(question) => {
                let question_id = question.id;
                debug!(grade, question_id, "Opened question");
                self.state.current_question = Some(question);
                Ok(GradeOutcome::QuestionOpened { question_id })
            }
            None => {
                debug!(grade, "No questions left for grade");
                self.end_sequence();
                Ok(GradeOutcome::NoQuestionsLeft)
            }
        }
    }

    /// Answers the open question with the option at index `option`.
    pub fn answer(&mut self, option: usize) -> Result<AnswerOutcome, ActionRejected> {
        let question = self
            .state
            .current_question
            .take()
            .ok_or(ActionRejected::NoQuestionOpen)?;
        let num_options = question.options.len();
        if option >= num_options {
            self.state.current_question = Some(question);
            return Err(ActionRejected::OptionOutOfRange {
                option,
                num_options,
            });
        }

        let question_id = question.id;
        self.pool.mark_answered(question_id);

        let Some(plan) = self.plan.as_mut() else {
            // Only reachable if the turn was torn down underneath the question.
            return Ok(AnswerOutcome::Incorrect { question_id });
        };
        let mover = plan.player_idx;

        if !question.is_correct(option) {
            debug!(question_id, option, "Incorrect answer");
            self.finish_turn(mover);
            return Ok(AnswerOutcome::Incorrect { question_id });
        }

        plan.resolving = true;
        let generation = plan.generation;
        let from = self.players[mover].position;
        let target = target_position(from, plan.roll);
        debug!(question_id, option, from, target, "Correct answer");

        let start = self.clock;
        self.sequencer.schedule(generation, start + BANNER_DELAY, Step::ShowBanner);
        let move_start = start + BANNER_DELAY + BANNER_DURATION;
        self.sequencer.schedule(generation, move_start, Step::HideBanner);
        let mut steps = 0;
        for (i, box_id) in path(from, target).enumerate() {
            let at = move_start + MOVE_STEP * i as u32;
            self.sequencer.schedule(generation, at, Step::MoveTo(box_id));
            self.sequencer.schedule(generation, at + BOUNCE_DURATION, Step::StopBounce(box_id));
            steps += 1;
        }
        self.sequencer.schedule(
            generation,
            move_start + MOVE_STEP * steps + HANDOFF_DELAY,
            Step::EndTurn,
        );

        Ok(AnswerOutcome::Correct {
            question_id,
            target,
        })
    }

    /// Hands the turn to the next player. Nothing else changes.
    pub fn swap_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.players.len();
        debug!(player = self.current_player().name, "Swapped turn");
    }

    /// Cancels whatever is in flight and clears the turn state.
    pub fn teardown(&mut self) {
        if self.plan.is_some() {
            debug!("Tearing down the turn in flight");
        }
        self.end_sequence();
    }

    fn apply(&mut self, step: &Step) {
        match *step {
            Step::ShowDiceFace(face) => self.state.dice_face = face,
            Step::FinishRolling => self.state.is_rolling = false,
            Step::Highlight(box_id) => self.state.highlight_box = Some(box_id),
            Step::OpenGradePicker => self.state.show_grade_picker = true,
            Step::ShowBanner => self.state.show_correct_banner = true,
            Step::HideBanner => self.state.show_correct_banner = false,
            Step::MoveTo(box_id) => {
                if let Some(plan) = self.plan {
                    self.players[plan.player_idx].position = box_id;
                    self.state.bouncing_boxes.insert(box_id);
                }
            }
            Step::StopBounce(box_id) => {
                self.state.bouncing_boxes.remove(&box_id);
            }
            Step::EndTurn => {
                if let Some(plan) = self.plan {
                    self.finish_turn(plan.player_idx);
                }
            }
        }
    }

    fn finish_turn(&mut self, mover: usize) {
        self.current_player = (mover + 1) % self.players.len();
        self.end_sequence();
        debug!(next = self.current_player().name, "Turn ended");
    }

    fn end_sequence(&mut self) {
        self.sequencer.cancel();
        self.state.reset();
        self.plan = None;
    }
}
