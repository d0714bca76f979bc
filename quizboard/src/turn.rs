use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Generation, Question};

/// Period of the face-cycling effect while the dice roll.
pub const DICE_FACE_INTERVAL: Duration = Duration::from_millis(60);
/// Number of face changes; the last one shows the rolled value.
pub const DICE_FACE_CHANGES: u32 = 15;
/// From the roll to the first highlighted box.
pub const HIGHLIGHT_START: Duration = Duration::from_millis(1000);
/// The whole highlight walk, split evenly over the boxes of the path.
pub const HIGHLIGHT_WALK: Duration = Duration::from_millis(3000);
/// From the end of the highlight walk to the grade picker.
pub const GRADE_PICKER_DELAY: Duration = Duration::from_millis(200);
/// From a correct answer to the banner.
pub const BANNER_DELAY: Duration = Duration::from_millis(300);
pub const BANNER_DURATION: Duration = Duration::from_millis(400);
/// Between two movement steps.
pub const MOVE_STEP: Duration = Duration::from_millis(200);
pub const BOUNCE_DURATION: Duration = Duration::from_millis(500);
/// From the last movement step to handing the turn over.
pub const HANDOFF_DELAY: Duration = Duration::from_millis(200);

/// One scheduled change to the turn state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Step {
    ShowDiceFace(u8),
    FinishRolling,
    Highlight(u8),
    OpenGradePicker,
    ShowBanner,
    HideBanner,
    MoveTo(u8),
    StopBounce(u8),
    EndTurn,
}

/// Which part of the turn cycle the engine is in.
///
/// Derived from the [`TurnState`] flags, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Rolling,
    PathHighlighting,
    GradeSelect,
    QuestionOpen,
    Resolving,
}

/// The scratch state of one turn. Everything here is thrown away when the
/// turn ends, except for the dice face that is on display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub dice_roll: Option<u8>,
    pub is_rolling: bool,
    /// The face on display, `1..=6`.
    pub dice_face: u8,
    pub highlight_box: Option<u8>,
    pub bouncing_boxes: BTreeSet<u8>,
    pub show_grade_picker: bool,
    pub show_correct_banner: bool,
    pub current_question: Option<Question>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            dice_roll: None,
            is_rolling: false,
            dice_face: 1,
            highlight_box: None,
            bouncing_boxes: BTreeSet::new(),
            show_grade_picker: false,
            show_correct_banner: false,
            current_question: None,
        }
    }
}

impl TurnState {
    pub(crate) fn reset(&mut self) {
        *self = TurnState {
            dice_face: self.dice_face,
            ..TurnState::default()
        };
    }
}

/// What was decided when the dice were rolled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TurnPlan {
    /// The player who rolled. Manual turn swaps do not change this.
    pub player_idx: usize,
    pub roll: u8,
    pub from: u8,
    pub target: u8,
    pub generation: Generation,
    /// Set once the question has been answered correctly.
    pub resolving: bool,
}

/// The result of [`TurnEngine::select_grade()`](crate::TurnEngine::select_grade).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GradeOutcome {
    QuestionOpened { question_id: u32 },
    /// Every question of the grade has been asked. The turn is dropped and
    /// the same player may roll again.
    NoQuestionsLeft,
}

/// The result of [`TurnEngine::answer()`](crate::TurnEngine::answer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { question_id: u32, target: u8 },
    Incorrect { question_id: u32 },
}
