/// The error type for a user action that is not allowed in the current phase.
///
/// A rejected action leaves the engine untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionRejected {
    RollDisabled,
    GradePickerClosed,
    NoQuestionOpen,
    OptionOutOfRange { option: usize, num_options: usize },
}

impl std::error::Error for ActionRejected {}

impl std::fmt::Display for ActionRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionRejected::RollDisabled => write!(
                f,
                "The dice cannot be rolled while a turn is still being played"
            ),
            ActionRejected::GradePickerClosed => {
                write!(f, "Tried to pick a grade, but no grade was asked for")
            }
            ActionRejected::NoQuestionOpen => {
                write!(f, "Tried to answer, but no question is open")
            }
            ActionRejected::OptionOutOfRange {
                option,
                num_options,
            } => write!(
                f,
                "Picked option {}, but the question only has {} options",
                option, num_options
            ),
        }
    }
}

/// The error type for [`TurnEngine::new()`](crate::TurnEngine::new) and for
/// building players from configs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupError {
    NoPlayers,
    TooManyPlayers { count: usize },
    NoQuestions,
}

impl std::error::Error for SetupError {}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::NoPlayers => write!(f, "A game needs at least one player"),
            SetupError::TooManyPlayers { count } => write!(
                f,
                "A game has room for at most {} players, got {}",
                u8::MAX,
                count
            ),
            SetupError::NoQuestions => write!(f, "A game needs at least one question"),
        }
    }
}
