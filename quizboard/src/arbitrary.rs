use crate::{Question, BOARD_SIZE, START_BOX};

/// A box a player can stand on.
#[derive(Copy, Clone, Debug)]
pub struct Position(pub u8);

/// A value the dice can show.
#[derive(Copy, Clone, Debug)]
pub struct DiceRoll(pub u8);

/// Questions with distinct ids spread over a few grades.
#[derive(Clone, Debug)]
pub struct QuestionSet(pub Vec<Question>);

pub fn sample_question(id: u32, grade: &str) -> Question {
    Question {
        id,
        text: format!("Question {}", id),
        options: vec![String::from("a"), String::from("b"), String::from("c")],
        correct_answer: Some(0),
        grade: String::from(grade),
    }
}

impl quickcheck::Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Position(START_BOX + u8::arbitrary(g) % BOARD_SIZE)
    }
}

impl quickcheck::Arbitrary for DiceRoll {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        DiceRoll(1 + u8::arbitrary(g) % 6)
    }
}

impl quickcheck::Arbitrary for QuestionSet {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = usize::arbitrary(g) % 30;
        let questions = (1..=len as u32)
            .map(|id| {
                let grade = *g.choose(&["Junior 4", "Junior 5", "Junior 6"]).unwrap();
                sample_question(id, grade)
            })
            .collect();
        QuestionSet(questions)
    }
}
