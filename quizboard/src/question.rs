use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The grade used when an imported question does not name one.
pub const DEFAULT_GRADE: &str = "Junior 4";

/// A multiple choice question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    ///
    /// `None` if the imported label matched no option, in which case no answer
    /// is ever correct.
    pub correct_answer: Option<usize>,
    pub grade: String,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        self.correct_answer == Some(option)
    }
}

/// All loaded questions, together with the ids that have already been asked.
#[derive(Clone, Debug, Default)]
pub struct QuestionPool {
    questions: Vec<Question>,
    answered: BTreeSet<u32>,
}

impl QuestionPool {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answered: BTreeSet::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The distinct grades, in the order they first appear.
    pub fn grades(&self) -> Vec<&str> {
        let mut grades: Vec<&str> = Vec::new();
        for question in &self.questions {
            if !grades.contains(&question.grade.as_str()) {
                grades.push(&question.grade);
            }
        }
        grades
    }

    /// Questions of this grade that have not been asked yet.
    pub fn available<'a, 'g>(&'a self, grade: &'g str) -> impl Iterator<Item = &'a Question> + 'g
    where
        'a: 'g,
    {
        self.questions
            .iter()
            .filter(move |q| q.grade == grade && !self.answered.contains(&q.id))
    }

    pub fn remaining(&self, grade: &str) -> usize {
        self.available(grade).count()
    }

    pub fn remaining_total(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| !self.answered.contains(&q.id))
            .count()
    }

    /// Picks one of the available questions of this grade uniformly at random.
    pub fn draw(&self, grade: &str, rng: &mut StdRng) -> Option<&Question> {
        let available: Vec<&Question> = self.available(grade).collect();
        available.choose(rng).copied()
    }

    /// Returns false if the question had already been marked.
    pub fn mark_answered(&mut self, id: u32) -> bool {
        self.answered.insert(id)
    }

    pub fn is_answered(&self, id: u32) -> bool {
        self.answered.contains(&id)
    }

    pub fn answered(&self) -> &BTreeSet<u32> {
        &self.answered
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::{sample_question as question, QuestionSet};

    quickcheck! {
        fn answered_questions_are_never_drawn_again(set: QuestionSet, seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = QuestionPool::new(set.0);
            let grades: Vec<String> = pool.grades().into_iter().map(String::from).collect();
            let mut seen = BTreeSet::new();
            for grade in grades.iter().cycle().take(pool.questions().len() * grades.len()) {
                if let Some(id) = pool.draw(grade, &mut rng).map(|q| q.id) {
                    if !seen.insert(id) {
                        return false;
                    }
                    pool.mark_answered(id);
                }
            }
            pool.remaining_total() == 0
        }
    }

    #[test]
    fn drawn_question_outlives_the_grade_name() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = QuestionPool::new(vec![question(1, "Junior 4"), question(2, "Junior 5")]);
        let drawn = {
            let grade = String::from("Junior 5");
            pool.draw(&grade, &mut rng)
        };
        assert_eq!(drawn.map(|q| q.id), Some(2));
    }

    #[test]
    fn grades_keep_first_appearance_order() {
        let pool = QuestionPool::new(vec![
            question(1, "Junior 5"),
            question(2, "Junior 4"),
            question(3, "Junior 5"),
            question(4, "Junior 6"),
        ]);
        assert_eq!(pool.grades(), vec!["Junior 5", "Junior 4", "Junior 6"]);
    }

    #[test]
    fn exhausted_grade_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = QuestionPool::new(vec![question(1, "Junior 5"), question(2, "Junior 4")]);
        assert_eq!(pool.draw("Junior 5", &mut rng).map(|q| q.id), Some(1));
        assert!(pool.mark_answered(1));
        assert!(!pool.mark_answered(1));
        assert_eq!(pool.remaining("Junior 5"), 0);
        assert!(pool.draw("Junior 5", &mut rng).is_none());
        assert!(pool.draw("Junior 9", &mut rng).is_none());
        assert_eq!(pool.remaining_total(), 1);
    }

    #[test]
    fn draw_covers_every_available_question() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = QuestionPool::new(vec![
            question(1, "Junior 5"),
            question(2, "Junior 5"),
            question(3, "Junior 5"),
        ]);
        let mut drawn = BTreeSet::new();
        for _ in 0..200 {
            drawn.insert(pool.draw("Junior 5", &mut rng).unwrap().id);
        }
        assert_eq!(drawn, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn unmatched_label_is_never_correct() {
        let mut q = question(1, "Junior 4");
        q.correct_answer = None;
        assert!((0..q.options.len()).all(|i| !q.is_correct(i)));
    }
}
