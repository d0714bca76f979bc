use quizboard::Question;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Makes the choices a human would make at the board.
pub trait Contestant {
    /// Picks one of `grades`, given as (grade, unanswered questions left).
    fn choose_grade(&mut self, grades: &[(&str, usize)]) -> String;
    /// Picks an option index of `question`.
    fn answer(&mut self, question: &Question) -> usize;
}

/// Picks grades that still have questions, and knows the right answer with
/// a fixed probability.
pub struct SimulatedContestant {
    rng: StdRng,
    accuracy: f64,
}

impl SimulatedContestant {
    pub fn new(rng: StdRng, accuracy: f64) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&accuracy) {
            anyhow::bail!("Accuracy must be between 0 and 1, got {}", accuracy);
        }
        Ok(Self { rng, accuracy })
    }
}

impl Contestant for SimulatedContestant {
    fn choose_grade(&mut self, grades: &[(&str, usize)]) -> String {
        let open: Vec<&str> = grades
            .iter()
            .filter(|(_, remaining)| *remaining > 0)
            .map(|(grade, _)| *grade)
            .collect();
        open.choose(&mut self.rng)
            .or_else(|| grades.first().map(|(grade, _)| grade))
            .map(|grade| grade.to_string())
            .unwrap_or_default()
    }

    fn answer(&mut self, question: &Question) -> usize {
        if let Some(correct) = question.correct_answer {
            if self.rng.gen_bool(self.accuracy) {
                return correct;
            }
        }
        let wrong: Vec<usize> = (0..question.options.len())
            .filter(|&i| !question.is_correct(i))
            .collect();
        wrong.choose(&mut self.rng).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn question(correct_answer: Option<usize>) -> Question {
        Question {
            id: 1,
            text: String::from("Q"),
            options: vec![String::from("a"), String::from("b"), String::from("c")],
            correct_answer,
            grade: String::from("Junior 4"),
        }
    }

    #[test]
    fn accuracy_bounds_the_answers() {
        let mut always = SimulatedContestant::new(StdRng::seed_from_u64(1), 1.0).unwrap();
        let mut never = SimulatedContestant::new(StdRng::seed_from_u64(1), 0.0).unwrap();
        for _ in 0..50 {
            assert_eq!(always.answer(&question(Some(2))), 2);
            assert_ne!(never.answer(&question(Some(2))), 2);
            assert!(always.answer(&question(None)) < 3);
        }
        assert!(SimulatedContestant::new(StdRng::seed_from_u64(1), 1.5).is_err());
    }

    #[test]
    fn exhausted_grades_are_avoided() {
        let mut contestant = SimulatedContestant::new(StdRng::seed_from_u64(9), 0.5).unwrap();
        for _ in 0..50 {
            let grade =
                contestant.choose_grade(&[("Junior 4", 0), ("Junior 5", 3), ("Junior 6", 0)]);
            assert_eq!(grade, "Junior 5");
        }
        assert_eq!(contestant.choose_grade(&[("Junior 4", 0)]), "Junior 4");
        assert_eq!(contestant.choose_grade(&[]), "");
    }
}
