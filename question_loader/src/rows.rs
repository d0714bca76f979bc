use quizboard::{Question, DEFAULT_GRADE};
use tracing::trace;

use crate::LoadError;

pub const QUESTION_COLUMN: &str = "question";
/// Labels of the option columns, in option order. The correct answer column
/// names one of these.
pub const OPTION_COLUMNS: [&str; 3] = ["A", "B", "C"];
pub const CORRECT_ANSWER_COLUMN: &str = "correctAnswer";
pub const GRADE_COLUMN: &str = "grade";

/// Where each column sits in a row.
struct Columns {
    question: usize,
    options: [usize; 3],
    correct_answer: usize,
    grade: Option<usize>,
}

impl Columns {
    fn locate(header: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        let require =
            |name: &'static str| find(name).ok_or(LoadError::MissingColumn { column: name });
        Ok(Self {
            question: require(QUESTION_COLUMN)?,
            options: [
                require(OPTION_COLUMNS[0])?,
                require(OPTION_COLUMNS[1])?,
                require(OPTION_COLUMNS[2])?,
            ],
            correct_answer: require(CORRECT_ANSWER_COLUMN)?,
            grade: find(GRADE_COLUMN),
        })
    }
}

/// Builds questions from a header row and the data rows below it.
///
/// Ids are assigned from 1 in row order. Blank rows are skipped without
/// using up an id.
pub fn questions_from_rows<I>(header: &[String], rows: I) -> Result<Vec<Question>, LoadError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let columns = Columns::locate(header)?;
    let mut questions = Vec::new();
    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            trace!(row_idx, "Skipping blank row");
            continue;
        }
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();

        let label = cell(columns.correct_answer);
        let correct_answer = OPTION_COLUMNS.iter().position(|l| *l == label);
        if correct_answer.is_none() {
            trace!(row_idx, label, "Correct answer matches no option column");
        }
        let grade = columns
            .grade
            .map(cell)
            .filter(|grade| !grade.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_GRADE));

        questions.push(Question {
            id: questions.len() as u32 + 1,
            text: cell(columns.question),
            options: columns.options.iter().map(|&idx| cell(idx)).collect(),
            correct_answer,
            grade,
        });
    }
    Ok(questions)
}

/// Renders a number the way it reads in a spreadsheet cell.
pub(crate) fn number_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| String::from(*c)).collect()
    }

    fn header() -> Vec<String> {
        strings(&["question", "A", "B", "C", "correctAnswer", "grade"])
    }

    #[test]
    fn rows_become_questions_in_order() {
        let rows = vec![
            strings(&["2 + 2?", "3", "4", "5", "B", "Junior 5"]),
            strings(&["Capital of France?", "Paris", "Rome", "Oslo", "A", "Junior 6"]),
        ];
        let questions = questions_from_rows(&header(), rows).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].text, "2 + 2?");
        assert_eq!(questions[0].options, strings(&["3", "4", "5"]));
        assert_eq!(questions[0].correct_answer, Some(1));
        assert_eq!(questions[0].grade, "Junior 5");
        assert_eq!(questions[1].id, 2);
        assert_eq!(questions[1].correct_answer, Some(0));
    }

    #[test]
    fn unmatched_label_gives_no_correct_answer() {
        let rows = vec![
            strings(&["Odd one", "x", "y", "z", "D", "Junior 4"]),
            strings(&["Lowercase", "x", "y", "z", "c", "Junior 4"]),
        ];
        let questions = questions_from_rows(&header(), rows).unwrap();
        assert_eq!(questions[0].correct_answer, None);
        assert_eq!(questions[1].correct_answer, None);
        assert!((0..3).all(|i| !questions[0].is_correct(i)));
    }

    #[test]
    fn missing_grade_falls_back_to_default() {
        let rows = vec![
            strings(&["No grade", "x", "y", "z", "C", ""]),
            strings(&["Short row", "x", "y", "z", "C"]),
        ];
        let questions = questions_from_rows(&header(), rows).unwrap();
        assert!(questions.iter().all(|q| q.grade == DEFAULT_GRADE));
        assert_eq!(questions[1].correct_answer, Some(2));

        let without_grade_column = strings(&["question", "A", "B", "C", "correctAnswer"]);
        let rows = vec![strings(&["Q", "x", "y", "z", "A"])];
        let questions = questions_from_rows(&without_grade_column, rows).unwrap();
        assert_eq!(questions[0].grade, DEFAULT_GRADE);
    }

    #[test]
    fn blank_rows_do_not_use_up_ids() {
        let rows = vec![
            strings(&["First", "x", "y", "z", "A", "Junior 4"]),
            strings(&["", " ", "", "", "", ""]),
            strings(&["Second", "x", "y", "z", "A", "Junior 4"]),
        ];
        let questions = questions_from_rows(&header(), rows).unwrap();
        let ids: Vec<u32> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(questions[1].text, "Second");
    }

    #[test]
    fn columns_may_come_in_any_order() {
        let header = strings(&["grade", "correctAnswer", "C", "B", "A", "question"]);
        let rows = vec![strings(&["Junior 6", "A", "c", "b", "a", "Reordered"])];
        let questions = questions_from_rows(&header, rows).unwrap();
        assert_eq!(questions[0].options, strings(&["a", "b", "c"]));
        assert_eq!(questions[0].text, "Reordered");
        assert_eq!(questions[0].grade, "Junior 6");
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let header = strings(&["question", "A", "B", "correctAnswer"]);
        match questions_from_rows(&header, Vec::<Vec<String>>::new()) {
            Err(LoadError::MissingColumn { column }) => assert_eq!(column, "C"),
            other => panic!("Expected a missing column, got {:?}", other),
        }
    }

    #[test]
    fn numbers_read_like_cells() {
        assert_eq!(number_text(4.0), "4");
        assert_eq!(number_text(-12.0), "-12");
        assert_eq!(number_text(2.5), "2.5");
    }
}
