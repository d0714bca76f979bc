//! Imports the question pool from a spreadsheet or a JSON dump of its rows.
//!
//! Both formats describe one question per row, with the columns
//! `question`, `A`, `B`, `C`, `correctAnswer` and optionally `grade`.

mod error;
mod rows;
pub use error::*;
pub use rows::*;

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use quizboard::Question;
use serde_json::{Map, Value};
use tracing::info;

/// Loads questions from a file, picking the format by its extension.
pub fn load_questions(path: &Path) -> Result<Vec<Question>, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let questions = match extension.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => load_spreadsheet(path)?,
        Some("json") => questions_from_json(&std::fs::read_to_string(path)?)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                extension: extension.clone(),
            })
        }
    };
    info!(
        path = %path.display(),
        num_questions = questions.len(),
        "Loaded questions"
    );
    Ok(questions)
}

/// Reads the first sheet of a workbook. The first row is the header.
pub fn load_spreadsheet(path: &Path) -> Result<Vec<Question>, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoSheets)?;
    let range = workbook.worksheet_range(&sheet)?;
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows.next().ok_or(LoadError::MissingHeader)?;
    questions_from_rows(&header, rows)
}

/// Parses a JSON array of row objects keyed by column name.
///
/// Absent keys and `null` values count as empty cells.
pub fn questions_from_json(text: &str) -> Result<Vec<Question>, LoadError> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(text)?;
    let header: Vec<String> = [QUESTION_COLUMN]
        .into_iter()
        .chain(OPTION_COLUMNS)
        .chain([CORRECT_ANSWER_COLUMN, GRADE_COLUMN])
        .map(String::from)
        .collect();
    let rows = objects.iter().map(|object| {
        header
            .iter()
            .map(|column| object.get(column).map(value_text).unwrap_or_default())
            .collect::<Vec<String>>()
    });
    questions_from_rows(&header, rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => number_text(*f),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(number_text).unwrap_or_else(|| n.to_string()),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;
    use quizboard::DEFAULT_GRADE;

    use super::*;

    #[test]
    fn cells_are_coerced_to_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Error(CellErrorType::Div0)), "");
        assert_eq!(cell_text(&Data::String(String::from("Paris"))), "Paris");
        assert_eq!(cell_text(&Data::Float(4.0)), "4");
        assert_eq!(cell_text(&Data::Float(-12.0)), "-12");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }

    #[test]
    fn workbook_reads_first_sheet_with_header_row() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/questions.xlsx");
        let questions = load_questions(&path).unwrap();
        // The blank third row is skipped and the second sheet is ignored
        assert_eq!(questions.len(), 2);

        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].text, "2 + 2?");
        assert_eq!(questions[0].options, vec!["3", "4", "5.5"]);
        assert_eq!(questions[0].correct_answer, Some(1));
        assert_eq!(questions[0].grade, "Junior 5");

        assert_eq!(questions[1].id, 2);
        assert_eq!(questions[1].options, vec!["Paris", "Rome", "Oslo"]);
        assert_eq!(questions[1].correct_answer, None);
        assert_eq!(questions[1].grade, DEFAULT_GRADE);
    }

    #[test]
    fn json_rows_are_coerced_like_cells() {
        let text = r#"[
            {"question": "2 + 2?", "A": 3, "B": 4.0, "C": 5.5, "correctAnswer": "B", "grade": "Junior 5"},
            {"question": "No grade", "A": "x", "B": "y", "C": null, "correctAnswer": "D"},
            {}
        ]"#;
        let questions = questions_from_json(text).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].options, vec!["3", "4", "5.5"]);
        assert_eq!(questions[0].correct_answer, Some(1));
        assert_eq!(questions[1].options, vec!["x", "y", ""]);
        assert_eq!(questions[1].correct_answer, None);
        assert_eq!(questions[1].grade, DEFAULT_GRADE);
        assert_eq!(questions[1].id, 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            questions_from_json("{\"question\": 1}"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        match load_questions(Path::new("questions.txt")) {
            Err(LoadError::UnsupportedFormat { extension }) => {
                assert_eq!(extension.as_deref(), Some("txt"))
            }
            other => panic!("Expected an unsupported format, got {:?}", other),
        }
        assert!(matches!(
            load_questions(Path::new("questions")),
            Err(LoadError::UnsupportedFormat { extension: None })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_questions(Path::new("does/not/exist.json")),
            Err(LoadError::Io(_))
        ));
    }
}
