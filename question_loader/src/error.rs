/// Error type for importing a question file.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Spreadsheet(calamine::Error),
    Json(serde_json::Error),
    UnsupportedFormat { extension: Option<String> },
    NoSheets,
    MissingHeader,
    MissingColumn { column: &'static str },
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Spreadsheet(err) => Some(err),
            LoadError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(_) => write!(f, "Could not read the question file"),
            LoadError::Spreadsheet(_) => write!(f, "Could not read the spreadsheet"),
            LoadError::Json(_) => write!(f, "Could not parse the JSON question list"),
            LoadError::UnsupportedFormat {
                extension: Some(ext),
            } => write!(f, "Unsupported question file type '.{}'", ext),
            LoadError::UnsupportedFormat { extension: None } => {
                write!(f, "Question file has no extension to tell its type")
            }
            LoadError::NoSheets => write!(f, "The workbook contains no sheets"),
            LoadError::MissingHeader => write!(f, "The first sheet is empty"),
            LoadError::MissingColumn { column } => {
                write!(f, "The header row has no '{}' column", column)
            }
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        LoadError::Spreadsheet(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}
