use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistgenError>;

#[derive(Error, Debug)]
pub enum HistgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Cannot sample {requested} items from a population of {available}")]
    Sample { requested: usize, available: usize },
    #[error("Clock overflow advancing past {0}")]
    ClockOverflow(chrono::NaiveDateTime),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl HistgenError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        HistgenError::Parse {
            line,
            message: message.into(),
        }
    }
}
