use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown grouping column: {0}")]
    UnknownColumn(String),

    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    #[error("Invalid rule pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[cfg(feature = "llm")]
    #[error("LLM error: {0}")]
    Llm(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
