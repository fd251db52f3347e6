use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Alphabet Size: need at least 2 symbols, got {0}")]
    InvalidAlphabetSize(usize),

    #[error("Duplicate Symbol in Alphabet: {0:?}")]
    DuplicateSymbol(char),

    #[error("Invalid Permutation: {0}")]
    InvalidPermutation(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type SfResult<T> = Result<T, SubForgeError>;
