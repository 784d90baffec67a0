use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("word list must not be empty")]
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("word list `{0}` not found")]
    NotFound(String),
    #[error("word list `{0}` is not valid utf-8")]
    NotUtf8(String),
    #[error("unable to parse word list: {0}")]
    Parse(#[from] serde_json::Error),
}
