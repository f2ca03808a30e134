use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("record {line}: expected {expected} attribute values, found {found}")]
    SchemaMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {line}: class token '{token}' is not one of the declared labels")]
    UnknownLabel { line: usize, token: String },

    #[error("record {line}: empty token in column {column}")]
    EmptyToken { line: usize, column: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
