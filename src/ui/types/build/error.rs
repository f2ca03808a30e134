use crate::classifiers::decision_tree::TreeError;
use crate::streams::StreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
