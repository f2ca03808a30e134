use crate::streams::StreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("insufficient data: the dataset yielded no usable records")]
    InsufficientData,

    /// `record` is the 1-based position of the record within the scan.
    #[error("record {record}: expected {expected} attribute values, found {found}")]
    SchemaMismatch {
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {record}: training records must carry a class label")]
    MissingLabel { record: usize },

    #[error(transparent)]
    Stream(#[from] StreamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_stream_errors_are_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TreeError = StreamError::from(io).into();
        assert!(matches!(err, TreeError::Stream(StreamError::Io(_))));
    }
}
