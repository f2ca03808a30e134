use crate::streams::{DelimitedFileStream, LineFormat};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::DatasetChoice;

mod delimited_file;

pub fn line_format(choice: &DatasetChoice) -> Result<LineFormat, BuildError> {
    match choice {
        DatasetChoice::DelimitedFile(p) => delimited_file::line_format(p),
    }
}

/// Opens the dataset over its configured window.
pub fn build_stream(choice: &DatasetChoice) -> Result<DelimitedFileStream, BuildError> {
    match choice {
        DatasetChoice::DelimitedFile(p) => DelimitedFileStream::try_from(p),
    }
}

/// Opens `len` records starting `start` records into the configured window,
/// clipped to the window's own limit.
pub fn build_window(
    choice: &DatasetChoice,
    start: usize,
    len: Option<usize>,
) -> Result<DelimitedFileStream, BuildError> {
    match choice {
        DatasetChoice::DelimitedFile(p) => {
            let available = p.limit.map(|l| l.saturating_sub(start));
            let limit = match (len, available) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            let stream = DelimitedFileStream::try_from(p)?;
            Ok(stream.with_window(p.offset + start, limit)?)
        }
    }
}
