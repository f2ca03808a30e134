mod datasets;
mod error;

pub use datasets::{build_stream, build_window, line_format};
pub use error::BuildError;
