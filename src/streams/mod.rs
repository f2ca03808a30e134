mod delimited_file_stream;
mod error;
mod instance_list_stream;
mod line_format;
mod stream;

pub use delimited_file_stream::DelimitedFileStream;
pub use error::StreamError;
pub use instance_list_stream::InstanceListStream;
pub use line_format::LineFormat;
pub use stream::Stream;
