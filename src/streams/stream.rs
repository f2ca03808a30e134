use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::streams::StreamError;

/// Pull-based, restartable source of labelled records.
///
/// The tree builder scans a stream once for statistics and then again for
/// every value node, so every implementation must replay the same records in
/// the same order after [`restart`](Stream::restart). All records must match
/// the immutable [`InstanceHeader`] returned by [`header`](Stream::header).
pub trait Stream {
    /// Returns the stream header (relation name, attributes, class tokens).
    fn header(&self) -> &InstanceHeader;

    /// Indicates whether a subsequent [`next_instance`](Stream::next_instance)
    /// may yield a record. Cheap and side-effect free.
    fn has_more_instances(&self) -> bool;

    /// Produces the next record, `Ok(None)` once exhausted.
    ///
    /// Malformed records are reported as errors, never skipped.
    fn next_instance(&mut self) -> Result<Option<Box<dyn Instance>>, StreamError>;

    /// Rewinds to the first record. The header must remain unchanged.
    fn restart(&mut self) -> Result<(), StreamError>;

    /// 0-based dataset position of the record last returned by
    /// [`next_instance`](Stream::next_instance), for streams that track one.
    fn position(&self) -> Option<usize> {
        None
    }
}
