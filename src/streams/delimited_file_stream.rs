use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::streams::{LineFormat, Stream, StreamError};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-backed stream over a headerless delimited text dataset.
///
/// Each non-blank line is one record. An optional window (`offset`, `limit`)
/// restricts the stream to a contiguous run of records, which is how a single
/// file is split into a training part and a testing part. `restart` reopens
/// the file, so every rescan reads the data again from disk.
pub struct DelimitedFileStream {
    path: PathBuf,
    header: Arc<InstanceHeader>,
    format: LineFormat,
    offset: usize,
    limit: Option<usize>,
    lines: Lines<BufReader<File>>,
    pending: Option<(usize, String)>,
    line_no: usize,
    emitted: usize,
}

impl DelimitedFileStream {
    pub fn new<P: AsRef<Path>>(
        path: P,
        header: Arc<InstanceHeader>,
        format: LineFormat,
    ) -> Result<Self, StreamError> {
        format.validate(&header)?;
        let path = path.as_ref().to_path_buf();
        let lines = Self::open(&path)?;
        let mut stream = Self {
            path,
            header,
            format,
            offset: 0,
            limit: None,
            lines,
            pending: None,
            line_no: 0,
            emitted: 0,
        };
        stream.fill_pending()?;
        Ok(stream)
    }

    /// Skips the first `offset` records and stops after `limit` records.
    pub fn with_window(mut self, offset: usize, limit: Option<usize>) -> Result<Self, StreamError> {
        self.offset = offset;
        self.limit = limit;
        self.restart()?;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &LineFormat {
        &self.format
    }

    fn open(path: &Path) -> Result<Lines<BufReader<File>>, StreamError> {
        Ok(BufReader::new(File::open(path)?).lines())
    }

    fn next_record_line(&mut self) -> Result<Option<(usize, String)>, StreamError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Ok(Some((self.line_no, line)));
        }
        Ok(None)
    }

    fn fill_pending(&mut self) -> Result<(), StreamError> {
        self.pending = None;
        if self.limit.is_some_and(|l| self.emitted >= l) {
            return Ok(());
        }
        self.pending = self.next_record_line()?;
        Ok(())
    }
}

impl Stream for DelimitedFileStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.pending.is_some()
    }

    fn next_instance(&mut self) -> Result<Option<Box<dyn Instance>>, StreamError> {
        let Some((line_no, text)) = self.pending.take() else {
            return Ok(None);
        };
        let instance = self.format.parse(&self.header, &text, line_no)?;
        self.emitted += 1;
        self.fill_pending()?;
        Ok(Some(Box::new(instance)))
    }

    fn restart(&mut self) -> Result<(), StreamError> {
        self.lines = Self::open(&self.path)?;
        self.line_no = 0;
        self.emitted = 0;
        self.pending = None;
        for _ in 0..self.offset {
            if self.next_record_line()?.is_none() {
                return Ok(());
            }
        }
        self.fill_pending()
    }

    fn position(&self) -> Option<usize> {
        self.emitted.checked_sub(1).map(|i| self.offset + i)
    }
}
