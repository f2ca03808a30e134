use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::{Stream, StreamError};
use crate::testing::dummies::mushroom_header;
use std::sync::Arc;

/// In-memory stream over comma rows `label,v1,v2,...`.
///
/// The label token is `e`, `p` or `?` (unlabelled). Rows are not checked
/// against the schema, so short or long rows reach the consumer as-is.
pub struct VecStream {
    pub header: Arc<InstanceHeader>,
    rows: Vec<(Option<String>, Vec<String>)>,
    idx: usize,
    restarts: usize,
}

impl VecStream {
    pub fn new(num_attributes: usize, rows: &[&str]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                let mut tokens = row.split(',').map(str::to_string);
                let label = tokens.next().filter(|t| t != "?");
                (label, tokens.collect())
            })
            .collect();
        Self {
            header: mushroom_header(num_attributes),
            rows,
            idx: 0,
            restarts: 0,
        }
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl Stream for VecStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.rows.len()
    }

    fn next_instance(&mut self) -> Result<Option<Box<dyn Instance>>, StreamError> {
        let Some((label, values)) = self.rows.get(self.idx) else {
            return Ok(None);
        };
        self.idx += 1;
        let class = label
            .as_deref()
            .and_then(|t| self.header.label_for_token(t));
        Ok(Some(Box::new(DenseInstance::new(
            Arc::clone(&self.header),
            values.clone(),
            class,
        ))))
    }

    fn restart(&mut self) -> Result<(), StreamError> {
        self.idx = 0;
        self.restarts += 1;
        Ok(())
    }
}
