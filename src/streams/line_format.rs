use crate::core::instance_header::InstanceHeader;
use crate::core::instances::DenseInstance;
use crate::streams::StreamError;
use crate::utils::file_parsing::split_tokens;
use std::sync::Arc;

pub const DEFAULT_PLACEHOLDER: &str = "?";

/// Layout of one delimited text record: the class token sits in column
/// `class_index`, every other column is an attribute value in order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFormat {
    pub delimiter: char,
    pub class_index: usize,
    pub placeholder: String,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            class_index: 0,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl LineFormat {
    pub fn new(delimiter: char, class_index: usize) -> Self {
        Self {
            delimiter,
            class_index,
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn validate(&self, header: &InstanceHeader) -> Result<(), StreamError> {
        if self.class_index > header.number_of_attributes() {
            return Err(StreamError::InvalidLayout(format!(
                "class column {} is outside a record of {} columns",
                self.class_index,
                header.number_of_attributes() + 1
            )));
        }
        if self.delimiter.is_whitespace() && self.delimiter != '\t' {
            return Err(StreamError::InvalidLayout(
                "delimiter cannot be a blank".into(),
            ));
        }
        Ok(())
    }

    /// Parses one record. `line` is the 1-based record number used in errors.
    ///
    /// The placeholder token in the class column yields an unlabelled record.
    pub fn parse(
        &self,
        header: &Arc<InstanceHeader>,
        text: &str,
        line: usize,
    ) -> Result<DenseInstance, StreamError> {
        self.validate(header)?;
        let mut tokens = split_tokens(text, self.delimiter);
        let expected = header.number_of_attributes();
        if tokens.len() != expected + 1 {
            return Err(StreamError::SchemaMismatch {
                line,
                expected,
                found: tokens.len().saturating_sub(1),
            });
        }

        let class_token = tokens.remove(self.class_index);
        let class_value = if class_token == self.placeholder {
            None
        } else {
            Some(
                header
                    .label_for_token(&class_token)
                    .ok_or(StreamError::UnknownLabel {
                        line,
                        token: class_token,
                    })?,
            )
        };

        if let Some(column) = tokens.iter().position(|t| t.is_empty()) {
            return Err(StreamError::EmptyToken { line, column });
        }

        Ok(DenseInstance::new(Arc::clone(header), tokens, class_value))
    }
}
