use crate::classifiers::decision_tree::TreeError;
use crate::core::Label;
use crate::core::instances::Instance;
use crate::streams::{Stream, StreamError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrences of one attribute value, split by label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub positive: u64,
    pub negative: u64,
}

impl ClassCounts {
    #[inline]
    pub fn add(&mut self, label: Label) {
        match label {
            Label::Positive => self.positive += 1,
            Label::Negative => self.negative += 1,
        }
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.positive + self.negative
    }

    #[inline]
    pub fn majority(&self) -> u64 {
        self.positive.max(self.negative)
    }
}

/// Per-attribute, per-value label counts over the whole dataset.
///
/// Values are kept in a `BTreeMap`, so iteration order is the byte order of
/// the tokens and every consumer sees the same order on every build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeStatistics {
    per_attribute: Vec<BTreeMap<String, ClassCounts>>,
    records: usize,
}

impl AttributeStatistics {
    /// Single full pass over `stream` from its first record.
    pub fn from_stream(stream: &mut dyn Stream) -> Result<Self, TreeError> {
        Self::accumulate(stream, |_, _| {})
    }

    /// Like [`from_stream`](Self::from_stream), handing every validated
    /// record and its label to `on_record` as it goes past.
    pub(crate) fn accumulate<F>(stream: &mut dyn Stream, mut on_record: F) -> Result<Self, TreeError>
    where
        F: FnMut(&dyn Instance, Label),
    {
        let expected = stream.header().number_of_attributes();
        let mut per_attribute = vec![BTreeMap::new(); expected];
        let mut records = 0;

        stream.restart()?;
        while let Some(instance) = next_record(stream, records + 1)? {
            records += 1;
            let label = checked_label(instance.as_ref(), records, expected)?;
            for (attribute, counts) in per_attribute.iter_mut().enumerate() {
                if let Some(value) = instance.value_at_index(attribute) {
                    counts
                        .entry(value.to_string())
                        .or_insert_with(ClassCounts::default)
                        .add(label);
                }
            }
            on_record(instance.as_ref(), label);
        }

        if records == 0 || expected == 0 {
            return Err(TreeError::InsufficientData);
        }
        Ok(Self {
            per_attribute,
            records,
        })
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn number_of_attributes(&self) -> usize {
        self.per_attribute.len()
    }

    pub fn counts(&self, attribute: usize, value: &str) -> Option<ClassCounts> {
        self.per_attribute.get(attribute)?.get(value).copied()
    }

    /// Observed domain of `attribute`, in token order.
    pub fn values_of(&self, attribute: usize) -> impl Iterator<Item = &str> {
        self.per_attribute
            .get(attribute)
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn value_counts(&self, attribute: usize) -> impl Iterator<Item = (&str, ClassCounts)> {
        self.per_attribute
            .get(attribute)
            .into_iter()
            .flat_map(|m| m.iter().map(|(v, c)| (v.as_str(), *c)))
    }

    pub fn total_for(&self, attribute: usize) -> u64 {
        self.value_counts(attribute).map(|(_, c)| c.total()).sum()
    }
}

/// Reads record number `record` (1-based). A record the stream itself
/// rejects for its width is reported by that number, like [`checked_label`].
fn next_record(
    stream: &mut dyn Stream,
    record: usize,
) -> Result<Option<Box<dyn Instance>>, TreeError> {
    stream.next_instance().map_err(|err| match err {
        StreamError::SchemaMismatch {
            expected, found, ..
        } => TreeError::SchemaMismatch {
            record,
            expected,
            found,
        },
        other => TreeError::Stream(other),
    })
}

/// Validates a training record against the schema. `record` is 1-based.
pub(crate) fn checked_label(
    instance: &dyn Instance,
    record: usize,
    expected: usize,
) -> Result<Label, TreeError> {
    let found = instance.number_of_attributes();
    if found != expected {
        return Err(TreeError::SchemaMismatch {
            record,
            expected,
            found,
        });
    }
    instance
        .class_value()
        .ok_or(TreeError::MissingLabel { record })
}
