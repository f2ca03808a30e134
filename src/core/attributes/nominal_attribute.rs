use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A categorical column of the dataset.
///
/// `values` holds the *declared* domain, which may be empty: the observed
/// domain of an attribute is whatever the training data contains, and is
/// tracked by the attribute statistics rather than by the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: String) -> NominalAttribute {
        NominalAttribute {
            name,
            values: Vec::new(),
            label_to_index: HashMap::new(),
        }
    }

    pub fn with_values(name: String, values: Vec<String>) -> NominalAttribute {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index_of_value(&self, v: &str) -> Option<usize> {
        self.label_to_index.get(v).copied()
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}
