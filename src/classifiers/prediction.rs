use crate::core::Label;
use crate::core::instance_header::InstanceHeader;
use serde::{Deserialize, Serialize};

/// Outcome of classifying a record.
///
/// The two sentinels are ordinary results, not failures:
/// `Unknown` marks a path that used every attribute without becoming pure,
/// `NoMatch` marks a value the training data never showed in that context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    Class(Label),
    Unknown,
    NoMatch,
}

impl Prediction {
    pub fn label(self) -> Option<Label> {
        match self {
            Prediction::Class(label) => Some(label),
            Prediction::Unknown | Prediction::NoMatch => None,
        }
    }

    pub fn is_decided(self) -> bool {
        self.label().is_some()
    }

    /// Renders the prediction with the dataset's own class tokens.
    pub fn describe(self, header: &InstanceHeader) -> String {
        match self {
            Prediction::Class(label) => header.token_for_label(label).to_string(),
            Prediction::Unknown => "unknown".to_string(),
            Prediction::NoMatch => "no-match".to_string(),
        }
    }
}
