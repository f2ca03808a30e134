use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Two-valued classification target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Positive, Label::Negative];

    /// Position of this label in the class attribute's declared values.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Label::Positive => 0,
            Label::Negative => 1,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Label> {
        match index {
            0 => Some(Label::Positive),
            1 => Some(Label::Negative),
            _ => None,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Label::Positive => write!(f, "positive"),
            Label::Negative => write!(f, "negative"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_from_index() {
        for label in Label::ALL {
            assert_eq!(Label::from_index(label.index()), Some(label));
        }
        assert_eq!(Label::from_index(2), None);
    }

    #[test]
    fn display_names_the_class() {
        assert_eq!(Label::Positive.to_string(), "positive");
        assert_eq!(Label::Negative.to_string(), "negative");
    }
}
