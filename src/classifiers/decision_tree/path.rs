use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub attribute: usize,
    pub value: String,
}

/// The `(attribute, value)` decisions leading from the root to a node.
///
/// Each attribute appears at most once, so a path is never longer than the
/// schema is wide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    /// A copy of this path with one more step.
    pub fn extended(&self, attribute: usize, value: &str) -> Self {
        debug_assert!(!self.uses(attribute), "attribute {attribute} reused on path");
        let mut steps = self.steps.clone();
        steps.push(PathStep {
            attribute,
            value: value.to_string(),
        });
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn uses(&self, attribute: usize) -> bool {
        self.steps.iter().any(|s| s.attribute == attribute)
    }

    /// True when the record agrees with every step.
    pub fn matches(&self, instance: &dyn Instance) -> bool {
        self.steps
            .iter()
            .all(|s| instance.value_at_index(s.attribute) == Some(s.value.as_str()))
    }

    pub fn matches_values(&self, values: &[String]) -> bool {
        self.steps
            .iter()
            .all(|s| values.get(s.attribute).is_some_and(|v| *v == s.value))
    }

    pub fn describe(&self, header: &InstanceHeader) -> String {
        if self.steps.is_empty() {
            return "(root)".to_string();
        }
        self.steps
            .iter()
            .map(|s| format!("{}={}", header.attribute_name(s.attribute), s.value))
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", s.attribute, s.value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::DenseInstance;
    use std::sync::Arc;

    fn record(values: &[&str]) -> DenseInstance {
        let header = Arc::new(InstanceHeader::anonymous("m".into(), values.len(), "e", "p"));
        DenseInstance::new(header, values.iter().map(|v| v.to_string()).collect(), None)
    }

    #[test]
    fn extended_leaves_the_original_untouched() {
        let root = Path::root();
        let p = root.extended(2, "n");
        assert!(root.is_empty());
        assert_eq!(p.len(), 1);
        assert_eq!(p.last().unwrap().attribute, 2);
        assert!(p.uses(2));
        assert!(!p.uses(0));
    }

    #[test]
    fn matches_requires_every_step() {
        let p = Path::root().extended(0, "x").extended(2, "n");
        assert!(p.matches(&record(&["x", "s", "n"])));
        assert!(!p.matches(&record(&["x", "s", "w"])));
        assert!(!p.matches(&record(&["x"])));
        assert!(Path::root().matches(&record(&["y", "f", "w"])));
    }

    #[test]
    fn matches_values_agrees_with_matches() {
        let p = Path::root().extended(1, "s");
        let values = vec!["x".to_string(), "s".to_string()];
        assert!(p.matches_values(&values));
        assert!(!p.matches_values(&values[..1]));
    }

    #[test]
    fn display_and_describe() {
        let header = InstanceHeader::anonymous("m".into(), 3, "e", "p");
        let p = Path::root().extended(0, "x").extended(2, "n");
        assert_eq!(p.to_string(), "[0=x, 2=n]");
        assert_eq!(p.describe(&header), "att1=x & att3=n");
        assert_eq!(Path::root().describe(&header), "(root)");
    }
}
