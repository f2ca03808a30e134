use crate::core::Label;
use crate::core::attributes::NominalAttribute;
use serde::{Deserialize, Serialize};

/// Schema shared by every record of a dataset.
///
/// `attributes` are the categorical columns in position order; the class
/// attribute is kept apart and always declares exactly two values, the
/// positive token first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<NominalAttribute>,
    pub class_attribute: NominalAttribute,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<NominalAttribute>,
        positive_label: &str,
        negative_label: &str,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_attribute: NominalAttribute::with_values(
                "class".to_string(),
                vec![positive_label.to_string(), negative_label.to_string()],
            ),
        }
    }

    /// Header with `count` attributes named `att1..attN`, for headerless files.
    pub fn anonymous(
        relation_name: String,
        count: usize,
        positive_label: &str,
        negative_label: &str,
    ) -> InstanceHeader {
        let attributes = (1..=count)
            .map(|i| NominalAttribute::new(format!("att{i}")))
            .collect();
        Self::new(relation_name, attributes, positive_label, negative_label)
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute> {
        self.attributes.get(index)
    }

    pub fn attribute_name(&self, index: usize) -> String {
        self.attribute_at_index(index)
            .map(|a| a.name().to_string())
            .unwrap_or_else(|| format!("#{index}"))
    }

    pub fn class_attribute(&self) -> &NominalAttribute {
        &self.class_attribute
    }

    pub fn label_for_token(&self, token: &str) -> Option<Label> {
        self.class_attribute
            .index_of_value(token)
            .and_then(Label::from_index)
    }

    pub fn token_for_label(&self, label: Label) -> &str {
        self.class_attribute.value_at(label.index()).unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_header_names_attributes_in_order() {
        let h = InstanceHeader::anonymous("mushrooms".into(), 3, "e", "p");
        assert_eq!(h.number_of_attributes(), 3);
        assert_eq!(h.attribute_name(0), "att1");
        assert_eq!(h.attribute_name(2), "att3");
        assert_eq!(h.attribute_name(7), "#7");
        assert_eq!(h.relation_name(), "mushrooms");
    }

    #[test]
    fn class_tokens_map_to_labels() {
        let h = InstanceHeader::anonymous("mushrooms".into(), 1, "e", "p");
        assert_eq!(h.label_for_token("e"), Some(Label::Positive));
        assert_eq!(h.label_for_token("p"), Some(Label::Negative));
        assert_eq!(h.label_for_token("?"), None);
        assert_eq!(h.token_for_label(Label::Negative), "p");
    }
}
