use crate::core::Label;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<String>,
    pub class_value: Option<Label>,
}

impl DenseInstance {
    pub fn new(
        header: Arc<InstanceHeader>,
        values: Vec<String>,
        class_value: Option<Label>,
    ) -> DenseInstance {
        DenseInstance {
            header,
            values,
            class_value,
        }
    }
}

impl Instance for DenseInstance {
    fn value_at_index(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    fn number_of_attributes(&self) -> usize {
        self.values.len()
    }

    fn class_value(&self) -> Option<Label> {
        self.class_value
    }

    fn to_vec(&self) -> Vec<String> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}
