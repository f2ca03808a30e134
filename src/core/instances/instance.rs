use crate::core::Label;
use crate::core::instance_header::InstanceHeader;

/// A single record: one categorical token per attribute plus an optional label.
///
/// The label is absent for records that are only presented for
/// classification; the tree never reads it on that path.
pub trait Instance {
    fn value_at_index(&self, index: usize) -> Option<&str>;

    fn number_of_attributes(&self) -> usize;

    fn class_value(&self) -> Option<Label>;

    fn to_vec(&self) -> Vec<String>;

    fn header(&self) -> &InstanceHeader;

    /// True when both records carry the same tokens at every position.
    fn has_same_values_as(&self, other: &dyn Instance) -> bool {
        let n = self.number_of_attributes();
        n == other.number_of_attributes()
            && (0..n).all(|i| self.value_at_index(i) == other.value_at_index(i))
    }
}
