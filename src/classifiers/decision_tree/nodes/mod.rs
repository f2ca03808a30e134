mod attribute_node;
mod value_node;

pub use attribute_node::AttributeNode;
pub use value_node::{Branch, ValueNode};
