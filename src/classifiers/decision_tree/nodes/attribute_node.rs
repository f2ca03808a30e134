use crate::classifiers::Prediction;
use crate::classifiers::decision_tree::nodes::ValueNode;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A level that tests one attribute and fans out by its observed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeNode {
    attribute: usize,
    remaining: Vec<usize>,
    children: BTreeMap<String, ValueNode>,
}

impl AttributeNode {
    /// `remaining` lists the attributes still unused below this node, in
    /// consumption order.
    pub(crate) fn new(
        attribute: usize,
        remaining: Vec<usize>,
        children: BTreeMap<String, ValueNode>,
    ) -> Self {
        Self {
            attribute,
            remaining,
            children,
        }
    }

    pub fn attribute(&self) -> usize {
        self.attribute
    }

    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    pub fn children(&self) -> impl Iterator<Item = &ValueNode> {
        self.children.values()
    }

    pub fn child_for(&self, value: &str) -> Option<&ValueNode> {
        self.children.get(value)
    }

    pub fn classify(&self, instance: &dyn Instance) -> Prediction {
        instance
            .value_at_index(self.attribute)
            .and_then(|value| self.child_for(value))
            .map_or(Prediction::NoMatch, |child| child.classify(instance))
    }

    /// Attribute and value nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(ValueNode::node_count).sum::<usize>()
    }

    /// Longest path length among the value nodes below.
    pub fn depth(&self) -> usize {
        self.children().map(ValueNode::depth).max().unwrap_or(0)
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ValueNode>) {
        for child in self.children() {
            child.collect_leaves(out);
        }
    }

    pub(crate) fn to_dot_info(&self, id: usize, header: &InstanceHeader) -> (Vec<String>, usize) {
        let mut info = vec![format!(
            "\tnode_{id} [ label = \"{name} ?\" ];\n",
            name = header.attribute_name(self.attribute)
        )];
        let mut next_id = id + 1;
        for (value, child) in &self.children {
            info.push(format!(
                "\tnode_{id} -- node_{next_id} [ label = \"{value}\" ];\n"
            ));
            let (mut child_info, after) = child.to_dot_info(next_id, header);
            info.append(&mut child_info);
            next_id = after;
        }
        (info, next_id)
    }
}
