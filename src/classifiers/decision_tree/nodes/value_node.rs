use crate::classifiers::Prediction;
use crate::classifiers::decision_tree::Path;
use crate::classifiers::decision_tree::nodes::AttributeNode;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};

/// What a value node resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Branch {
    /// The node is final and answers with this prediction.
    Final(Prediction),

    /// The consistent records disagree; the next attribute decides.
    Split(Box<AttributeNode>),
}

/// A level that fixes one value of its parent's attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueNode {
    attribute: usize,
    value: String,
    path: Path,
    branch: Branch,
}

impl ValueNode {
    pub(crate) fn new(attribute: usize, value: String, path: Path, branch: Branch) -> Self {
        Self {
            attribute,
            value,
            path,
            branch,
        }
    }

    pub fn attribute(&self) -> usize {
        self.attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn is_final(&self) -> bool {
        matches!(self.branch, Branch::Final(_))
    }

    /// The stored prediction of a final node.
    pub fn result(&self) -> Option<Prediction> {
        match self.branch {
            Branch::Final(p) => Some(p),
            Branch::Split(_) => None,
        }
    }

    pub fn child(&self) -> Option<&AttributeNode> {
        match &self.branch {
            Branch::Final(_) => None,
            Branch::Split(node) => Some(node),
        }
    }

    pub fn classify(&self, instance: &dyn Instance) -> Prediction {
        match &self.branch {
            Branch::Final(p) => *p,
            Branch::Split(node) => node.classify(instance),
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.child().map_or(0, AttributeNode::node_count)
    }

    pub fn depth(&self) -> usize {
        self.child().map_or(self.path.len(), AttributeNode::depth)
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ValueNode>) {
        match &self.branch {
            Branch::Final(_) => out.push(self),
            Branch::Split(node) => node.collect_leaves(out),
        }
    }

    pub(crate) fn to_dot_info(&self, id: usize, header: &InstanceHeader) -> (Vec<String>, usize) {
        match &self.branch {
            Branch::Final(p) => {
                let info = format!(
                    "\tnode_{id} [ label = \"{p}\", shape = box ];\n",
                    p = p.describe(header)
                );
                (vec![info], id + 1)
            }
            Branch::Split(node) => node.to_dot_info(id, header),
        }
    }
}
