//! Categorical decision tree with alternating attribute and value levels.
//!
//! Construction ranks attributes once from whole-dataset statistics, then
//! grows the tree depth-first. Every value node re-derives its purity by
//! scanning the dataset for the records consistent with its path.

mod builder;
mod decision_tree;
mod error;
mod nodes;
mod path;
mod ranking;
mod statistics;

pub use builder::{BuildEvent, TreeBuilder, TreeOptions};
pub use decision_tree::{DecisionTree, build, classify};
pub use error::TreeError;
pub use nodes::{AttributeNode, Branch, ValueNode};
pub use path::{Path, PathStep};
pub use ranking::AttributeRanking;
pub use statistics::{AttributeStatistics, ClassCounts};
