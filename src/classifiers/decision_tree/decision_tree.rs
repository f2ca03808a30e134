use crate::classifiers::decision_tree::{
    AttributeNode, AttributeRanking, AttributeStatistics, Path, TreeBuilder, TreeError,
    TreeOptions, ValueNode,
};
use crate::classifiers::{Classifier, Prediction};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::streams::Stream;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A built tree, together with the statistics and ranking that shaped it.
///
/// Owns its nodes outright and keeps no handle on the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    header: InstanceHeader,
    statistics: AttributeStatistics,
    ranking: AttributeRanking,
    root: AttributeNode,
}

impl DecisionTree {
    pub fn build(stream: &mut dyn Stream) -> Result<Self, TreeError> {
        TreeBuilder::new(stream).build()
    }

    pub fn build_with(stream: &mut dyn Stream, options: TreeOptions) -> Result<Self, TreeError> {
        TreeBuilder::new(stream).with_options(options).build()
    }

    pub(crate) fn from_parts(
        header: InstanceHeader,
        statistics: AttributeStatistics,
        ranking: AttributeRanking,
        root: AttributeNode,
    ) -> Self {
        Self {
            header,
            statistics,
            ranking,
            root,
        }
    }

    pub fn classify(&self, instance: &dyn Instance) -> Prediction {
        self.root.classify(instance)
    }

    pub fn header(&self) -> &InstanceHeader {
        &self.header
    }

    pub fn statistics(&self) -> &AttributeStatistics {
        &self.statistics
    }

    pub fn ranking(&self) -> &AttributeRanking {
        &self.ranking
    }

    pub fn root(&self) -> &AttributeNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Every final node's path with the prediction stored there, in
    /// depth-first token order.
    pub fn leaf_paths(&self) -> Vec<(&Path, Prediction)> {
        let mut leaves: Vec<&ValueNode> = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
            .into_iter()
            .filter_map(|leaf| leaf.result().map(|p| (leaf.path(), p)))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Graphviz rendering: attribute nodes as ellipses, final nodes as boxes,
    /// edges labelled with the attribute value.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph DecisionTree {\n");
        for row in self.root.to_dot_info(0, &self.header).0 {
            dot.push_str(&row);
        }
        dot.push_str("}\n");
        dot
    }

    pub fn to_dot_file<P>(&self, path: P) -> std::io::Result<()>
    where
        P: AsRef<std::path::Path>,
    {
        let mut f = File::create(path)?;
        f.write_all(self.to_dot().as_bytes())?;
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, instance: &dyn Instance) -> Prediction {
        self.classify(instance)
    }
}

/// Builds a tree with default options.
pub fn build(stream: &mut dyn Stream) -> Result<DecisionTree, TreeError> {
    DecisionTree::build(stream)
}

pub fn classify(model: &DecisionTree, instance: &dyn Instance) -> Prediction {
    model.classify(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::decision_tree::Branch;
    use crate::core::Label;
    use crate::core::instances::DenseInstance;
    use crate::testing::VecStream;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn query(tree: &DecisionTree, values: &[&str]) -> Prediction {
        let header = Arc::new(tree.header().clone());
        let record = DenseInstance::new(header, values.iter().map(|v| v.to_string()).collect(), None);
        tree.classify(&record)
    }

    fn three_records() -> VecStream {
        VecStream::new(3, &["e,x,s,n", "e,x,s,n", "p,y,s,n"])
    }

    fn tangled() -> VecStream {
        VecStream::new(
            3,
            &[
                "e,x,s,n", "p,x,s,w", "e,y,f,n", "p,y,s,n", "e,x,f,w", "p,b,s,n", "e,b,f,w",
                "p,x,f,n", "e,y,s,w",
            ],
        )
    }

    fn assert_paths_never_repeat(node: &AttributeNode, seen: &mut Vec<usize>) {
        assert!(!seen.contains(&node.attribute()));
        seen.push(node.attribute());
        for child in node.children() {
            assert_eq!(child.attribute(), node.attribute());
            assert_eq!(child.path().last().unwrap().value, child.value());
            let attrs: HashSet<usize> = child.path().steps().iter().map(|s| s.attribute).collect();
            assert_eq!(attrs.len(), child.path().len());
            if let Branch::Split(next) = child.branch() {
                assert_paths_never_repeat(next, seen);
            }
        }
        seen.pop();
    }

    #[test]
    fn three_record_example() {
        let tree = build(&mut three_records()).unwrap();

        assert_eq!(tree.root().attribute(), 0);
        let values: Vec<&str> = tree.root().children().map(ValueNode::value).collect();
        assert_eq!(values, vec!["x", "y"]);
        assert!(tree.root().children().all(ValueNode::is_final));

        assert_eq!(query(&tree, &["x", "s", "n"]), Prediction::Class(Label::Positive));
        assert_eq!(query(&tree, &["y", "s", "n"]), Prediction::Class(Label::Negative));
        assert_eq!(query(&tree, &["z", "s", "n"]), Prediction::NoMatch);
    }

    #[test]
    fn exhausted_ambiguous_path_is_unknown() {
        let mut s = VecStream::new(1, &["e,a", "p,a"]);
        let tree = build(&mut s).unwrap();
        let child = tree.root().child_for("a").unwrap();
        assert_eq!(child.result(), Some(Prediction::Unknown));
        assert_eq!(query(&tree, &["a"]), Prediction::Unknown);
    }

    #[test]
    fn path_exhausted_after_intermediate_splits_is_unknown() {
        // Ranking is att3 (0.5), then att1 and att2 tied at 5/6.
        let mut s = VecStream::new(3, &["e,x,s,n", "p,x,s,n", "e,y,s,n", "p,y,f,n", "e,y,f,w"]);
        let tree = build(&mut s).unwrap();
        assert_eq!(tree.root().attribute(), 2);

        let n = tree.root().child_for("n").unwrap().child().unwrap();
        assert_eq!(n.attribute(), 0);
        let nx = n.child_for("x").unwrap().child().unwrap();
        assert_eq!(nx.attribute(), 1);
        assert_eq!(nx.child_for("s").unwrap().result(), Some(Prediction::Unknown));
        assert_eq!(nx.child_for("f").unwrap().result(), Some(Prediction::NoMatch));

        assert_eq!(query(&tree, &["x", "s", "n"]), Prediction::Unknown);
        assert_eq!(query(&tree, &["x", "f", "n"]), Prediction::NoMatch);
        assert_eq!(query(&tree, &["y", "f", "n"]), Prediction::Class(Label::Negative));
        assert_eq!(query(&tree, &["y", "s", "w"]), Prediction::Class(Label::Positive));
    }

    #[test]
    fn unreachable_value_combination_is_no_match() {
        // att2 = u never co-occurs with att1 = a, yet children span the whole domain.
        let mut s = VecStream::new(
            2,
            &["e,a,s", "p,a,t", "e,b,s", "e,b,t", "e,b,u", "p,c,s", "p,c,t", "p,c,u"],
        );
        let tree = build(&mut s).unwrap();
        assert_eq!(tree.root().attribute(), 0);
        let a = tree.root().child_for("a").unwrap();
        let split = a.child().unwrap();
        assert_eq!(split.attribute(), 1);
        assert_eq!(split.child_for("u").unwrap().result(), Some(Prediction::NoMatch));
        assert_eq!(query(&tree, &["a", "u"]), Prediction::NoMatch);
        assert_eq!(query(&tree, &["a", "s"]), Prediction::Class(Label::Positive));
    }

    #[test]
    fn builds_are_idempotent() {
        let a = build(&mut tangled()).unwrap();
        let b = build(&mut tangled()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cached_rescans_grow_the_same_tree() {
        let streamed = build(&mut tangled()).unwrap();
        let options = TreeOptions {
            cache_records: true,
            ..TreeOptions::default()
        };
        let cached = DecisionTree::build_with(&mut tangled(), options).unwrap();
        assert_eq!(streamed, cached);
    }

    #[test]
    fn no_attribute_repeats_along_a_path() {
        let tree = build(&mut tangled()).unwrap();
        assert_paths_never_repeat(tree.root(), &mut Vec::new());
        assert!(tree.depth() <= 3);
    }

    #[test]
    fn final_nodes_are_sound() {
        let rows = [
            "e,x,s,n", "p,x,s,w", "e,y,f,n", "p,y,s,n", "e,x,f,w", "p,b,s,n", "e,b,f,w",
            "p,x,f,n", "e,y,s,w",
        ];
        let tree = build(&mut tangled()).unwrap();
        for (path, prediction) in tree.leaf_paths() {
            let Prediction::Class(label) = prediction else {
                continue;
            };
            let token = if label == Label::Positive { "e" } else { "p" };
            for row in rows {
                let mut tokens = row.split(',');
                let row_label = tokens.next().unwrap();
                let values: Vec<String> = tokens.map(str::to_string).collect();
                if path.matches_values(&values) {
                    assert_eq!(row_label, token, "{path} disagrees with {row}");
                }
            }
        }
    }

    #[test]
    fn unambiguous_training_records_are_reproduced() {
        let mut s = tangled();
        let tree = build(&mut s).unwrap();
        s.restart().unwrap();
        while let Some(record) = s.next_instance().unwrap() {
            let expected = record.class_value().unwrap();
            assert_eq!(tree.classify(record.as_ref()), Prediction::Class(expected));
        }
    }

    #[test]
    fn classifier_trait_matches_inherent_classify() {
        let tree = build(&mut three_records()).unwrap();
        let header = Arc::new(tree.header().clone());
        let record = DenseInstance::new(header, vec!["y".into(), "s".into(), "n".into()], None);
        assert_eq!(tree.predict(&record), classify(&tree, &record));
    }

    #[test]
    fn record_without_the_attribute_is_no_match() {
        let tree = build(&mut three_records()).unwrap();
        assert_eq!(query(&tree, &[]), Prediction::NoMatch);
    }

    #[test]
    fn counts_and_depth() {
        let tree = build(&mut three_records()).unwrap();
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_paths().len(), 2);
    }

    #[test]
    fn json_round_trip_preserves_the_tree() {
        let tree = build(&mut tangled()).unwrap();
        let restored = DecisionTree::from_json(&tree.to_json().unwrap()).unwrap();
        assert_eq!(tree, restored);
    }

    #[test]
    fn dot_output_names_attributes_and_classes() {
        let tree = build(&mut three_records()).unwrap();
        let dot = tree.to_dot();
        assert!(dot.starts_with("graph DecisionTree {"));
        assert!(dot.contains("att1 ?"));
        assert!(dot.contains("label = \"x\""));
        assert!(dot.contains("label = \"e\", shape = box"));

        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.dot");
        tree.to_dot_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), dot);
    }
}
