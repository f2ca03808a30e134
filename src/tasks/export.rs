use crate::classifiers::decision_tree::DecisionTree;
use std::fs;
use std::io::Error;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Dot,
}

pub fn export_tree<P: AsRef<Path>>(tree: &DecisionTree, path: P, fmt: ExportFormat) -> Result<(), Error> {
    match fmt {
        ExportFormat::Json => fs::write(path, tree.to_json()?),
        ExportFormat::Dot => tree.to_dot_file(path),
    }
}
