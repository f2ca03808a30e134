pub mod classifier;
pub mod decision_tree;
mod prediction;

pub use classifier::Classifier;
pub use prediction::Prediction;
