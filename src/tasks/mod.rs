mod export;
mod holdout_evaluator;
mod interactive_session;

pub use export::{ExportFormat, export_tree};
pub use holdout_evaluator::{HoldoutEvaluator, shuffled_split};
pub use interactive_session::{InteractiveSession, LookupVerdict, SessionTurn, lookup};
