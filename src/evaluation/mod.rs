mod estimators;
mod evaluators;
mod measurement;
mod report;

pub use estimators::{BasicEstimator, Estimator};
pub use evaluators::{BasicClassificationEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};
pub use measurement::Measurement;
pub use report::{AccuracyReport, ReportFormat, ReportLine};
