use crate::classifiers::Prediction;
use crate::core::instances::Instance;
use crate::evaluation::Measurement;
use std::collections::HashMap;

/// Accumulates predictions against ground truth and summarises them.
pub trait PerformanceEvaluator {
    fn reset(&mut self);

    /// Records one prediction. Records without a class label are skipped.
    fn add_result(&mut self, example: &dyn Instance, prediction: Prediction);

    fn performance(&self) -> Vec<Measurement>;
}

pub trait PerformanceEvaluatorExt {
    /// `(name, value)` for each requested metric, in request order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: PerformanceEvaluator + ?Sized> PerformanceEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map: HashMap<_, _> = self
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
