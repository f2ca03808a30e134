use crate::classifiers::Prediction;
use crate::core::Label;
use crate::core::instances::Instance;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

/// Two-class evaluator for tree predictions.
///
/// Tracks:
/// - overall accuracy, where a sentinel answer counts as wrong;
/// - Cohen's kappa over the decided predictions only;
/// - the share of `Unknown` and of `NoMatch` answers.
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    weight_correct: E,
    decided_correct: E,
    row_kappa: [E; 2],
    col_kappa: [E; 2],
    unknown: E,
    no_match: E,
    right: u64,
    seen: u64,
}

impl<E: Estimator + Default> Default for BasicClassificationEvaluator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new() -> Self {
        Self {
            weight_correct: E::default(),
            decided_correct: E::default(),
            row_kappa: [E::default(), E::default()],
            col_kappa: [E::default(), E::default()],
            unknown: E::default(),
            no_match: E::default(),
            right: 0,
            seen: 0,
        }
    }

    pub fn right(&self) -> u64 {
        self.right
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn wrong(&self) -> u64 {
        self.seen - self.right
    }

    fn kappa(&self) -> f64 {
        let p_o = self.decided_correct.estimation();
        if p_o.is_nan() {
            return 0.0;
        }
        let p_e: f64 = Label::ALL
            .iter()
            .map(|l| {
                self.row_kappa[l.index()].estimation() * self.col_kappa[l.index()].estimation()
            })
            .filter(|p| p.is_finite())
            .sum();
        let denom = 1.0 - p_e;
        if denom.abs() > f64::EPSILON {
            (p_o - p_e) / denom
        } else {
            f64::NAN
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_result(&mut self, example: &dyn Instance, prediction: Prediction) {
        let Some(y) = example.class_value() else {
            return;
        };
        self.seen += 1;

        let hit = prediction == Prediction::Class(y);
        if hit {
            self.right += 1;
        }
        self.weight_correct.add(if hit { 1.0 } else { 0.0 });
        self.unknown
            .add(if prediction == Prediction::Unknown { 1.0 } else { 0.0 });
        self.no_match
            .add(if prediction == Prediction::NoMatch { 1.0 } else { 0.0 });

        let Some(yhat) = prediction.label() else {
            return;
        };
        self.decided_correct.add(if hit { 1.0 } else { 0.0 });
        for label in Label::ALL {
            self.row_kappa[label.index()].add(if label == yhat { 1.0 } else { 0.0 });
            self.col_kappa[label.index()].add(if label == y { 1.0 } else { 0.0 });
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        let unknown = self.unknown.estimation();
        let no_match = self.no_match.estimation();
        vec![
            Measurement::new("accuracy", self.weight_correct.estimation()),
            Measurement::new("kappa", self.kappa()),
            Measurement::new("unknown_rate", if unknown.is_nan() { 0.0 } else { unknown }),
            Measurement::new("no_match_rate", if no_match.is_nan() { 0.0 } else { no_match }),
        ]
    }
}
