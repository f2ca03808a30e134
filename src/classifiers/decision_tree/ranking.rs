use crate::classifiers::decision_tree::AttributeStatistics;
use serde::{Deserialize, Serialize};

/// Score given to an attribute with no observed values: least discriminating.
pub const UNOBSERVED_SCORE: f64 = 1.0;

/// One impurity score per attribute; lower is more discriminating.
///
/// The score of an attribute is the mean, over its observed values, of twice
/// the minority fraction `2 * (1 - majority / total)`, so it lies in `[0, 1]`
/// and is `0` exactly when every value maps to a single label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRanking {
    scores: Vec<f64>,
}

impl AttributeRanking {
    pub fn from_statistics(statistics: &AttributeStatistics) -> Self {
        let scores = (0..statistics.number_of_attributes())
            .map(|attribute| {
                let (sum, observed) = statistics
                    .value_counts(attribute)
                    .filter(|(_, counts)| counts.total() > 0)
                    .fold((0.0, 0usize), |(sum, n), (_, counts)| {
                        let majority = counts.majority() as f64 / counts.total() as f64;
                        (sum + 2.0 * (1.0 - majority), n + 1)
                    });
                if observed == 0 {
                    UNOBSERVED_SCORE
                } else {
                    sum / observed as f64
                }
            })
            .collect();
        Self { scores }
    }

    pub fn from_scores(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn score(&self, attribute: usize) -> Option<f64> {
        self.scores.get(attribute).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The unused attribute with the strictly smallest score; on ties the
    /// smaller index wins. `used` is indexed by attribute.
    pub fn next_unused(&self, used: &[bool]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (attribute, &score) in self.scores.iter().enumerate() {
            if used.get(attribute).copied().unwrap_or(false) {
                continue;
            }
            match best {
                Some(b) if score >= self.scores[b] => {}
                _ => best = Some(attribute),
            }
        }
        best
    }

    /// Consumption order: repeated [`next_unused`](Self::next_unused) picks.
    pub fn order(&self) -> Vec<usize> {
        let mut used = vec![false; self.scores.len()];
        let mut order = Vec::with_capacity(self.scores.len());
        while let Some(attribute) = self.next_unused(&used) {
            used[attribute] = true;
            order.push(attribute);
        }
        order
    }
}
