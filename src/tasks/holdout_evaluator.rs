use crate::classifiers::decision_tree::{BuildEvent, DecisionTree, TreeBuilder, TreeError, TreeOptions};
use crate::evaluation::{AccuracyReport, PerformanceEvaluator};
use crate::streams::{InstanceListStream, Stream, StreamError};
use std::sync::mpsc::Sender;

/// Build on one stream, then score every labelled record of another.
pub struct HoldoutEvaluator {
    train: Box<dyn Stream>,
    test: Box<dyn Stream>,
    evaluator: Box<dyn PerformanceEvaluator>,
    options: TreeOptions,
    first_test_index: usize,

    tree: Option<DecisionTree>,
    report: Option<AccuracyReport>,
    progress_tx: Option<Sender<BuildEvent>>,
}

impl HoldoutEvaluator {
    /// Report lines are numbered by the test stream's dataset positions.
    /// `first_test_index` numbers them for streams that track none.
    pub fn new(
        train: Box<dyn Stream>,
        test: Box<dyn Stream>,
        evaluator: Box<dyn PerformanceEvaluator>,
        options: TreeOptions,
        first_test_index: usize,
    ) -> Self {
        Self {
            train,
            test,
            evaluator,
            options,
            first_test_index,
            tree: None,
            report: None,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: Sender<BuildEvent>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<&AccuracyReport, TreeError> {
        let mut builder = TreeBuilder::new(self.train.as_mut()).with_options(self.options);
        if let Some(tx) = self.progress_tx.clone() {
            builder = builder.with_progress(tx);
        }
        let tree = builder.build()?;

        self.evaluator.reset();
        let mut report = AccuracyReport::new(tree.header().clone());
        self.test.restart()?;
        let mut position = self.first_test_index;
        while let Some(instance) = self.test.next_instance()? {
            let index = self.test.position().unwrap_or(position);
            position += 1;
            let Some(expected) = instance.class_value() else {
                continue;
            };
            let prediction = tree.classify(instance.as_ref());
            self.evaluator.add_result(instance.as_ref(), prediction);
            report.record(index, expected, prediction);
        }

        self.tree = Some(tree);
        Ok(self.report.insert(report))
    }

    pub fn tree(&self) -> Option<&DecisionTree> {
        self.tree.as_ref()
    }

    pub fn report(&self) -> Option<&AccuracyReport> {
        self.report.as_ref()
    }

    pub fn evaluator(&self) -> &dyn PerformanceEvaluator {
        self.evaluator.as_ref()
    }
}

/// Loads `source` into memory, shuffles it when `seed` is given, and splits
/// it into `train_size` training records and at most `test_size` test records.
pub fn shuffled_split(
    source: &mut dyn Stream,
    train_size: usize,
    test_size: Option<usize>,
    seed: Option<u64>,
) -> Result<(InstanceListStream, InstanceListStream), StreamError> {
    let mut all = InstanceListStream::collect_from(source)?;
    if let Some(seed) = seed {
        all.shuffle(seed);
    }
    let (train, mut test) = all.split_at(train_size);
    if let Some(n) = test_size {
        test.truncate(n);
    }
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{BasicClassificationEvaluator, BasicEstimator, PerformanceEvaluatorExt};
    use crate::testing::VecStream;
    use std::sync::mpsc::channel;

    fn evaluator() -> Box<dyn PerformanceEvaluator> {
        Box::new(BasicClassificationEvaluator::<BasicEstimator>::new())
    }

    #[test]
    fn scores_the_test_window() {
        let train = VecStream::new(3, &["e,x,s,n", "e,x,s,n", "p,y,s,n"]);
        let test = VecStream::new(3, &["e,x,f,w", "p,y,f,n", "e,z,s,n", "?,x,s,n", "e,y,s,n"]);
        let mut h = HoldoutEvaluator::new(
            Box::new(train),
            Box::new(test),
            evaluator(),
            TreeOptions::default(),
            4000,
        );
        let report = h.run().unwrap();

        assert_eq!(report.total(), 4);
        assert_eq!(report.right(), 2);
        let indices: Vec<usize> = report.lines().iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![4000, 4001, 4002, 4004]);
        assert_eq!(
            report.summary_line(),
            "Out of 4 predictions, 2 are right, standing at a 50% rate of accuracy."
        );

        assert!((h.evaluator().metric("accuracy").unwrap() - 0.5).abs() < 1e-12);
        assert!((h.evaluator().metric("no_match_rate").unwrap() - 0.25).abs() < 1e-12);
        assert_eq!(h.tree().unwrap().node_count(), 3);
    }

    #[test]
    fn build_failure_is_reported() {
        let mut h = HoldoutEvaluator::new(
            Box::new(VecStream::new(2, &[])),
            Box::new(VecStream::new(2, &["e,a,b"])),
            evaluator(),
            TreeOptions::default(),
            0,
        );
        assert!(matches!(h.run(), Err(TreeError::InsufficientData)));
        assert!(h.report().is_none());
    }

    #[test]
    fn progress_is_forwarded_to_the_builder() {
        let (tx, rx) = channel();
        let mut h = HoldoutEvaluator::new(
            Box::new(VecStream::new(1, &["e,a", "p,b"])),
            Box::new(VecStream::new(1, &["e,a"])),
            evaluator(),
            TreeOptions::default(),
            0,
        )
        .with_progress(tx);
        h.run().unwrap();
        drop(h);
        assert!(rx.iter().any(|e| matches!(e, BuildEvent::Finished { .. })));
    }

    #[test]
    fn shuffled_split_is_deterministic_and_sized() {
        let rows = ["e,a", "p,b", "e,c", "p,d", "e,e", "p,f"];
        let (a_train, a_test) =
            shuffled_split(&mut VecStream::new(1, &rows), 4, Some(1), Some(7)).unwrap();
        let (b_train, _) = shuffled_split(&mut VecStream::new(1, &rows), 4, None, Some(7)).unwrap();
        assert_eq!(a_train.len(), 4);
        assert_eq!(a_test.len(), 1);

        let values = |mut s: InstanceListStream| {
            let mut out = Vec::new();
            while let Some(i) = s.next_instance().unwrap() {
                out.push(i.to_vec());
            }
            out
        };
        assert_eq!(values(a_train), values(b_train));
    }

    #[test]
    fn shuffled_report_lines_name_source_rows() {
        let rows = [
            "e,a0", "p,a1", "e,a2", "p,a3", "e,a4", "p,a5", "e,a6", "p,a7", "e,a8", "p,a9",
        ];
        let (train, test) =
            shuffled_split(&mut VecStream::new(1, &rows), 6, None, Some(11)).unwrap();
        let mut expected = Vec::new();
        let mut test = test;
        while let Some(i) = test.next_instance().unwrap() {
            expected.push((test.position().unwrap(), i.to_vec().remove(0)));
        }

        let mut h = HoldoutEvaluator::new(
            Box::new(train),
            Box::new(test),
            evaluator(),
            TreeOptions::default(),
            6,
        );
        let report = h.run().unwrap();
        let indices: Vec<usize> = report.lines().iter().map(|l| l.index).collect();
        assert_eq!(indices, expected.iter().map(|(p, _)| *p).collect::<Vec<_>>());
        for (position, value) in expected {
            assert_eq!(value, format!("a{position}"));
        }
    }

    #[test]
    fn unshuffled_split_keeps_order() {
        let rows = ["e,a", "p,b", "e,c"];
        let (mut train, mut test) =
            shuffled_split(&mut VecStream::new(1, &rows), 2, None, None).unwrap();
        assert_eq!(train.next_instance().unwrap().unwrap().to_vec(), vec!["a"]);
        assert_eq!(test.next_instance().unwrap().unwrap().to_vec(), vec!["c"]);
    }
}
