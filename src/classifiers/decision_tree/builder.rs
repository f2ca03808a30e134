use crate::classifiers::Prediction;
use crate::classifiers::decision_tree::statistics::checked_label;
use crate::classifiers::decision_tree::{
    AttributeNode, AttributeRanking, AttributeStatistics, Branch, DecisionTree, Path, TreeError,
    ValueNode,
};
use crate::core::Label;
use crate::streams::Stream;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Keep a copy of the records taken during the statistics pass and rescan
    /// that copy instead of restarting the stream at every value node.
    pub cache_records: bool,
    /// Echo build progress on stderr.
    pub verbose: bool,
}

/// Progress notifications sent while a tree grows.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    StatisticsReady { records: usize, attributes: usize },
    AttributeChosen { attribute: usize, depth: usize },
    ValueResolved { path: Path, result: Option<Prediction> },
    Finished { nodes: usize, depth: usize },
}

impl Display for BuildEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildEvent::StatisticsReady {
                records,
                attributes,
            } => write!(f, "scanned {records} records over {attributes} attributes"),
            BuildEvent::AttributeChosen { attribute, depth } => {
                write!(f, "depth {depth}: splitting on attribute {attribute}")
            }
            BuildEvent::ValueResolved { path, result } => match result {
                Some(p) => write!(f, "{path} final ({p:?})"),
                None => write!(f, "{path} needs a further split"),
            },
            BuildEvent::Finished { nodes, depth } => {
                write!(f, "tree complete: {nodes} nodes, depth {depth}")
            }
        }
    }
}

/// Grows a [`DecisionTree`] from a restartable stream.
pub struct TreeBuilder<'a> {
    stream: &'a mut dyn Stream,
    options: TreeOptions,
    progress_tx: Option<Sender<BuildEvent>>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(stream: &'a mut dyn Stream) -> Self {
        Self {
            stream,
            options: TreeOptions::default(),
            progress_tx: None,
        }
    }

    pub fn with_options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, tx: Sender<BuildEvent>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn build(self) -> Result<DecisionTree, TreeError> {
        let TreeBuilder {
            stream,
            options,
            progress_tx,
        } = self;

        let header = stream.header().clone();
        let mut cached = Vec::new();
        let statistics = if options.cache_records {
            AttributeStatistics::accumulate(stream, |instance, label| {
                cached.push(CachedRecord {
                    values: instance.to_vec(),
                    label,
                })
            })?
        } else {
            AttributeStatistics::from_stream(stream)?
        };
        let ranking = AttributeRanking::from_statistics(&statistics);
        let progress = Progress {
            tx: progress_tx,
            verbose: options.verbose,
        };
        progress.emit(BuildEvent::StatisticsReady {
            records: statistics.records(),
            attributes: statistics.number_of_attributes(),
        });

        let source = if options.cache_records {
            RecordSource::Cached(cached)
        } else {
            RecordSource::Stream(stream)
        };
        let root = {
            let mut growth = Growth {
                source,
                statistics: &statistics,
                expected: header.number_of_attributes(),
                progress: &progress,
            };
            growth.attribute_node(&Path::root(), &ranking.order())?
        };

        progress.emit(BuildEvent::Finished {
            nodes: root.node_count(),
            depth: root.depth(),
        });
        Ok(DecisionTree::from_parts(header, statistics, ranking, root))
    }
}

struct Progress {
    tx: Option<Sender<BuildEvent>>,
    verbose: bool,
}

impl Progress {
    fn emit(&self, event: BuildEvent) {
        if self.verbose {
            eprintln!("{event}");
        }
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

struct CachedRecord {
    values: Vec<String>,
    label: Label,
}

enum RecordSource<'s> {
    Stream(&'s mut dyn Stream),
    Cached(Vec<CachedRecord>),
}

/// Label agreement among the records consistent with a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purity {
    Unanimous(Label),
    Mixed,
    Empty,
}

#[derive(Default)]
struct PurityTracker {
    first: Option<Label>,
    mixed: bool,
}

impl PurityTracker {
    /// Returns true once two labels have disagreed; scanning can stop there.
    fn observe(&mut self, label: Label) -> bool {
        match self.first {
            None => self.first = Some(label),
            Some(first) if first != label => self.mixed = true,
            Some(_) => {}
        }
        self.mixed
    }

    fn finish(self) -> Purity {
        match (self.first, self.mixed) {
            (_, true) => Purity::Mixed,
            (Some(label), false) => Purity::Unanimous(label),
            (None, false) => Purity::Empty,
        }
    }
}

impl RecordSource<'_> {
    /// Full rescan for the records consistent with `path`.
    fn purity(&mut self, path: &Path, expected: usize) -> Result<Purity, TreeError> {
        let mut tracker = PurityTracker::default();
        match self {
            RecordSource::Stream(stream) => {
                stream.restart()?;
                let mut record = 0;
                while let Some(instance) = stream.next_instance()? {
                    record += 1;
                    let label = checked_label(instance.as_ref(), record, expected)?;
                    if path.matches(instance.as_ref()) && tracker.observe(label) {
                        break;
                    }
                }
            }
            RecordSource::Cached(records) => {
                for r in records.iter().filter(|r| path.matches_values(&r.values)) {
                    if tracker.observe(r.label) {
                        break;
                    }
                }
            }
        }
        Ok(tracker.finish())
    }
}

struct Growth<'s, 'p> {
    source: RecordSource<'s>,
    statistics: &'p AttributeStatistics,
    expected: usize,
    progress: &'p Progress,
}

impl Growth<'_, '_> {
    /// `remaining` is the unused attributes in consumption order; its head is
    /// the attribute this node splits on.
    fn attribute_node(
        &mut self,
        path: &Path,
        remaining: &[usize],
    ) -> Result<AttributeNode, TreeError> {
        let Some((&attribute, rest)) = remaining.split_first() else {
            return Err(TreeError::InsufficientData);
        };
        self.progress.emit(BuildEvent::AttributeChosen {
            attribute,
            depth: path.len(),
        });

        let statistics = self.statistics;
        let mut children = BTreeMap::new();
        for value in statistics.values_of(attribute) {
            let child = self.value_node(path.extended(attribute, value), rest)?;
            children.insert(value.to_string(), child);
        }
        Ok(AttributeNode::new(attribute, rest.to_vec(), children))
    }

    fn value_node(&mut self, path: Path, remaining: &[usize]) -> Result<ValueNode, TreeError> {
        let branch = match self.source.purity(&path, self.expected)? {
            Purity::Unanimous(label) => Branch::Final(Prediction::Class(label)),
            Purity::Empty => Branch::Final(Prediction::NoMatch),
            Purity::Mixed if remaining.is_empty() => Branch::Final(Prediction::Unknown),
            Purity::Mixed => Branch::Split(Box::new(self.attribute_node(&path, remaining)?)),
        };
        self.progress.emit(BuildEvent::ValueResolved {
            path: path.clone(),
            result: match &branch {
                Branch::Final(p) => Some(*p),
                Branch::Split(_) => None,
            },
        });

        let (attribute, value) = match path.last() {
            Some(step) => (step.attribute, step.value.clone()),
            None => return Err(TreeError::InsufficientData),
        };
        Ok(ValueNode::new(attribute, value, path, branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::VecStream;
    use std::sync::mpsc::channel;

    fn tracker_over(labels: &[Label]) -> Purity {
        let mut t = PurityTracker::default();
        for &l in labels {
            if t.observe(l) {
                break;
            }
        }
        t.finish()
    }

    #[test]
    fn purity_tracker_outcomes() {
        assert_eq!(tracker_over(&[]), Purity::Empty);
        assert_eq!(
            tracker_over(&[Label::Negative, Label::Negative]),
            Purity::Unanimous(Label::Negative)
        );
        assert_eq!(
            tracker_over(&[Label::Positive, Label::Negative, Label::Positive]),
            Purity::Mixed
        );
    }

    #[test]
    fn stream_rescans_once_per_value_node() {
        let mut s = VecStream::new(3, &["e,x,s,n", "e,x,s,n", "p,y,s,n"]);
        let tree = TreeBuilder::new(&mut s).build().unwrap();
        let value_nodes = tree.node_count() - 1;
        assert_eq!(value_nodes, 2);
        // one restart for the statistics pass, one per value node
        assert_eq!(s.restarts(), 1 + value_nodes);
    }

    #[test]
    fn cached_records_skip_the_rescans() {
        let mut s = VecStream::new(3, &["e,x,s,n", "e,x,s,n", "p,y,s,n"]);
        let options = TreeOptions {
            cache_records: true,
            ..TreeOptions::default()
        };
        TreeBuilder::new(&mut s).with_options(options).build().unwrap();
        assert_eq!(s.restarts(), 1);
    }

    #[test]
    fn progress_reports_statistics_nodes_and_completion() {
        let (tx, rx) = channel();
        let mut s = VecStream::new(2, &["e,a,x", "p,a,y", "e,b,x"]);
        TreeBuilder::new(&mut s).with_progress(tx).build().unwrap();
        let events: Vec<BuildEvent> = rx.iter().collect();

        assert_eq!(
            events.first(),
            Some(&BuildEvent::StatisticsReady {
                records: 3,
                attributes: 2
            })
        );
        assert!(matches!(events.last(), Some(BuildEvent::Finished { .. })));
        let chosen = events
            .iter()
            .filter(|e| matches!(e, BuildEvent::AttributeChosen { .. }))
            .count();
        let resolved = events
            .iter()
            .filter(|e| matches!(e, BuildEvent::ValueResolved { .. }))
            .count();
        assert!(chosen >= 1);
        assert!(resolved >= 2);
    }

    #[test]
    fn build_event_display() {
        let e = BuildEvent::ValueResolved {
            path: Path::root().extended(0, "x"),
            result: Some(Prediction::Unknown),
        };
        assert_eq!(e.to_string(), "[0=x] final (Unknown)");
        let e = BuildEvent::Finished { nodes: 5, depth: 2 };
        assert_eq!(e.to_string(), "tree complete: 5 nodes, depth 2");
    }
}
