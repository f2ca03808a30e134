use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::{Stream, StreamError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// In-memory stream over owned records.
///
/// Every record keeps the dataset position it was loaded from, so shuffles
/// and splits still report where a record came from.
pub struct InstanceListStream {
    header: Arc<InstanceHeader>,
    instances: Vec<DenseInstance>,
    positions: Vec<usize>,
    idx: usize,
}

impl InstanceListStream {
    pub fn new(header: Arc<InstanceHeader>, instances: Vec<DenseInstance>) -> Self {
        let positions = (0..instances.len()).collect();
        Self::with_positions(header, instances, positions)
    }

    fn with_positions(
        header: Arc<InstanceHeader>,
        instances: Vec<DenseInstance>,
        positions: Vec<usize>,
    ) -> Self {
        Self {
            header,
            instances,
            positions,
            idx: 0,
        }
    }

    /// Drains `source` from its first record into memory. Positions come
    /// from the source when it tracks them, otherwise from the read order.
    pub fn collect_from(source: &mut dyn Stream) -> Result<Self, StreamError> {
        source.restart()?;
        let header = Arc::new(source.header().clone());
        let mut instances = Vec::new();
        let mut positions = Vec::new();
        while let Some(instance) = source.next_instance()? {
            positions.push(source.position().unwrap_or(instances.len()));
            instances.push(DenseInstance::new(
                Arc::clone(&header),
                instance.to_vec(),
                instance.class_value(),
            ));
        }
        Ok(Self::with_positions(header, instances, positions))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Reorders the records deterministically for `seed`.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut paired: Vec<(usize, DenseInstance)> = self
            .positions
            .drain(..)
            .zip(self.instances.drain(..))
            .collect();
        paired.shuffle(&mut rng);
        (self.positions, self.instances) = paired.into_iter().unzip();
        self.idx = 0;
    }

    /// Splits into the first `at` records and the rest.
    pub fn split_at(mut self, at: usize) -> (Self, Self) {
        let at = at.min(self.instances.len());
        let tail = self.instances.split_off(at);
        let tail_positions = self.positions.split_off(at);
        let header = Arc::clone(&self.header);
        (
            Self::with_positions(Arc::clone(&header), self.instances, self.positions),
            Self::with_positions(header, tail, tail_positions),
        )
    }

    pub fn truncate(&mut self, len: usize) {
        self.instances.truncate(len);
        self.positions.truncate(len);
    }
}

impl Stream for InstanceListStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.instances.len()
    }

    fn next_instance(&mut self) -> Result<Option<Box<dyn Instance>>, StreamError> {
        let Some(instance) = self.instances.get(self.idx) else {
            return Ok(None);
        };
        self.idx += 1;
        Ok(Some(Box::new(instance.clone())))
    }

    fn restart(&mut self) -> Result<(), StreamError> {
        self.idx = 0;
        Ok(())
    }

    fn position(&self) -> Option<usize> {
        self.idx
            .checked_sub(1)
            .and_then(|i| self.positions.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Label;

    fn stream(n: usize) -> InstanceListStream {
        let header = Arc::new(InstanceHeader::anonymous("r".into(), 1, "e", "p"));
        let instances = (0..n)
            .map(|i| {
                DenseInstance::new(
                    Arc::clone(&header),
                    vec![format!("v{i}")],
                    Label::from_index(i % 2),
                )
            })
            .collect();
        InstanceListStream::new(header, instances)
    }

    fn values(s: &mut InstanceListStream) -> Vec<String> {
        s.restart().unwrap();
        let mut out = Vec::new();
        while let Some(i) = s.next_instance().unwrap() {
            out.push(i.to_vec().remove(0));
        }
        out
    }

    #[test]
    fn restart_rewinds() {
        let mut s = stream(3);
        assert_eq!(values(&mut s), vec!["v0", "v1", "v2"]);
        assert!(!s.has_more_instances());
        assert_eq!(values(&mut s), vec!["v0", "v1", "v2"]);
    }

    #[test]
    fn collect_from_copies_records_and_labels() {
        let mut source = stream(4);
        let _ = source.next_instance().unwrap();
        let copy = InstanceListStream::collect_from(&mut source).unwrap();
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.instances[3].class_value, Some(Label::Negative));
    }

    #[test]
    fn shuffle_is_seeded_and_keeps_records() {
        let mut a = stream(20);
        let mut b = stream(20);
        a.shuffle(7);
        b.shuffle(7);
        let va = values(&mut a);
        assert_eq!(va, values(&mut b));
        let mut sorted = va.clone();
        sorted.sort();
        let mut expected = values(&mut stream(20));
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn split_at_partitions_without_loss() {
        let (mut head, mut tail) = stream(5).split_at(3);
        assert_eq!(values(&mut head), vec!["v0", "v1", "v2"]);
        assert_eq!(values(&mut tail), vec!["v3", "v4"]);

        let (all, rest) = stream(2).split_at(10);
        assert_eq!(all.len(), 2);
        assert!(rest.is_empty());
    }

    #[test]
    fn positions_follow_records_through_shuffle_and_split() {
        let mut s = stream(10);
        s.shuffle(3);
        let (_, mut tail) = s.split_at(6);
        assert_eq!(tail.position(), None);
        while let Some(i) = tail.next_instance().unwrap() {
            let value = i.to_vec().remove(0);
            assert_eq!(value, format!("v{}", tail.position().unwrap()));
        }
    }
}
