use crate::classifiers::Prediction;
use crate::core::instances::Instance;

pub trait Classifier {
    /// Classifies a record, consulting only its attribute values.
    fn predict(&self, instance: &dyn Instance) -> Prediction;
}
