use super::{FeatureBlock, PatchError};
use crate::registry::DecomposeOutcome;

/// Outcome of one successful augmentation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AugmentReport {
    pub original_id: i32,
    pub new_id: i32,
    pub applied: Vec<FeatureBlock>,
    pub failed: Vec<(FeatureBlock, PatchError)>,
    /// Recipe ids as stored (after collision suffixing).
    pub recipes: Vec<String>,
    pub decompose: Option<DecomposeOutcome>,
    /// Recipe or decompose publications that failed.
    pub artifact_errors: Vec<PatchError>,
}

impl AugmentReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.artifact_errors.is_empty()
    }
}

/// Outcome of a batch. Failed configs never stop the batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub succeeded: Vec<AugmentReport>,
    /// New item id of each failed config with its error.
    pub failed: Vec<(i32, PatchError)>,
}

impl BatchReport {
    pub fn registered_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.succeeded.iter().map(|report| report.new_id)
    }

    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
