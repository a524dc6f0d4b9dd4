use serde::{Deserialize, Serialize};

use crate::solution::feature::Feature;

/// A named collection of polygon features being edited.
///
/// The feature order is significant only because it defines the integer
/// indices used by selection and operation targeting. Solutions are never
/// mutated in place: the reducer always returns a replacement value, which
/// is what makes recording inverse patches against the old value sound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
  pub id: String,
  #[serde(default)]
  pub features: Vec<Feature>,
}

impl Solution {
  pub fn new(id: impl Into<String>, features: Vec<Feature>) -> Self {
    Self { id: id.into(), features }
  }

  pub fn num_of_features(&self) -> usize {
    self.features.len()
  }

  pub fn feature(&self, index: usize) -> Option<&Feature> {
    self.features.get(index)
  }
}
