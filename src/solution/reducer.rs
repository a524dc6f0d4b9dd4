//! Pure state transitions for a solution.
//!
//! `reduce` is a total function: malformed actions (too few targets,
//! out-of-range indices, failed geometry) degrade to the identity
//! transform instead of erroring. The input solution is never mutated;
//! callers always get a replacement value.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::boolean_ops::{self, PolygonOperation};
use crate::solution::feature::{fresh_feature_id, Feature};
use crate::solution::patch::{apply_patches, Patch};
use crate::solution::solution::Solution;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolutionAction {
  UpdateFeatures {
    operation: PolygonOperation,
    target_indices: Vec<usize>,
  },
  AddFeatures {
    features: Vec<Feature>,
  },
  DeleteFeatures {
    indices: Vec<usize>,
  },
  /// Replays a previously recorded patch list directly. Used by the
  /// history engine for undo/redo, never for forward user actions.
  ApplyPatches {
    patches: Vec<Patch>,
  },
}

pub fn reduce(solution: &Solution, action: &SolutionAction) -> Solution {
  match action {
    SolutionAction::UpdateFeatures { operation, target_indices } => {
      update_features(solution, *operation, target_indices)
    }
    SolutionAction::AddFeatures { features } => {
      let mut next = solution.clone();
      next.features.extend(features.iter().cloned());
      next
    }
    SolutionAction::DeleteFeatures { indices } => {
      let valid = valid_index_set(indices, solution.features.len());
      retain_unindexed(solution, &valid)
    }
    SolutionAction::ApplyPatches { patches } => Solution {
      id: solution.id.clone(),
      features: apply_patches(&solution.features, patches),
    },
  }
}

/// Combines the targeted features through the boolean gateway. The target
/// indices are interpreted against the sequence as it stands before this
/// action: all removals are computed from original positions. The combined
/// feature is appended with a freshly generated unique id and an empty
/// property bag; nothing is inherited from the inputs.
fn update_features(
  solution: &Solution,
  operation: PolygonOperation,
  target_indices: &[usize],
) -> Solution {
  let valid = valid_index_set(target_indices, solution.features.len());
  if valid.len() < 2 {
    debug!(solution = %solution.id, "update ignored, fewer than 2 valid target indices");
    return solution.clone();
  }

  let mut sorted: Vec<usize> = valid.iter().copied().collect();
  sorted.sort_unstable();
  let targets: Vec<&Feature> = sorted.iter().map(|&i| &solution.features[i]).collect();

  let Some(combined) = boolean_ops::apply_operation(operation, &targets) else {
    return solution.clone();
  };

  let mut next = retain_unindexed(solution, &valid);
  let id = fresh_feature_id(operation.id_prefix(), &next.features);
  next.features.push(Feature { id, ..combined });
  next
}

/// Deduplicates and range-filters an index list.
fn valid_index_set(indices: &[usize], len: usize) -> FxHashSet<usize> {
  indices.iter().copied().filter(|&i| i < len).collect()
}

/// New solution keeping every feature whose position is not in `indices`,
/// in the original relative order.
fn retain_unindexed(solution: &Solution, indices: &FxHashSet<usize>) -> Solution {
  Solution {
    id: solution.id.clone(),
    features: solution
      .features
      .iter()
      .enumerate()
      .filter(|(i, _)| !indices.contains(i))
      .map(|(_, f)| f.clone())
      .collect(),
  }
}
