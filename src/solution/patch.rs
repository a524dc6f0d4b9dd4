//! Structural patches over a feature sequence.
//!
//! A patch list is an ordered edit script that transforms one feature
//! sequence into another without copying the whole collection. Every
//! undoable action is recorded as a forward/inverse patch pair, and
//! undo/redo replay these scripts directly instead of re-running the
//! reducer.

use serde::{Deserialize, Serialize};

use crate::solution::feature::Feature;

/// One structural edit against a feature sequence. Indices refer to the
/// sequence as it stands when the patch is applied, i.e. later patches in
/// a list see the shifts caused by earlier ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
  Replace { index: usize, feature: Feature },
  Insert { index: usize, feature: Feature },
  Remove { index: usize },
}

/// Applies a patch list in order, returning the patched sequence.
/// Out-of-range entries are skipped; recorded patch lists never contain
/// them, but `ApplyPatches` actions are caller-supplied.
pub fn apply_patches(features: &[Feature], patches: &[Patch]) -> Vec<Feature> {
  let mut result: Vec<Feature> = features.to_vec();
  for patch in patches {
    match patch {
      Patch::Replace { index, feature } => {
        if *index < result.len() {
          result[*index] = feature.clone();
        }
      }
      Patch::Insert { index, feature } => {
        if *index <= result.len() {
          result.insert(*index, feature.clone());
        }
      }
      Patch::Remove { index } => {
        if *index < result.len() {
          result.remove(*index);
        }
      }
    }
  }
  result
}

/// Computes a forward and an inverse patch list between two feature
/// sequences: `forward` transforms `old` into `new`, `inverse` transforms
/// `new` back into `old`. Both lists are empty exactly when the sequences
/// are equal.
///
/// The script is built from the unequal middle after stripping the common
/// prefix and suffix: aligned positions become replaces, surplus old
/// entries become removes, surplus new entries become inserts. This is
/// minimal for the mutation shapes the reducer produces (remove a set of
/// positions, append results).
pub fn diff_features(old: &[Feature], new: &[Feature]) -> (Vec<Patch>, Vec<Patch>) {
  let prefix = common_prefix_len(old, new);
  let suffix = common_suffix_len(old, new, prefix);

  let old_mid = &old[prefix..old.len() - suffix];
  let new_mid = &new[prefix..new.len() - suffix];

  (
    edit_script(old_mid, new_mid, prefix),
    edit_script(new_mid, old_mid, prefix),
  )
}

fn common_prefix_len(old: &[Feature], new: &[Feature]) -> usize {
  let max = old.len().min(new.len());
  let mut n = 0;
  while n < max && old[n] == new[n] {
    n += 1;
  }
  n
}

fn common_suffix_len(old: &[Feature], new: &[Feature], prefix: usize) -> usize {
  let max = old.len().min(new.len()) - prefix;
  let mut n = 0;
  while n < max && old[old.len() - 1 - n] == new[new.len() - 1 - n] {
    n += 1;
  }
  n
}

/// Edit script turning `from` into `to`, with both slices starting at
/// absolute position `base` in their sequences.
fn edit_script(from: &[Feature], to: &[Feature], base: usize) -> Vec<Patch> {
  let mut patches = Vec::new();
  let aligned = from.len().min(to.len());

  for i in 0..aligned {
    if from[i] != to[i] {
      patches.push(Patch::Replace { index: base + i, feature: to[i].clone() });
    }
  }
  // Surplus entries sit right after the aligned span, so removing at the
  // same index repeatedly walks through them.
  for _ in aligned..from.len() {
    patches.push(Patch::Remove { index: base + aligned });
  }
  for i in aligned..to.len() {
    patches.push(Patch::Insert { index: base + i, feature: to[i].clone() });
  }
  patches
}
