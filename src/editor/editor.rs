//! The active-solution coordinator.
//!
//! `SolutionEditor` bridges the solution store, the reducer/history core
//! and the presentation layer: it owns the active solution, the feature
//! selection set and the history stack, and serializes all state
//! transitions. Dispatch runs the reducer, records the structural delta,
//! publishes the new solution to the store and clears the selection;
//! undo/redo replay the recorded patches without re-running the reducer.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::geometry::boolean_ops::PolygonOperation;
use crate::history::history_stack::{HistoryEntry, HistoryStack, DEFAULT_MAX_HISTORY_SIZE};
use crate::solution::patch::{apply_patches, diff_features, Patch};
use crate::solution::reducer::{reduce, SolutionAction};
use crate::solution::solution::Solution;

use super::store::SolutionStore;

#[derive(Clone, Copy, Debug)]
pub struct EditorOptions {
  pub max_history_size: usize,
}

impl Default for EditorOptions {
  fn default() -> Self {
    Self { max_history_size: DEFAULT_MAX_HISTORY_SIZE }
  }
}

pub struct SolutionEditor {
  store: Box<dyn SolutionStore>,
  active_solution: Option<Solution>,
  selected_feature_indices: FxHashSet<usize>,
  history: HistoryStack,
}

impl SolutionEditor {
  pub fn new(store: Box<dyn SolutionStore>) -> Self {
    Self::with_options(store, EditorOptions::default())
  }

  pub fn with_options(store: Box<dyn SolutionStore>, options: EditorOptions) -> Self {
    let active_solution = store
      .active_solution_id()
      .and_then(|id| store.solution(id))
      .cloned();
    Self {
      store,
      active_solution,
      selected_feature_indices: FxHashSet::default(),
      history: HistoryStack::new(options.max_history_size),
    }
  }

  // --- Read surface for presentation ---

  pub fn solution(&self) -> Option<&Solution> {
    self.active_solution.as_ref()
  }

  pub fn store(&self) -> &dyn SolutionStore {
    self.store.as_ref()
  }

  /// Mutable store access for collaborators that manage the solution list
  /// itself. After changing the active id this way, call
  /// `refresh_from_store`.
  pub fn store_mut(&mut self) -> &mut dyn SolutionStore {
    self.store.as_mut()
  }

  pub fn selected_feature_indices(&self) -> &FxHashSet<usize> {
    &self.selected_feature_indices
  }

  pub fn can_undo(&self) -> bool {
    self.history.can_undo()
  }

  pub fn can_redo(&self) -> bool {
    self.history.can_redo()
  }

  pub fn history_len(&self) -> usize {
    self.history.len()
  }

  /// True when enough features are selected for a combine operation.
  pub fn operations_available(&self) -> bool {
    self.selected_feature_indices.len() >= 2
  }

  // --- Selection ---

  /// Multi-select toggle: an already-selected index is removed, an
  /// unselected one is added. Nothing else changes.
  pub fn toggle_feature_selection(&mut self, index: usize) {
    if !self.selected_feature_indices.remove(&index) {
      self.selected_feature_indices.insert(index);
    }
  }

  /// Single-select replacement, for plain-click handling.
  pub fn select_only(&mut self, index: usize) {
    self.selected_feature_indices.clear();
    self.selected_feature_indices.insert(index);
  }

  pub fn clear_selection(&mut self) {
    self.selected_feature_indices.clear();
  }

  pub fn set_selected_feature_indices(&mut self, indices: FxHashSet<usize>) {
    self.selected_feature_indices = indices;
  }

  // --- Mutations ---

  /// Switches the active solution. Returns false when the store has no
  /// solution with that id. Switching away discards the selection and the
  /// whole undo history; history is per-solution-session.
  pub fn activate_solution(&mut self, id: &str) -> bool {
    if self.store.active_solution_id() == Some(id) && self.active_solution.is_some() {
      return true;
    }
    if !self.store.set_active_solution_id(id) {
      return false;
    }
    self.active_solution = self.store.solution(id).cloned();
    self.selected_feature_indices.clear();
    self.history.clear();
    debug!(solution = id, "activated solution, selection and history reset");
    true
  }

  /// Re-reads the active solution from the store, resetting selection and
  /// history if the active identity changed underneath us.
  pub fn refresh_from_store(&mut self) {
    let stored = self
      .store
      .active_solution_id()
      .and_then(|id| self.store.solution(id))
      .cloned();
    let identity_changed =
      stored.as_ref().map(|s| s.id.as_str()) != self.active_solution.as_ref().map(|s| s.id.as_str());
    self.active_solution = stored;
    if identity_changed {
      self.selected_feature_indices.clear();
      self.history.clear();
    }
  }

  /// Dispatches a combine operation over the current selection. The
  /// selection is cleared whether or not the operation changes anything.
  pub fn apply_operation(&mut self, operation: PolygonOperation) -> bool {
    let mut target_indices: Vec<usize> = self.selected_feature_indices.iter().copied().collect();
    target_indices.sort_unstable();
    let changed = self.dispatch(SolutionAction::UpdateFeatures { operation, target_indices });
    self.selected_feature_indices.clear();
    changed
  }

  /// Dispatches an undoable action. Returns true when the solution
  /// actually changed.
  pub fn dispatch(&mut self, action: SolutionAction) -> bool {
    self.dispatch_with_undoable(action, true)
  }

  /// Runs the reducer through the diff recorder. When the action produces
  /// no change nothing is recorded and the state is left untouched.
  /// Otherwise the new solution replaces the current one, the delta is
  /// pushed onto the history stack (when undoable, pruning any redo
  /// tail), the store is updated and the selection is cleared because the
  /// mutation invalidated its indices.
  pub fn dispatch_with_undoable(&mut self, action: SolutionAction, undoable: bool) -> bool {
    let Some(current) = self.active_solution.as_ref() else {
      return false;
    };

    let next = reduce(current, &action);
    let (forward, inverse) = diff_features(&current.features, &next.features);
    if forward.is_empty() {
      return false;
    }

    debug!(solution = %next.id, num_of_patches = forward.len(), undoable, "dispatch produced a delta");
    if undoable {
      self.history.push(HistoryEntry { forward, inverse });
    }
    self.publish(next);
    true
  }

  /// Replays the inverse patches of the most recent executed action.
  /// Returns false when there is nothing to undo or no active solution.
  pub fn undo(&mut self) -> bool {
    if self.active_solution.is_none() {
      return false;
    }
    let Some(entry) = self.history.undo() else {
      return false;
    };
    let patches = entry.inverse.clone();
    debug!(num_of_patches = patches.len(), "undo");
    self.replay(&patches);
    true
  }

  /// Replays the forward patches of the most recently undone action.
  pub fn redo(&mut self) -> bool {
    if self.active_solution.is_none() {
      return false;
    }
    let Some(entry) = self.history.redo() else {
      return false;
    };
    let patches = entry.forward.clone();
    debug!(num_of_patches = patches.len(), "redo");
    self.replay(&patches);
    true
  }

  fn replay(&mut self, patches: &[Patch]) {
    // active_solution is checked by the callers.
    if let Some(current) = self.active_solution.as_ref() {
      let next = Solution {
        id: current.id.clone(),
        features: apply_patches(&current.features, patches),
      };
      self.publish(next);
    }
  }

  fn publish(&mut self, next: Solution) {
    self.store.update_solution(&next.id, next.clone());
    self.active_solution = Some(next);
    self.selected_feature_indices.clear();
  }
}
