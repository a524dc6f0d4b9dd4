use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::solution::patch::Patch;

/// One recorded undoable action: the forward patches transform the
/// pre-state into the post-state, the inverse patches transform the
/// post-state back. Entries are immutable once recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub forward: Vec<Patch>,
  pub inverse: Vec<Patch>,
}

pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/*
 * Bounded, position-addressable stack of forward/inverse patch pairs.
 *
 * Entries below next_index have been executed and can be undone; entries
 * at and above it are the redo tail. Recording a new entry discards the
 * redo tail first. When the stack outgrows max_size the oldest entries
 * are evicted and next_index shifts down with them.
 */
pub struct HistoryStack {
  entries: Vec<HistoryEntry>,
  next_index: usize, // Next index (the one that was last executed plus one) in the entries vector.
  max_size: usize,
}

impl HistoryStack {
  pub fn new(max_size: usize) -> Self {
    Self {
      entries: Vec::new(),
      next_index: 0,
      max_size,
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn can_undo(&self) -> bool {
    self.next_index > 0
  }

  pub fn can_redo(&self) -> bool {
    self.next_index < self.entries.len()
  }

  /// Records a new entry. Anything that was undone but not redone becomes
  /// permanently unreachable.
  pub fn push(&mut self, entry: HistoryEntry) {
    if self.entries.len() > self.next_index {
      self.entries.drain(self.next_index..);
    }
    self.entries.push(entry);
    self.next_index = self.entries.len();

    if self.max_size > 0 && self.entries.len() > self.max_size {
      let excess = self.entries.len() - self.max_size;
      self.entries.drain(..excess);
      // The pointer is at the top right after a push, so it stays valid.
      self.next_index -= excess;
      debug!(evicted = excess, "history cap reached, evicted oldest entries");
    }
  }

  /// Steps the pointer back and hands out the entry whose inverse patches
  /// revert the most recent executed action. None when nothing is left to
  /// undo.
  pub fn undo(&mut self) -> Option<&HistoryEntry> {
    if self.next_index == 0 {
      return None;
    }
    self.next_index -= 1;
    Some(&self.entries[self.next_index])
  }

  /// Steps the pointer forward and hands out the entry whose forward
  /// patches replay the most recently undone action. None when nothing is
  /// left to redo.
  pub fn redo(&mut self) -> Option<&HistoryEntry> {
    if self.next_index >= self.entries.len() {
      return None;
    }
    let entry = &self.entries[self.next_index];
    self.next_index += 1;
    Some(entry)
  }

  pub fn clear(&mut self) {
    self.entries.clear();
    self.next_index = 0;
  }
}
