use indexmap::IndexMap;
use thiserror::Error;

use crate::solution::solution::Solution;

/// Read/write contract of the solution collection store, the external
/// collaborator that loads and holds the available solutions. The editor
/// only ever replaces stored solutions wholesale; it never mutates them
/// through this interface.
pub trait SolutionStore {
  fn solutions(&self) -> Vec<&Solution>;
  fn solution(&self, id: &str) -> Option<&Solution>;
  fn active_solution_id(&self) -> Option<&str>;
  /// Returns false (and changes nothing) when no solution has that id.
  fn set_active_solution_id(&mut self, id: &str) -> bool;
  /// Replaces the stored solution with the given id. Unknown ids are
  /// ignored.
  fn update_solution(&mut self, id: &str, solution: Solution);
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("failed to parse solution document: {0}")]
  Parse(#[from] serde_json::Error),
  #[error("duplicate solution id: {0}")]
  DuplicateSolution(String),
}

/// In-memory store: an insertion-ordered id → solution map, the order
/// being the presentation order of the solution list.
#[derive(Default)]
pub struct InMemorySolutionStore {
  solutions: IndexMap<String, Solution>,
  active_id: Option<String>,
}

impl InMemorySolutionStore {
  pub fn new(solutions: Vec<Solution>) -> Result<Self, StoreError> {
    let mut store = Self::default();
    for solution in solutions {
      if store.solutions.contains_key(&solution.id) {
        return Err(StoreError::DuplicateSolution(solution.id));
      }
      store.solutions.insert(solution.id.clone(), solution);
    }
    // The first loaded solution starts out active.
    store.active_id = store.solutions.keys().next().cloned();
    Ok(store)
  }

  /// Parses one solution per JSON document and activates the first.
  pub fn from_json_documents(documents: &[&str]) -> Result<Self, StoreError> {
    let solutions = documents
      .iter()
      .map(|doc| serde_json::from_str::<Solution>(doc))
      .collect::<Result<Vec<_>, _>>()?;
    Self::new(solutions)
  }
}

impl SolutionStore for InMemorySolutionStore {
  fn solutions(&self) -> Vec<&Solution> {
    self.solutions.values().collect()
  }

  fn solution(&self, id: &str) -> Option<&Solution> {
    self.solutions.get(id)
  }

  fn active_solution_id(&self) -> Option<&str> {
    self.active_id.as_deref()
  }

  fn set_active_solution_id(&mut self, id: &str) -> bool {
    if !self.solutions.contains_key(id) {
      return false;
    }
    self.active_id = Some(id.to_string());
    true
  }

  fn update_solution(&mut self, id: &str, solution: Solution) {
    if let Some(stored) = self.solutions.get_mut(id) {
      *stored = solution;
    }
  }
}
