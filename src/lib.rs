//! State-management core for a polygon-solution map editor: an immutable
//! feature-collection reducer, a patch-based undo/redo engine, a boolean
//! geometry gateway and the coordinator tying them to a solution store.

pub mod solution;
pub mod geometry;
pub mod history;
pub mod editor;
