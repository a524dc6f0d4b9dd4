pub mod store;
pub mod editor;
