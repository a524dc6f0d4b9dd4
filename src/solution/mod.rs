pub mod feature;
pub mod solution;
pub mod patch;
pub mod reducer;
