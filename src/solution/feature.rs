use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A closed ring of 2D points. The first point equals the last point.
pub type Ring = Vec<[f64; 2]>;

/// Ring-based polygon geometry in the GeoJSON shape: a `Polygon` is an outer
/// ring plus optional hole rings, a `MultiPolygon` is a sequence of those.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
  Polygon { coordinates: Vec<Ring> },
  MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

/*
 * A single polygon feature: an identifier, an arbitrary property bag and a
 * ring-based geometry. The identifier is unique within a solution; features
 * produced by a combine operation get a freshly generated one.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
  pub id: String,
  #[serde(default)]
  pub properties: serde_json::Map<String, Value>,
  pub geometry: Geometry,
}

impl Feature {
  pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
    Self {
      id: id.into(),
      properties: serde_json::Map::new(),
      geometry,
    }
  }
}

/// Picks an id of the form `<prefix>-N` that no feature in `existing` uses.
/// N starts at 1 and grows until a free name is found, so the result is
/// unique no matter what ids the collection already carries.
pub fn fresh_feature_id(prefix: &str, existing: &[Feature]) -> String {
  let mut n: u64 = 1;
  loop {
    let candidate = format!("{}-{}", prefix, n);
    if !existing.iter().any(|f| f.id == candidate) {
      return candidate;
    }
    n += 1;
  }
}
