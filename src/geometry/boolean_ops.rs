//! Boolean-operation gateway.
//!
//! Thin adapter between the reducer and the `geo` boolean primitives:
//! folds two or more polygon features into a single combined feature, or
//! reports failure as `None`. Geometry-library panics are caught here and
//! never reach the reducer.

use std::panic::{self, AssertUnwindSafe};

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon as GeoPolygon};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::solution::feature::{Feature, Geometry, Ring};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolygonOperation {
  Union,
  Intersection,
}

impl PolygonOperation {
  /// Prefix used for the fresh id of a combine result.
  pub fn id_prefix(&self) -> &'static str {
    match self {
      PolygonOperation::Union => "union",
      PolygonOperation::Intersection => "intersection",
    }
  }
}

/// Folds the given features left-to-right through the boolean primitive.
///
/// Returns `None` when fewer than 2 features are given, when any
/// intermediate result is empty (disjoint intersection), or when the
/// geometry library fails. No partial result is ever surfaced and the
/// inputs are not touched. The returned feature carries a placeholder id
/// and no properties; the reducer assigns the real fresh id.
pub fn apply_operation(operation: PolygonOperation, features: &[&Feature]) -> Option<Feature> {
  if features.len() < 2 {
    return None;
  }

  let folded = panic::catch_unwind(AssertUnwindSafe(|| fold(operation, features)));

  match folded {
    Ok(Some(multi)) => Some(Feature::new("", geometry_from_multi_polygon(&multi))),
    Ok(None) => None,
    Err(_) => {
      warn!(?operation, num_of_features = features.len(), "boolean operation failed in the geometry library");
      None
    }
  }
}

fn fold(operation: PolygonOperation, features: &[&Feature]) -> Option<MultiPolygon<f64>> {
  let mut accumulator = multi_polygon_from_geometry(&features[0].geometry);
  for feature in &features[1..] {
    let other = multi_polygon_from_geometry(&feature.geometry);
    let combined = match operation {
      PolygonOperation::Union => accumulator.union(&other),
      PolygonOperation::Intersection => accumulator.intersection(&other),
    };
    if combined.0.is_empty() {
      return None;
    }
    accumulator = combined;
  }
  Some(accumulator)
}

// --- Conversions between ring-based geometry and geo types ---

pub fn multi_polygon_from_geometry(geometry: &Geometry) -> MultiPolygon<f64> {
  match geometry {
    Geometry::Polygon { coordinates } => MultiPolygon(vec![polygon_from_rings(coordinates)]),
    Geometry::MultiPolygon { coordinates } => {
      MultiPolygon(coordinates.iter().map(|rings| polygon_from_rings(rings)).collect())
    }
  }
}

pub fn geometry_from_multi_polygon(multi: &MultiPolygon<f64>) -> Geometry {
  let mut polygons: Vec<Vec<Ring>> = multi.0.iter().map(rings_from_polygon).collect();
  if polygons.len() == 1 {
    Geometry::Polygon { coordinates: polygons.remove(0) }
  } else {
    Geometry::MultiPolygon { coordinates: polygons }
  }
}

fn polygon_from_rings(rings: &[Ring]) -> GeoPolygon<f64> {
  let mut line_strings = rings.iter().map(|ring| {
    LineString::from(ring.iter().map(|p| Coord { x: p[0], y: p[1] }).collect::<Vec<_>>())
  });
  let exterior = line_strings.next().unwrap_or_else(|| LineString::new(Vec::new()));
  GeoPolygon::new(exterior, line_strings.collect())
}

fn rings_from_polygon(polygon: &GeoPolygon<f64>) -> Vec<Ring> {
  let mut rings = vec![ring_from_line_string(polygon.exterior())];
  rings.extend(polygon.interiors().iter().map(ring_from_line_string));
  rings
}

fn ring_from_line_string(line: &LineString<f64>) -> Ring {
  line.coords().map(|c| [c.x, c.y]).collect()
}
