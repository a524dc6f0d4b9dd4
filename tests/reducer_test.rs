use polyedit::geometry::boolean_ops::PolygonOperation;
use polyedit::solution::feature::{Feature, Geometry};
use polyedit::solution::patch::Patch;
use polyedit::solution::reducer::{reduce, SolutionAction};
use polyedit::solution::solution::Solution;

use geo::Area;
use polyedit::geometry::boolean_ops::multi_polygon_from_geometry;

// cmd: cargo test

fn square(id: &str, x: f64, y: f64, size: f64) -> Feature {
  Feature::new(
    id,
    Geometry::Polygon {
      coordinates: vec![vec![
        [x, y],
        [x + size, y],
        [x + size, y + size],
        [x, y + size],
        [x, y],
      ]],
    },
  )
}

fn five_squares() -> Solution {
  // Squares 1 and 3 overlap each other; the rest are far away.
  Solution::new(
    "s1",
    vec![
      square("a", 100.0, 0.0, 1.0),
      square("b", 0.0, 0.0, 2.0),
      square("c", 200.0, 0.0, 1.0),
      square("d", 1.0, 1.0, 2.0),
      square("e", 300.0, 0.0, 1.0),
    ],
  )
}

fn area_of(feature: &Feature) -> f64 {
  multi_polygon_from_geometry(&feature.geometry).unsigned_area()
}

#[test]
fn union_replaces_targets_with_one_fresh_feature() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![1, 3],
    },
  );

  assert_eq!(next.num_of_features(), 4);

  let result = next.feature(3).unwrap();
  assert_ne!(result.id, "b");
  assert_ne!(result.id, "d");
  assert!(next.features.iter().all(|f| f.id != "b" && f.id != "d"));
  assert!(result.properties.is_empty());

  // Two 2x2 squares overlapping in a 1x1 corner.
  assert!((area_of(result) - 7.0).abs() < 1e-9);

  // The input is untouched.
  assert_eq!(solution.num_of_features(), 5);
}

#[test]
fn intersection_keeps_only_the_overlap() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Intersection,
      target_indices: vec![1, 3],
    },
  );

  assert_eq!(next.num_of_features(), 4);
  assert!((area_of(next.feature(3).unwrap()) - 1.0).abs() < 1e-9);
}

#[test]
fn intersection_of_disjoint_features_is_a_no_op() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Intersection,
      target_indices: vec![0, 2],
    },
  );

  assert_eq!(next, solution);
}

#[test]
fn update_with_fewer_than_two_targets_is_a_no_op() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![1],
    },
  );
  assert_eq!(next, solution);

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![],
    },
  );
  assert_eq!(next, solution);
}

#[test]
fn duplicate_target_indices_count_once() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![1, 1, 1],
    },
  );

  assert_eq!(next, solution);
}

#[test]
fn out_of_range_targets_are_filtered() {
  let solution = five_squares();

  // Only index 1 survives the filter, so the action degrades to a no-op.
  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![1, 17],
    },
  );
  assert_eq!(next, solution);

  // Both survive, the out-of-range one is simply dropped.
  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![1, 3, 99],
    },
  );
  assert_eq!(next.num_of_features(), 4);
}

#[test]
fn fresh_id_skips_taken_names() {
  let mut solution = five_squares();
  solution.features[0].id = "union-1".to_string();
  solution.features[2].id = "union-2".to_string();

  let next = reduce(
    &solution,
    &SolutionAction::UpdateFeatures {
      operation: PolygonOperation::Union,
      target_indices: vec![1, 3],
    },
  );

  assert_eq!(next.feature(3).unwrap().id, "union-3");
}

#[test]
fn add_features_appends_verbatim() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::AddFeatures {
      features: vec![square("x", 50.0, 50.0, 1.0)],
    },
  );

  assert_eq!(next.num_of_features(), 6);
  assert_eq!(next.feature(5).unwrap().id, "x");
}

#[test]
fn delete_features_ignores_invalid_indices_and_keeps_order() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::DeleteFeatures {
      indices: vec![4, 0, 77],
    },
  );

  let ids: Vec<&str> = next.features.iter().map(|f| f.id.as_str()).collect();
  assert_eq!(ids, vec!["b", "c", "d"]);
}

#[test]
fn apply_patches_replays_an_edit_script() {
  let solution = five_squares();

  let next = reduce(
    &solution,
    &SolutionAction::ApplyPatches {
      patches: vec![
        Patch::Remove { index: 0 },
        Patch::Insert { index: 4, feature: square("z", 9.0, 9.0, 1.0) },
      ],
    },
  );

  let ids: Vec<&str> = next.features.iter().map(|f| f.id.as_str()).collect();
  assert_eq!(ids, vec!["b", "c", "d", "e", "z"]);
}
