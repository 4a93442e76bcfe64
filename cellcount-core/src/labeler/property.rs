//! Property-based tests for grid labeling.
//!
//! Generated grids are labeled and compared against a breadth-first
//! flood fill over the same neighbour relation, and cluster centres are
//! checked against a brute-force grouping of the label grid.

use std::collections::{BTreeMap, VecDeque};

use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::{cluster_centers, label};
use crate::{
    Centroid, Grid, LabelGrid,
    test_utils::{max_grid_side, suite_proptest_config},
};

/// Grid with brightness drawn uniformly from `[0, 1)`.
fn uniform_grid() -> impl Strategy<Value = Grid> {
    (1..=max_grid_side()).prop_flat_map(|side| {
        prop::collection::vec(0.0_f32..1.0, side * side)
            .prop_map(move |values| Grid::new(side, values).expect("generated grid is square"))
    })
}

/// Grid where each pixel is bright with probability `density`, built from a
/// seeded generator so failures replay from the printed seed.
fn seeded_grid(seed: u64, side: usize, density: f64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let values = (0..side * side)
        .map(|_| if rng.gen_bool(density) { rng.gen_range(0.6..1.0) } else { 0.0 })
        .collect();
    Grid::new(side, values).expect("generated grid is square")
}

/// Component ids from a flood fill over the pairs the labeler may merge:
/// a pixel outside the last row and column links to its lower neighbour and
/// to its right neighbour, each link made when both of its pixels are above
/// the threshold.
fn flood_fill(grid: &Grid, threshold: f32) -> Vec<usize> {
    let side = grid.side();
    let bright: Vec<bool> = grid.values().iter().map(|&value| value > threshold).collect();

    let mut adjacency = vec![Vec::new(); side * side];
    for row in 0..side.saturating_sub(1) {
        for col in 0..side.saturating_sub(1) {
            let here = row * side + col;
            if !bright[here] {
                continue;
            }
            for neighbour in [here + side, here + 1] {
                if bright[neighbour] {
                    adjacency[here].push(neighbour);
                    adjacency[neighbour].push(here);
                }
            }
        }
    }

    let mut component = vec![usize::MAX; side * side];
    let mut next_id = 0;
    for start in 0..side * side {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = next_id;
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &neighbour in &adjacency[node] {
                if component[neighbour] == usize::MAX {
                    component[neighbour] = next_id;
                    queue.push_back(neighbour);
                }
            }
        }
        next_id += 1;
    }
    component
}

fn brute_force_centres(labels: &LabelGrid) -> Vec<Centroid> {
    let side = labels.side();
    let mut members: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
    for (index, &root) in labels.labels().iter().enumerate() {
        members.entry(root).or_default().push((index / side, index % side));
    }
    members
        .values()
        .filter(|pixels| pixels.len() >= 2)
        .map(|pixels| {
            let rows: usize = pixels.iter().map(|&(row, _)| row).sum();
            let cols: usize = pixels.iter().map(|&(_, col)| col).sum();
            Centroid::new(rows / pixels.len(), cols / pixels.len())
        })
        .collect()
}

fn assert_same_partition(labels: &[usize], expected: &[usize]) -> TestCaseResult {
    for left in 0..labels.len() {
        for right in (left + 1)..labels.len() {
            let together = labels[left] == labels[right];
            let expected_together = expected[left] == expected[right];
            if together != expected_together {
                return Err(TestCaseError::fail(format!(
                    "pixels {left} and {right}: labeler says {together}, flood fill says \
                     {expected_together}"
                )));
            }
        }
    }
    Ok(())
}

fn check_labeling(grid: &Grid, threshold: f32) -> TestCaseResult {
    let labels = label(grid, threshold).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let side = grid.side();

    assert_same_partition(labels.labels(), &flood_fill(grid, threshold))?;

    for (index, &root) in labels.labels().iter().enumerate() {
        prop_assert!(root < side * side, "label {root} out of range");
        prop_assert_eq!(labels.labels()[root], root, "root of pixel {} is not its own root", index);
    }

    let corner = side * side - 1;
    prop_assert_eq!(labels.labels()[corner], corner);

    let centres = cluster_centers(&labels).map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(centres, brute_force_centres(&labels));
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn labels_match_flood_fill(grid in uniform_grid(), threshold in 0.0_f32..1.0) {
        check_labeling(&grid, threshold)?;
    }

    #[test]
    fn seeded_sparse_grids_match_flood_fill(
        seed in any::<u64>(),
        side in 1..=max_grid_side(),
        density in 0.1_f64..0.9,
    ) {
        let grid = seeded_grid(seed, side, density);
        check_labeling(&grid, 0.5)?;
    }

    #[test]
    fn labeling_is_deterministic(grid in uniform_grid(), threshold in 0.0_f32..1.0) {
        let first = label(&grid, threshold).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let second = label(&grid, threshold).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn raising_the_threshold_never_joins_components(
        grid in uniform_grid(),
        low in 0.0_f32..0.5,
        raise in 0.0_f32..0.5,
    ) {
        let loose = label(&grid, low).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let strict = label(&grid, low + raise)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        for left in 0..strict.len() {
            for right in (left + 1)..strict.len() {
                if strict.labels()[left] == strict.labels()[right] {
                    prop_assert_eq!(loose.labels()[left], loose.labels()[right]);
                }
            }
        }
    }
}
