//! Property-based tests for the weighted union-find.
//!
//! Random operation sequences are replayed against both [`DisjointSet`] and a
//! naive relabelling oracle; after every sequence the forest invariants
//! (weights, component counts, agreement with the oracle) must hold.

use proptest::prelude::*;
use test_strategy::Arbitrary;

use super::DisjointSet;
use crate::test_utils::suite_proptest_config;

/// One step of a generated operation sequence. Raw indices are reduced
/// modulo the structure length before use.
#[derive(Clone, Copy, Debug, Arbitrary)]
enum Operation {
    #[weight(4)]
    Union { left: u16, right: u16 },
    #[weight(1)]
    Connected { left: u16, right: u16 },
    #[weight(1)]
    Root { element: u16 },
}

/// Quadratic reference model: every element carries an explicit component
/// label and merges relabel the whole absorbed component.
struct RelabelOracle {
    labels: Vec<usize>,
}

impl RelabelOracle {
    fn new(len: usize) -> Self {
        Self {
            labels: (0..len).collect(),
        }
    }

    fn union(&mut self, left: usize, right: usize) {
        let from = self.labels[left];
        let to = self.labels[right];
        for label in &mut self.labels {
            if *label == from {
                *label = to;
            }
        }
    }

    fn connected(&self, left: usize, right: usize) -> bool {
        self.labels[left] == self.labels[right]
    }
}

fn replay(len: usize, operations: &[Operation]) -> (DisjointSet, RelabelOracle) {
    let mut set = DisjointSet::new(len).expect("generated length is non-zero");
    let mut oracle = RelabelOracle::new(len);
    for operation in operations {
        match *operation {
            Operation::Union { left, right } => {
                let (left, right) = (usize::from(left) % len, usize::from(right) % len);
                set.union(left, right).expect("indices are reduced into range");
                oracle.union(left, right);
            }
            Operation::Connected { left, right } => {
                let (left, right) = (usize::from(left) % len, usize::from(right) % len);
                set.connected(left, right).expect("indices are reduced into range");
            }
            Operation::Root { element } => {
                set.root(usize::from(element) % len)
                    .expect("index is reduced into range");
            }
        }
    }
    (set, oracle)
}

fn operations_strategy() -> impl Strategy<Value = (usize, Vec<Operation>)> {
    (1_usize..=48, prop::collection::vec(any::<Operation>(), 0..96))
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn weights_match_component_membership((len, operations) in operations_strategy()) {
        let (mut set, _) = replay(len, &operations);

        let mut members = vec![0_usize; len];
        for element in 0..len {
            let root = set.root(element).expect("in range");
            prop_assert!(set.is_root(root).expect("in range"));
            members[root] += 1;
        }

        let mut roots = 0;
        for (root, &count) in members.iter().enumerate() {
            if count == 0 {
                continue;
            }
            roots += 1;
            prop_assert_eq!(set.component_size(root).expect("in range"), count);
        }
        prop_assert_eq!(set.component_count(), roots);
    }

    #[test]
    fn connectivity_matches_relabel_oracle((len, operations) in operations_strategy()) {
        let (mut set, oracle) = replay(len, &operations);
        for left in 0..len {
            for right in 0..len {
                prop_assert_eq!(
                    set.connected(left, right).expect("in range"),
                    oracle.connected(left, right),
                    "pair ({}, {})", left, right
                );
            }
        }
    }

    #[test]
    fn repeated_union_changes_nothing(
        (len, operations) in operations_strategy(),
        left in any::<u16>(),
        right in any::<u16>(),
    ) {
        let (mut set, _) = replay(len, &operations);
        let (left, right) = (usize::from(left) % len, usize::from(right) % len);

        set.union(left, right).expect("in range");
        let root = set.root(left).expect("in range");
        let size = set.component_size(left).expect("in range");
        let components = set.component_count();

        prop_assert!(!set.union(left, right).expect("in range"));
        prop_assert_eq!(set.root(left).expect("in range"), root);
        prop_assert_eq!(set.root(right).expect("in range"), root);
        prop_assert_eq!(set.component_size(right).expect("in range"), size);
        prop_assert_eq!(set.component_count(), components);
    }
}
