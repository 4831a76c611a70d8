// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Path Tree
//!
//! Building the same set of endpoint paths in any order must produce the
//! same tree, with exactly one node per distinct prefix.

use cim_blueprints::tree::{normalize_path, PathTree};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

fn segment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("orders"),
        Just("{id}"),
        Just("items"),
        Just("users"),
        Just("{userId}"),
        Just("health"),
    ]
}

/// A path with optional leading/trailing slashes
fn path() -> impl Strategy<Value = String> {
    (prop::collection::vec(segment(), 0..5), any::<bool>(), any::<bool>()).prop_map(
        |(segments, leading, trailing)| {
            let mut path = segments.join("/");
            if leading {
                path.insert(0, '/');
            }
            if trailing {
                path.push('/');
            }
            path
        },
    )
}

/// A list of paths and a shuffled copy of it
fn paths_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::vec(path(), 0..12)
        .prop_flat_map(|paths| (Just(paths.clone()), Just(paths).prop_shuffle()))
}

fn distinct_prefixes(paths: &[String]) -> BTreeSet<String> {
    let mut prefixes = BTreeSet::new();
    for path in paths {
        let mut prefix = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);
            prefixes.insert(prefix.clone());
        }
    }
    prefixes
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: declaration order does not affect the tree
    #[test]
    fn prop_tree_is_order_independent((paths, shuffled) in paths_and_permutation()) {
        let tree = PathTree::build(&paths);
        let other = PathTree::build(&shuffled);

        prop_assert_eq!(&tree, &other);
        prop_assert_eq!(tree.node_count(), other.node_count());
        prop_assert_eq!(tree.resources(), other.resources());
    }

    /// Property: one node per distinct prefix, never more
    #[test]
    fn prop_one_node_per_prefix(paths in prop::collection::vec(path(), 0..12)) {
        let tree = PathTree::build(&paths);
        prop_assert_eq!(tree.node_count(), distinct_prefixes(&paths).len());
    }

    /// Property: every declared path resolves to a node
    #[test]
    fn prop_every_path_has_a_node(paths in prop::collection::vec(path(), 1..12)) {
        let tree = PathTree::build(&paths);
        for path in &paths {
            let id = tree.node(path);
            prop_assert!(id.is_some(), "missing node for {}", path);
            let normalized = normalize_path(path);
            prop_assert_eq!(tree.path_of(id.unwrap_or(PathTree::ROOT)), Some(normalized.as_str()));
        }
    }

    /// Property: resources list parents before their children
    #[test]
    fn prop_resources_parent_first(paths in prop::collection::vec(path(), 0..12)) {
        let tree = PathTree::build(&paths);
        let mut seen = BTreeSet::from(["/".to_string()]);
        for resource in tree.resources() {
            prop_assert!(seen.contains(&resource.parent), "{} listed before its parent", resource.path);
            seen.insert(resource.path);
        }
    }
}

#[test]
fn test_orders_paths_in_every_order_give_three_nodes() {
    let paths = ["/orders", "/orders/{id}", "/orders/{id}/items"];
    let permutations = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let reference = PathTree::build(paths);

    for order in permutations {
        let tree = PathTree::build(order.iter().map(|&i| paths[i]));
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree, reference);

        let orders = tree.node("/orders").unwrap();
        let children: Vec<_> = tree.children(orders).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(tree.path_of(children[0]), Some("/orders/{id}"));
    }
}
