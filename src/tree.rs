// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hierarchical Path Tree
//!
//! Flat endpoint paths such as `/orders/{id}/items` are folded into one
//! deduplicated tree of path resources. Each distinct prefix becomes exactly
//! one node, no matter how many endpoints share it or in which order they
//! were declared.
//!
//! ```rust
//! use cim_blueprints::tree::PathTree;
//!
//! let tree = PathTree::build(["/orders", "/orders/{id}", "/orders/{id}/items"]);
//! assert_eq!(tree.node_count(), 3);
//! assert!(tree.node("/orders/{id}").is_some());
//! ```

use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::GatewayResource;

/// Index of a node in the tree's arena
pub type NodeId = usize;

/// Split a path into its non-empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Canonical form of a path: leading `/`, no trailing or doubled `/`
///
/// The root is `/`.
pub fn normalize_path(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

/// True for `{param}` segments
pub fn is_parameter(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}

#[derive(Debug, Clone)]
pub struct PathNode {
    segment: String,
    path: String,
    parent: Option<NodeId>,
    children: BTreeMap<String, NodeId>,
}

impl PathNode {
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_parameter(&self) -> bool {
        is_parameter(&self.segment)
    }
}

/// Deduplicated tree of path resources
///
/// Equality is structural: two trees are equal when they contain the same
/// set of paths, regardless of arena layout.
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: Vec<PathNode>,
    by_prefix: BTreeMap<String, NodeId>,
}

impl PathTree {
    pub const ROOT: NodeId = 0;

    fn empty() -> Self {
        let root = PathNode {
            segment: String::new(),
            path: "/".to_string(),
            parent: None,
            children: BTreeMap::new(),
        };
        Self {
            nodes: vec![root],
            by_prefix: BTreeMap::from([("/".to_string(), Self::ROOT)]),
        }
    }

    /// Build a tree from endpoint paths, in any order
    pub fn build<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::empty();
        for path in paths {
            tree.insert(path.as_ref());
        }
        tree
    }

    fn insert(&mut self, path: &str) -> NodeId {
        let mut current = Self::ROOT;
        let mut prefix = String::new();

        for segment in segments(path) {
            prefix.push('/');
            prefix.push_str(segment);

            current = match self.by_prefix.get(&prefix) {
                Some(&existing) => existing,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(PathNode {
                        segment: segment.to_string(),
                        path: prefix.clone(),
                        parent: Some(current),
                        children: BTreeMap::new(),
                    });
                    self.nodes[current].children.insert(segment.to_string(), id);
                    self.by_prefix.insert(prefix.clone(), id);
                    debug!(path = %prefix, "created path node");
                    id
                }
            };
        }
        current
    }

    /// Number of nodes, excluding the root
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Node for a path, normalized first
    pub fn node(&self, path: &str) -> Option<NodeId> {
        self.by_prefix.get(&normalize_path(path)).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&PathNode> {
        self.nodes.get(id)
    }

    pub fn path_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.path.as_str())
    }

    /// Children of a node, ordered by segment
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.children.values().copied())
    }

    /// Every non-root node as a gateway resource, parents before children
    pub fn resources(&self) -> Vec<GatewayResource> {
        let mut resources = Vec::with_capacity(self.node_count());
        let mut stack: Vec<NodeId> = self.children(Self::ROOT).collect();
        stack.reverse();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let parent = node
                .parent
                .and_then(|parent| self.path_of(parent))
                .unwrap_or("/");
            resources.push(GatewayResource {
                path: node.path.clone(),
                segment: node.segment.clone(),
                parent: parent.to_string(),
            });
            stack.extend(node.children.values().rev().copied());
        }
        resources
    }
}

impl PartialEq for PathTree {
    fn eq(&self, other: &Self) -> bool {
        self.by_prefix.keys().eq(other.by_prefix.keys())
    }
}

impl Eq for PathTree {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/a/b"), "/a/b");
        assert_eq!(normalize_path("a/b/"), "/a/b");
        assert_eq!(normalize_path("//a//b"), "/a/b");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_shared_prefixes_are_deduplicated() {
        let tree = PathTree::build(["/orders", "/orders/{id}", "/orders/{id}/items"]);
        assert_eq!(tree.node_count(), 3);

        let id = tree.node("/orders/{id}").unwrap();
        assert!(tree.get(id).unwrap().is_parameter());
        assert_eq!(tree.path_of(tree.get(id).unwrap().parent().unwrap()), Some("/orders"));
    }

    #[test]
    fn test_declaration_order_does_not_matter() {
        let forward = PathTree::build(["/orders", "/orders/{id}", "/orders/{id}/items"]);
        let reverse = PathTree::build(["/orders/{id}/items", "/orders/{id}", "/orders"]);
        assert_eq!(forward, reverse);
        assert_eq!(forward.resources(), reverse.resources());
    }

    #[test]
    fn test_equivalent_spellings_share_nodes() {
        let tree = PathTree::build(["/a/b", "a/b/"]);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_root_path_adds_no_nodes() {
        let tree = PathTree::build(["/"]);
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.node("/"), Some(PathTree::ROOT));
        assert!(tree.resources().is_empty());
    }

    #[test]
    fn test_children_are_ordered_by_segment() {
        let tree = PathTree::build(["/users", "/orders", "/health"]);
        let segments: Vec<&str> = tree
            .children(PathTree::ROOT)
            .filter_map(|id| tree.get(id).map(PathNode::segment))
            .collect();
        assert_eq!(segments, vec!["health", "orders", "users"]);
    }

    #[test]
    fn test_resources_list_parents_first() {
        let tree = PathTree::build(["/orders/{id}/items", "/users"]);
        let paths: Vec<(String, String)> = tree
            .resources()
            .into_iter()
            .map(|resource| (resource.path, resource.parent))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("/orders".to_string(), "/".to_string()),
                ("/orders/{id}".to_string(), "/orders".to_string()),
                ("/orders/{id}/items".to_string(), "/orders/{id}".to_string()),
                ("/users".to_string(), "/".to_string()),
            ]
        );
    }

    #[test]
    fn test_is_parameter() {
        assert!(is_parameter("{id}"));
        assert!(!is_parameter("{}"));
        assert!(!is_parameter("orders"));
    }
}
