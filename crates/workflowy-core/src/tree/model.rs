//! Tree domain model.
//!
//! The tree is rebuilt wholesale from every fetch. The root is implicit: a
//! `Tree` owns the top-level nodes, and every `Node` owns its children, so
//! there are no cross links between nodes.

use serde::{Deserialize, Serialize};

/// One entry in the document tree (an outline row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier of the node within the tree.
    pub id: String,
    /// Display name (may contain markup).
    pub name: String,
    /// Whether the node is marked complete.
    pub completed: bool,
    /// Optional note attached to the node.
    pub description: Option<String>,
    /// Ordered child nodes; `None` when the service sent no children array.
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Creates an incomplete leaf node without description.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed: false,
            description: None,
            children: None,
        }
    }

    /// Sets the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Direct children, empty when the node has no children array.
    pub fn child_nodes(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Names of the direct children, in order.
    pub fn child_names(&self) -> Vec<String> {
        self.child_nodes().iter().map(|c| c.name.clone()).collect()
    }

    /// Visits the descendants of this node depth-first in document order.
    ///
    /// Direct children are reported at depth 0.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, usize),
    {
        walk_nodes(self.child_nodes(), 0, &mut visit);
    }
}

/// The full document tree of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Top-level nodes (children of the implicit root).
    pub children: Vec<Node>,
}

impl Tree {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|n| 1 + count(n.child_nodes())).sum()
        }
        count(&self.children)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Visits every node depth-first in document order.
    ///
    /// The callback receives the node and its depth (0 for top-level nodes).
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, usize),
    {
        walk_nodes(&self.children, 0, &mut visit);
    }
}

fn walk_nodes<F>(nodes: &[Node], depth: usize, visit: &mut F)
where
    F: FnMut(&Node, usize),
{
    for node in nodes {
        visit(node, depth);
        walk_nodes(node.child_nodes(), depth + 1, visit);
    }
}

/// A node materialized by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub completed: bool,
    /// Index of the node among its siblings at fetch time.
    pub priority: usize,
    pub description: Option<String>,
    /// Names of the direct children, in order.
    pub children_names: Vec<String>,
}

impl Item {
    /// Materializes a node found at `priority` among its siblings.
    pub fn from_node(node: &Node, priority: usize) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            completed: node.completed,
            priority,
            description: node.description.clone(),
            children_names: node.child_names(),
        }
    }
}
