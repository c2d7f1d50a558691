//! Path-based lookup over the document tree.
//!
//! A path is a sequence of node names walked from the root. At every level
//! the first sibling whose name matches the segment is taken; later
//! siblings with the same name are never explored, even when the first
//! match does not contain the rest of the path.
//!
//! Descending into a node that carries no children array is a malformed
//! tree rather than a miss.

use super::model::{Item, Node};
use crate::error::{Result, WorkflowyError};

/// Finds the node at `path` and returns it with its index among its siblings.
pub fn locate<'a, S: AsRef<str>>(children: &'a [Node], path: &[S]) -> Result<(usize, &'a Node)> {
    let Some((first, rest)) = path.split_first() else {
        return Err(WorkflowyError::InvalidPath(
            "lookup path must contain at least one segment".to_string(),
        ));
    };

    let segment = first.as_ref();
    let (index, node) = children
        .iter()
        .enumerate()
        .find(|(_, child)| child.name == segment)
        .ok_or_else(|| WorkflowyError::not_found(segment))?;

    if rest.is_empty() {
        Ok((index, node))
    } else {
        let children = node.children.as_deref().ok_or_else(|| {
            WorkflowyError::malformed_tree(format!(
                "node '{}' has no children array",
                node.name
            ))
        })?;
        locate(children, rest)
    }
}

/// Finds the node at `path` and materializes it as an [`Item`].
pub fn lookup<S: AsRef<str>>(children: &[Node], path: &[S]) -> Result<Item> {
    let (index, node) = locate(children, path)?;
    Ok(Item::from_node(node, index))
}
