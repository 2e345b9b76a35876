use thiserror::Error;

use crate::util::strings::longest_common_prefix;

/// Errors produced by route registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The exact path is already stored in the tree
    #[error("path already exists")]
    PathAlreadyExists,
}

/// Label on a radix tree edge.
///
/// A literal label matches itself as a string prefix of the remaining path.
/// A variable label matches one whole path segment, whatever its content,
/// up to the next `/` or the end of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Literal(String),
    Variable(String),
}

impl Label {
    /// Returns the remainder of `path` after this label consumed its share,
    /// or `None` when the label does not match.
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            Label::Literal(label) => path.strip_prefix(label.as_str()),
            Label::Variable(_) => Some(match path.split_once('/') {
                Some((_, rest)) => rest,
                None => "",
            }),
        }
    }
}

/// An edge to a child node. Sibling literal edges never share a non-empty
/// prefix; splitting during insert maintains that.
#[derive(Debug)]
pub struct Edge<T> {
    pub label: Label,
    pub node: Node<T>,
}

/// A tree node. `data` is present only on nodes that terminate a stored
/// path.
#[derive(Debug)]
pub struct Node<T> {
    pub data: Option<T>,
    pub children: Vec<Edge<T>>,
}

impl<T> Node<T> {
    pub fn new() -> Self {
        Node { data: None, children: Vec::new() }
    }

    pub fn leaf(data: T) -> Self {
        Node { data: Some(data), children: Vec::new() }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix-compressed map from path strings to arbitrary data.
///
/// Lookup cost scales with path length, storage with the structural
/// diversity of the inserted paths. Edge splitting is the only structural
/// operation; no edge ever carries an empty literal label.
#[derive(Debug)]
pub struct RadixTree<T> {
    root: Node<T>,
}

impl<T> RadixTree<T> {
    pub fn new() -> Self {
        RadixTree { root: Node::new() }
    }

    /// Builds a tree around a hand-assembled root, mostly useful to set up
    /// variable edges.
    pub fn from_root(root: Node<T>) -> Self {
        RadixTree { root }
    }

    /// Looks up the data stored for `path`, descending greedily: at each
    /// node the first matching child edge wins.
    pub fn find(&self, path: &str) -> Option<&T> {
        Self::find_node(&self.root, path).and_then(|node| node.data.as_ref())
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, path: &str) -> Option<&mut T> {
        Self::find_node_mut(&mut self.root, path).and_then(|node| node.data.as_mut())
    }

    fn find_node<'a>(node: &'a Node<T>, path: &str) -> Option<&'a Node<T>> {
        if path.is_empty() {
            return Some(node);
        }
        for edge in &node.children {
            if let Some(rest) = edge.label.matches(path) {
                return Self::find_node(&edge.node, rest);
            }
        }
        None
    }

    fn find_node_mut<'a>(node: &'a mut Node<T>, path: &str) -> Option<&'a mut Node<T>> {
        if path.is_empty() {
            return Some(node);
        }
        for edge in &mut node.children {
            if let Some(rest) = edge.label.matches(path) {
                return Self::find_node_mut(&mut edge.node, rest);
            }
        }
        None
    }

    /// Stores `data` under `path`.
    ///
    /// Descends as far as existing edges match, then either stores on the
    /// reached node, splits the first literal edge sharing a non-empty
    /// prefix with the remainder, or appends a fresh edge. Returns
    /// [`RouteError::PathAlreadyExists`] when the path already holds data;
    /// the tree is left untouched in that case.
    pub fn insert(&mut self, path: &str, data: T) -> Result<(), RouteError> {
        Self::insert_at(&mut self.root, path, data)
    }

    fn insert_at(node: &mut Node<T>, path: &str, data: T) -> Result<(), RouteError> {
        if path.is_empty() {
            if node.data.is_some() {
                return Err(RouteError::PathAlreadyExists);
            }
            node.data = Some(data);
            return Ok(());
        }

        // descend while an existing edge consumes part of the path
        for i in 0..node.children.len() {
            if let Some(rest) = node.children[i].label.matches(path) {
                return Self::insert_at(&mut node.children[i].node, rest, data);
            }
        }

        // no edge matches outright; split the first literal child sharing a
        // non-empty prefix with the remainder
        for i in 0..node.children.len() {
            let (prefix, old_suffix) = match &node.children[i].label {
                Label::Literal(label) => {
                    let prefix = longest_common_prefix(label, path);
                    if prefix.is_empty() {
                        continue;
                    }
                    (prefix.to_string(), label[prefix.len()..].to_string())
                }
                // variable edges are never split
                Label::Variable(_) => continue,
            };
            let new_suffix = &path[prefix.len()..];

            // re-parent the existing subtree under the shared prefix
            let existing = std::mem::take(&mut node.children[i].node);
            let split = &mut node.children[i];
            split.label = Label::Literal(prefix);
            split.node.children.push(Edge { label: Label::Literal(old_suffix), node: existing });
            if new_suffix.is_empty() {
                // the new path ends exactly at the split point; storing here
                // avoids an empty-labelled edge
                split.node.data = Some(data);
            } else {
                split
                    .node
                    .children
                    .push(Edge { label: Label::Literal(new_suffix.to_string()), node: Node::leaf(data) });
            }
            return Ok(());
        }

        // fresh edge carrying the whole remainder
        node.children.push(Edge { label: Label::Literal(path.to_string()), node: Node::leaf(data) });
        Ok(())
    }

    /// Number of nodes below the root (the root itself is not counted).
    pub fn node_count(&self) -> usize {
        Self::count(&self.root)
    }

    fn count(node: &Node<T>) -> usize {
        node.children.iter().map(|edge| 1 + Self::count(&edge.node)).sum()
    }
}

impl<T> Default for RadixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
