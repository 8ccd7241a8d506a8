//! Edge-list input: a flat set of labelled nodes plus `parent -> child` edges.
//!
//! Generic graph sources can contain shapes a mind map cannot draw. Conversion accepts only a
//! strict tree and reports everything else as [`Error::MalformedTree`].

use crate::node::Node;
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTreeGraph")]
pub struct TreeGraph {
    /// Node id -> label, in insertion order.
    pub nodes: IndexMap<String, String>,
    /// `(parent, child)` pairs. Children of one parent keep the order of their edges.
    pub edges: Vec<(String, String)>,
    /// Explicit root id. When absent the single node without a parent is used.
    pub root: Option<String>,
    /// Ids passed to [`TreeGraph::add_node`] more than once; conversion rejects them.
    #[serde(skip)]
    duplicate_ids: Vec<String>,
}

/// Wire form of [`TreeGraph`]. `nodes` keeps repeated keys so they can be reported instead of
/// silently overwritten.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTreeGraph {
    #[serde(default, deserialize_with = "node_entries")]
    nodes: Vec<(String, String)>,
    #[serde(default)]
    edges: Vec<(String, String)>,
    #[serde(default)]
    root: Option<String>,
}

impl From<RawTreeGraph> for TreeGraph {
    fn from(raw: RawTreeGraph) -> Self {
        let mut graph = TreeGraph {
            edges: raw.edges,
            root: raw.root,
            ..TreeGraph::default()
        };
        for (id, text) in raw.nodes {
            graph.add_node(id, text);
        }
        graph
    }
}

fn node_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Entries;

    impl<'de> Visitor<'de> for Entries {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of node id to label")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(Entries)
}

impl TreeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a labelled node. Repeating an id keeps the first label and makes conversion fail.
    pub fn add_node(&mut self, id: impl Into<String>, text: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            self.duplicate_ids.push(id);
        } else {
            self.nodes.insert(id, text.into());
        }
        self
    }

    pub fn add_edge(&mut self, parent: impl Into<String>, child: impl Into<String>) -> &mut Self {
        self.edges.push((parent.into(), child.into()));
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn into_tree(self) -> Result<Node> {
        self.to_tree()
    }

    pub fn to_tree(&self) -> Result<Node> {
        if self.nodes.is_empty() {
            return Err(Error::malformed("graph has no nodes"));
        }
        if let Some(id) = self.duplicate_ids.first() {
            return Err(Error::malformed(format!("node id {id:?} is declared twice")));
        }

        let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        let mut parent_of: FxHashMap<&str, &str> = FxHashMap::default();
        for (parent, child) in &self.edges {
            for id in [parent, child] {
                if !self.nodes.contains_key(id.as_str()) {
                    return Err(Error::malformed(format!(
                        "edge {parent:?} -> {child:?} references unknown node {id:?}"
                    )));
                }
            }
            if parent == child {
                return Err(Error::malformed(format!("node {parent:?} is its own child")));
            }
            if let Some(previous) = parent_of.insert(child.as_str(), parent.as_str()) {
                return Err(Error::malformed(format!(
                    "node {child:?} is referenced twice (children of {previous:?} and {parent:?})"
                )));
            }
            children
                .entry(parent.as_str())
                .or_default()
                .push(child.as_str());
        }

        let root = self.resolve_root(&parent_of)?;
        if let Some(parent) = parent_of.get(root) {
            return Err(Error::malformed(format!(
                "root {root:?} has an incoming edge from {parent:?}"
            )));
        }

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut order: Vec<&str> = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(Error::malformed(format!("cycle through node {id:?}")));
            }
            order.push(id);
            if let Some(kids) = children.get(id) {
                stack.extend(kids.iter().rev().copied());
            }
        }

        if visited.len() != self.nodes.len() {
            let unreachable = self
                .nodes
                .keys()
                .find(|id| !visited.contains(id.as_str()))
                .map(String::as_str)
                .unwrap_or_default();
            return Err(Error::malformed(format!(
                "node {unreachable:?} is not reachable from root {root:?}"
            )));
        }

        // `order` is pre-order, so building in reverse always finds every child finished.
        let mut built: FxHashMap<&str, Node> = FxHashMap::default();
        for id in order.into_iter().rev() {
            let kids = children
                .get(id)
                .map(|kids| {
                    kids.iter()
                        .filter_map(|kid| built.remove(kid))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            let text = self.nodes.get(id).cloned().unwrap_or_default();
            built.insert(id, Node::new(text, kids));
        }

        tracing::trace!(root, nodes = self.nodes.len(), "converted edge list to tree");
        built
            .remove(root)
            .ok_or_else(|| Error::malformed(format!("root {root:?} was not built")))
    }

    fn resolve_root<'a>(&'a self, parent_of: &FxHashMap<&str, &str>) -> Result<&'a str> {
        if let Some(root) = &self.root {
            return match self.nodes.get_key_value(root.as_str()) {
                Some((id, _)) => Ok(id.as_str()),
                None => Err(Error::malformed(format!("root {root:?} is not a node"))),
            };
        }

        let mut roots = self
            .nodes
            .keys()
            .filter(|id| !parent_of.contains_key(id.as_str()));
        let Some(root) = roots.next() else {
            return Err(Error::malformed("every node has a parent (the graph is cyclic)"));
        };
        if let Some(other) = roots.next() {
            return Err(Error::malformed(format!(
                "there can be only one root, found {root:?} and {other:?}"
            )));
        }
        Ok(root.as_str())
    }
}
