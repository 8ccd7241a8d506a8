//! Serialized tree input.
//!
//! Two shapes are accepted and may be mixed freely within one document:
//!
//! - records: `{"text": "Root", "children": [...]}` (`children` may be omitted)
//! - pairs: `["Root", [...]]`

use crate::node::Node;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeInput {
    Record {
        text: String,
        #[serde(default)]
        children: Vec<NodeInput>,
    },
    Pair(String, Vec<NodeInput>),
}

impl NodeInput {
    pub fn text(&self) -> &str {
        match self {
            NodeInput::Record { text, .. } | NodeInput::Pair(text, _) => text,
        }
    }

    pub fn children(&self) -> &[NodeInput] {
        match self {
            NodeInput::Record { children, .. } | NodeInput::Pair(_, children) => children,
        }
    }

    pub fn into_parts(self) -> (String, Vec<NodeInput>) {
        match self {
            NodeInput::Record { text, children } | NodeInput::Pair(text, children) => {
                (text, children)
            }
        }
    }
}

impl From<NodeInput> for Node {
    fn from(input: NodeInput) -> Self {
        let (text, children) = input.into_parts();
        Node::new(text, children.into_iter().map(Node::from).collect())
    }
}

impl From<&Node> for NodeInput {
    fn from(node: &Node) -> Self {
        NodeInput::Record {
            text: node.text.clone(),
            children: node.children.iter().map(NodeInput::from).collect(),
        }
    }
}

/// Parses a JSON document into a tree.
///
/// Returns `Ok(None)` for a JSON `null`: an absent tree is not an error, there is simply nothing
/// to lay out.
pub fn parse_tree_json(text: &str) -> Result<Option<Node>> {
    let input: Option<NodeInput> = serde_json::from_str(text)?;
    Ok(input.map(Node::from))
}

/// Like [`parse_tree_json`], for an already parsed JSON value.
pub fn tree_from_value(value: serde_json::Value) -> Result<Option<Node>> {
    if value.is_null() {
        return Ok(None);
    }
    let input = NodeInput::deserialize(value).map_err(Error::Json)?;
    Ok(Some(Node::from(input)))
}
