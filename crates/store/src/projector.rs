use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeKind};
use crate::store::CellStore;

/// Deep, read-only projection of a subtree, shaped for presentation layers.
///
/// Serializes to the sidebar payload
/// `{"path", "name", "kind", "content"?, "children"?}`: `content` appears on
/// cells only, `children` on folders only. The root projects with an empty
/// `path` and `name`; every other node carries its full `/`-prefixed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeSnapshot>>,
}

impl TreeSnapshot {
    pub(crate) fn of_root(children: &BTreeMap<String, Node>) -> Self {
        TreeSnapshot {
            path: String::new(),
            name: String::new(),
            kind: NodeKind::Folder,
            content: None,
            children: Some(project_children(children, "")),
        }
    }

    pub(crate) fn of_node(node: &Node, path: &str) -> Self {
        match node {
            Node::Folder { name, children } => TreeSnapshot {
                path: path.to_string(),
                name: name.clone(),
                kind: NodeKind::Folder,
                content: None,
                children: Some(project_children(children, path)),
            },
            Node::Leaf { name, content } => TreeSnapshot {
                path: path.to_string(),
                name: name.clone(),
                kind: NodeKind::Cell,
                content: Some(content.clone()),
                children: None,
            },
        }
    }
}

fn project_children(children: &BTreeMap<String, Node>, base: &str) -> Vec<TreeSnapshot> {
    children
        .values()
        .map(|child| TreeSnapshot::of_node(child, &format!("{base}/{}", child.name())))
        .collect()
}

/// Hands the sidebar its UI-ready list: the root's children, in listing
/// order. An empty store yields an empty list.
pub fn sidebar_tree(store: &CellStore) -> Vec<TreeSnapshot> {
    store
        .list_tree("/")
        .and_then(|snapshot| snapshot.children)
        .unwrap_or_default()
}
