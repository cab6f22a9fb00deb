use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// The kind of node stored in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Cell,
}

impl NodeKind {
    pub fn is_folder(self) -> bool {
        matches!(self, NodeKind::Folder)
    }
}

impl FromStr for NodeKind {
    type Err = StoreError;

    /// Parses the `"folder"` / `"cell"` tags used at the collaborator
    /// boundary; anything else fails with `InvalidKind`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "folder" => Ok(NodeKind::Folder),
            "cell" => Ok(NodeKind::Cell),
            other => Err(StoreError::InvalidKind(other.to_string())),
        }
    }
}

/// A live node in the store's tree. Only snapshots leave the crate.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Folder {
        name: String,
        children: BTreeMap<String, Node>,
    },
    Leaf {
        name: String,
        content: String,
    },
}

impl Node {
    pub(crate) fn folder(name: impl Into<String>) -> Self {
        Node::Folder {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    pub(crate) fn leaf(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::Leaf {
            name: name.into(),
            content: content.into(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } | Node::Leaf { name, .. } => name,
        }
    }

    pub(crate) fn set_name(&mut self, new_name: impl Into<String>) {
        match self {
            Node::Folder { name, .. } | Node::Leaf { name, .. } => *name = new_name.into(),
        }
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Node::Folder { .. } => NodeKind::Folder,
            Node::Leaf { .. } => NodeKind::Cell,
        }
    }

    /// Child map of a folder; `None` for leaves, which never have children.
    pub(crate) fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Leaf { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, Node>> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Leaf { .. } => None,
        }
    }

    pub(crate) fn view(&self) -> NodeView {
        match self {
            Node::Folder { name, .. } => NodeView {
                name: name.clone(),
                kind: NodeKind::Folder,
                content: None,
            },
            Node::Leaf { name, content } => NodeView {
                name: name.clone(),
                kind: NodeKind::Cell,
                content: Some(content.clone()),
            },
        }
    }
}

/// Shallow owned snapshot of a single node, handed out by `CellStore::read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_parse() {
        assert_eq!("folder".parse::<NodeKind>().unwrap(), NodeKind::Folder);
        assert_eq!("cell".parse::<NodeKind>().unwrap(), NodeKind::Cell);
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let err = "notebook".parse::<NodeKind>().unwrap_err();
        assert_eq!(err, StoreError::InvalidKind("notebook".to_string()));
    }

    #[test]
    fn leaf_view_carries_content() {
        let node = Node::leaf("notes.md", "# Notes");
        let view = node.view();
        assert_eq!(view.name, "notes.md");
        assert_eq!(view.kind, NodeKind::Cell);
        assert_eq!(view.content.as_deref(), Some("# Notes"));
    }

    #[test]
    fn folder_view_has_no_content() {
        let node = Node::folder("docs");
        let view = node.view();
        assert_eq!(view.kind, NodeKind::Folder);
        assert!(view.content.is_none());
    }
}
