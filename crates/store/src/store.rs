use std::collections::BTreeMap;

use thiserror::Error;

use crate::bus::{ChangeBus, Subscription};
use crate::node::{Node, NodeKind, NodeView};
use crate::path;
use crate::projector::TreeSnapshot;

/// Errors raised by store operations.
///
/// All failures are synchronous and leave the tree untouched; callers recover
/// by choosing a different input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no node at {0}")]
    NotFound(String),
    #[error("a node already exists at {0}")]
    AlreadyExists(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("unsupported node kind: {0}")]
    InvalidKind(String),
}

/// Requested changes for `CellStore::update`. Absent fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct NodeUpdate {
    pub content: Option<String>,
    pub new_name: Option<String>,
}

impl NodeUpdate {
    /// Update that replaces a cell's content.
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            new_name: None,
        }
    }

    /// Update that renames the node within its current parent.
    pub fn rename(value: impl Into<String>) -> Self {
        Self {
            content: None,
            new_name: Some(value.into()),
        }
    }
}

/// The in-memory tree of folders and cells, addressed by `/`-paths.
///
/// The root folder always exists and is never created, renamed, or deleted.
/// Each store instance owns its own tree and change bus; construct one per
/// collaborator graph (or per test) instead of sharing process globals.
/// Every operation is a single logical step: observers never see a
/// half-applied rename or move, and multi-threaded hosts should guard the
/// whole store with one mutex.
#[derive(Debug, Default)]
pub struct CellStore {
    root: BTreeMap<String, Node>,
    bus: ChangeBus,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler invoked after every successful mutation.
    pub fn subscribe(&mut self, handler: impl Fn() + 'static) -> Subscription {
        self.bus.subscribe(handler)
    }

    /// Drops a previously registered handler. Unknown tokens are a no-op.
    pub fn unsubscribe(&mut self, token: Subscription) {
        self.bus.unsubscribe(token);
    }

    /// Creates a folder or cell at `path`, auto-creating missing intermediate
    /// folders. `content` only applies to cells and defaults to empty.
    ///
    /// Fails with `AlreadyExists` if the final segment is already taken, and
    /// with `InvalidPath` if the path denotes the root or runs through a
    /// cell. Failures create nothing, including intermediate folders.
    pub fn create(
        &mut self,
        kind: NodeKind,
        path: &str,
        content: Option<&str>,
    ) -> Result<(), StoreError> {
        let (parent_segs, name) = path::split_parent(path)?;
        let parent = self.ensure_folder(&parent_segs, path)?;
        if parent.contains_key(&name) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        let node = match kind {
            NodeKind::Folder => Node::folder(name.clone()),
            NodeKind::Cell => Node::leaf(name.clone(), content.unwrap_or_default()),
        };
        parent.insert(name, node);
        self.bus.notify_all();
        Ok(())
    }

    /// Returns an owned snapshot of the node at `path`.
    ///
    /// The root reads as an unnamed folder; any unresolved segment fails with
    /// `NotFound`.
    pub fn read(&self, path: &str) -> Result<NodeView, StoreError> {
        let segs = path::segments(path);
        if segs.is_empty() {
            return Ok(NodeView {
                name: String::new(),
                kind: NodeKind::Folder,
                content: None,
            });
        }
        self.node_at(&segs)
            .map(Node::view)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    /// Applies `update` to the node at `path` and notifies subscribers.
    ///
    /// Content replacement only affects cells; on a folder it is a silent
    /// no-op. A rename to a sibling's name fails with `AlreadyExists` and
    /// changes nothing, content change included.
    pub fn update(&mut self, path: &str, update: NodeUpdate) -> Result<(), StoreError> {
        let (parent_segs, name) = path::split_parent(path)?;
        let parent = self
            .folder_children_mut(&parent_segs)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        if !parent.contains_key(&name) {
            return Err(StoreError::NotFound(path.to_string()));
        }

        // Validate the rename before touching anything so a collision cannot
        // leave a half-applied update behind.
        let rename = match update.new_name {
            Some(new_name) if new_name != name => {
                if new_name.is_empty() || new_name.contains('/') {
                    return Err(StoreError::InvalidPath(new_name));
                }
                if parent.contains_key(&new_name) {
                    return Err(StoreError::AlreadyExists(new_name));
                }
                Some(new_name)
            }
            _ => None,
        };

        if let Some(content) = update.content {
            if let Some(Node::Leaf { content: slot, .. }) = parent.get_mut(&name) {
                *slot = content;
            }
        }
        if let Some(new_name) = rename {
            if let Some(mut node) = parent.remove(&name) {
                node.set_name(new_name.clone());
                parent.insert(new_name, node);
            }
        }
        self.bus.notify_all();
        Ok(())
    }

    /// Removes the node at `path` and, for folders, its entire subtree.
    ///
    /// Deleting the root fails with `InvalidPath`.
    pub fn delete(&mut self, path: &str) -> Result<(), StoreError> {
        let (parent_segs, name) = path::split_parent(path)?;
        let parent = self
            .folder_children_mut(&parent_segs)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        if parent.remove(&name).is_none() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        self.bus.notify_all();
        Ok(())
    }

    /// Relinks the node at `src` to `dest`, taking dest's final segment as
    /// its new name and auto-creating dest's missing parent folders.
    ///
    /// Moving the root, moving a folder into itself or any of its own
    /// descendants, or routing dest through a cell fails with `InvalidPath`;
    /// an occupied dest fails with `AlreadyExists`. All checks run before any
    /// mutation, so a failed move commits nothing.
    pub fn move_node(&mut self, src: &str, dest: &str) -> Result<(), StoreError> {
        let (src_parent, src_name) = path::split_parent(src)?;
        let (dest_parent, dest_name) = path::split_parent(dest)?;

        let mut src_segs = src_parent.clone();
        src_segs.push(src_name.clone());
        let mut dest_segs = dest_parent.clone();
        dest_segs.push(dest_name.clone());

        let src_node = self
            .node_at(&src_segs)
            .ok_or_else(|| StoreError::NotFound(src.to_string()))?;
        if src_node.kind().is_folder() && dest_segs.starts_with(&src_segs) {
            return Err(StoreError::InvalidPath(dest.to_string()));
        }
        if src_segs == dest_segs {
            return Err(StoreError::AlreadyExists(dest.to_string()));
        }
        self.validate_destination(&dest_parent, &dest_name, dest)?;

        let parent = self
            .folder_children_mut(&src_parent)
            .ok_or_else(|| StoreError::NotFound(src.to_string()))?;
        let mut node = match parent.remove(&src_name) {
            Some(node) => node,
            None => return Err(StoreError::NotFound(src.to_string())),
        };
        node.set_name(dest_name.clone());
        let target = self.ensure_folder(&dest_parent, dest)?;
        target.insert(dest_name, node);
        self.bus.notify_all();
        Ok(())
    }

    /// Produces a deep, read-only projection of the subtree at `path`, or
    /// `None` when the path does not resolve. The snapshot never reflects
    /// mutations made after this call returns.
    pub fn list_tree(&self, path: &str) -> Option<TreeSnapshot> {
        let segs = path::segments(path);
        if segs.is_empty() {
            return Some(TreeSnapshot::of_root(&self.root));
        }
        let node = self.node_at(&segs)?;
        let full_path = format!("/{}", segs.join("/"));
        Some(TreeSnapshot::of_node(node, &full_path))
    }

    /// Drops every node, restoring the empty root. Subscriptions survive and
    /// the reset itself is announced like any other mutation.
    pub fn reset(&mut self) {
        self.root.clear();
        self.bus.notify_all();
    }

    fn node_at(&self, segs: &[String]) -> Option<&Node> {
        let mut iter = segs.iter();
        let mut node = self.root.get(iter.next()?)?;
        for seg in iter {
            node = node.children()?.get(seg)?;
        }
        Some(node)
    }

    fn folder_children_mut(&mut self, segs: &[String]) -> Option<&mut BTreeMap<String, Node>> {
        let mut current = &mut self.root;
        for seg in segs {
            current = current.get_mut(seg)?.children_mut()?;
        }
        Some(current)
    }

    /// Resolves the folder at `segs`, creating missing intermediates.
    ///
    /// A segment resolving to a cell fails with `InvalidPath` before anything
    /// is created; once a missing segment has been filled in, every deeper
    /// segment is a fresh folder and cannot collide.
    fn ensure_folder(
        &mut self,
        segs: &[String],
        full_path: &str,
    ) -> Result<&mut BTreeMap<String, Node>, StoreError> {
        let mut current = &mut self.root;
        for seg in segs {
            current = current
                .entry(seg.clone())
                .or_insert_with(|| Node::folder(seg.clone()))
                .children_mut()
                .ok_or_else(|| StoreError::InvalidPath(full_path.to_string()))?;
        }
        Ok(current)
    }

    /// Checks a move destination without mutating: the existing part of the
    /// parent chain must be folders all the way down, and the final slot must
    /// be free. Once the chain goes missing the slot cannot be occupied.
    fn validate_destination(
        &self,
        parent_segs: &[String],
        name: &str,
        dest: &str,
    ) -> Result<(), StoreError> {
        let mut current = &self.root;
        for seg in parent_segs {
            match current.get(seg) {
                Some(node) => match node.children() {
                    Some(children) => current = children,
                    None => return Err(StoreError::InvalidPath(dest.to_string())),
                },
                None => return Ok(()),
            }
        }
        if current.contains_key(name) {
            return Err(StoreError::AlreadyExists(dest.to_string()));
        }
        Ok(())
    }
}
