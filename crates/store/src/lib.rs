//! In-memory hierarchical store of notebook cells and folders.
//!
//! The store keeps a single tree of named nodes addressed by `/`-delimited
//! paths: folders contain children, leaf cells carry a text payload. Every
//! mutation (create, update, delete, move) is synchronous and atomic, and is
//! followed by exactly one notification on the store's change bus so that
//! presentation layers (sidebar, tabs) can re-derive their views. Consumers
//! never hold live references into the tree; reads hand out owned snapshots.

pub mod bus;
pub mod node;
pub mod path;
pub mod projector;
pub mod store;

pub use bus::{ChangeBus, Subscription};
pub use node::{NodeKind, NodeView};
pub use projector::{sidebar_tree, TreeSnapshot};
pub use store::{CellStore, NodeUpdate, StoreError};
