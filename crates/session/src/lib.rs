//! Session and selection state for cellbook front ends.
//!
//! Pure in-memory bookkeeping driven by collaborator calls: which cells are
//! open as tabs, which one is selected, which sidebar folders are expanded,
//! and which sidebar view is active. Nothing here touches the store or any
//! I/O; hosts react to store change notifications and call into these types.

pub mod sidebar;
pub mod tabs;

pub use sidebar::{SidebarState, DEFAULT_SIDEBAR_VIEW};
pub use tabs::{OpenCell, TabId, TabRegistry};
