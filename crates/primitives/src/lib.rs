//! Core view tree types shared by the splash controller and its hosts.

/// In-memory view tree.
pub mod arena;
/// Hierarchy events, listeners, and the view tree collaborator trait.
pub mod hierarchy;
/// Identifier types for views and marker classes.
pub mod ids;

pub use arena::ViewArena;
pub use hierarchy::{HierarchyEvent, HierarchyListener, ViewTree, ViewTreeError};
pub use ids::{ViewClass, ViewId};
