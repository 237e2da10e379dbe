use std::sync::Arc;

use thiserror::Error;

use crate::ids::{ViewClass, ViewId};

/// Change to the direct child list of one view.
///
/// Delivered after the child list has been mutated, so a listener querying
/// [`ViewTree::child_count`] observes the post-change count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyEvent {
	ChildAdded { parent: ViewId, child: ViewId },
	ChildRemoved { parent: ViewId, child: ViewId },
}

impl HierarchyEvent {
	/// Returns the view whose child list changed.
	pub const fn parent(&self) -> ViewId {
		match *self {
			Self::ChildAdded { parent, .. } | Self::ChildRemoved { parent, .. } => parent,
		}
	}

	/// Returns the child that was added or removed.
	pub const fn child(&self) -> ViewId {
		match *self {
			Self::ChildAdded { child, .. } | Self::ChildRemoved { child, .. } => child,
		}
	}
}

/// Callback receiving hierarchy changes for one view.
pub type HierarchyListener = Arc<dyn Fn(&HierarchyEvent) + Send + Sync>;

/// Errors from structural view tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewTreeError {
	/// The handle does not name a view in this tree.
	#[error("unknown view: {0}")]
	UnknownView(ViewId),

	/// The child must be detached before it can be attached elsewhere.
	#[error("{child} already has a parent ({parent})")]
	AlreadyParented {
		/// View being attached.
		child: ViewId,
		/// Its current parent.
		parent: ViewId,
	},

	/// Attaching would make a view its own ancestor.
	#[error("attaching {child} under {parent} would create a cycle")]
	Cycle {
		/// Prospective parent.
		parent: ViewId,
		/// View being attached.
		child: ViewId,
	},
}

/// View tree operations consumed by the splash controller.
///
/// Implementations are owned by the host screen. All methods are expected to
/// be called from the host's UI-affinity thread, but must not deadlock if a
/// listener calls back into the tree.
pub trait ViewTree: Send + Sync {
	/// Returns the current parent of `view`, if attached.
	fn parent(&self, view: ViewId) -> Option<ViewId>;

	/// Returns the direct children of `view` in order.
	fn children(&self, view: ViewId) -> Vec<ViewId>;

	/// Returns the number of direct children of `view`.
	fn child_count(&self, view: ViewId) -> usize {
		self.children(view).len()
	}

	/// Appends `child` to the child list of `parent`.
	fn add_child(&self, parent: ViewId, child: ViewId) -> Result<(), ViewTreeError>;

	/// Removes `child` from `parent`.
	///
	/// Removing a view that is not a child of `parent` is tolerated and
	/// returns `false`.
	fn remove_child(&self, parent: ViewId, child: ViewId) -> bool;

	/// Returns true when `view` is an instance of `class`.
	fn is_instance(&self, view: ViewId, class: &ViewClass) -> bool;

	/// Installs the hierarchy listener for `view`, replacing any previous one.
	fn set_hierarchy_listener(&self, view: ViewId, listener: HierarchyListener);
}
