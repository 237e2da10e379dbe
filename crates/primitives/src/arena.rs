//! Thread-safe in-memory view tree.
//!
//! [`ViewArena`] backs the standalone host and the controller tests. It
//! keeps every node in one map behind a single lock and releases that lock
//! before invoking hierarchy listeners, so listeners may freely call back
//! into the arena.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::hierarchy::{HierarchyEvent, HierarchyListener, ViewTree, ViewTreeError};
use crate::ids::{ViewClass, ViewId};

struct Node {
	class: ViewClass,
	parent: Option<ViewId>,
	children: Vec<ViewId>,
	listener: Option<HierarchyListener>,
}

#[derive(Default)]
struct ArenaState {
	next_id: u64,
	nodes: HashMap<ViewId, Node>,
}

impl ArenaState {
	fn is_ancestor(&self, candidate: ViewId, of: ViewId) -> bool {
		let mut cursor = Some(of);
		while let Some(id) = cursor {
			if id == candidate {
				return true;
			}
			cursor = self.nodes.get(&id).and_then(|n| n.parent);
		}
		false
	}
}

/// In-memory [`ViewTree`] implementation.
#[derive(Default)]
pub struct ViewArena {
	state: Mutex<ArenaState>,
}

impl std::fmt::Debug for ViewArena {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("ViewArena").field("views", &state.nodes.len()).finish()
	}
}

impl ViewArena {
	/// Creates an empty arena.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a detached view of the given class.
	pub fn create(&self, class: impl Into<ViewClass>) -> ViewId {
		let mut state = self.state.lock();
		state.next_id = state.next_id.wrapping_add(1);
		let id = ViewId(state.next_id);
		state.nodes.insert(
			id,
			Node {
				class: class.into(),
				parent: None,
				children: Vec::new(),
				listener: None,
			},
		);
		id
	}

	/// Returns true when the arena knows `view`.
	pub fn contains(&self, view: ViewId) -> bool {
		self.state.lock().nodes.contains_key(&view)
	}

	/// Detaches every child of `view` in order, firing one removal event each.
	pub fn clear_children(&self, view: ViewId) {
		for child in self.children(view) {
			self.remove_child(view, child);
		}
	}

	fn emit(listener: Option<HierarchyListener>, event: HierarchyEvent) {
		if let Some(listener) = listener {
			listener(&event);
		}
	}
}

impl ViewTree for ViewArena {
	fn parent(&self, view: ViewId) -> Option<ViewId> {
		self.state.lock().nodes.get(&view).and_then(|n| n.parent)
	}

	fn children(&self, view: ViewId) -> Vec<ViewId> {
		self.state.lock().nodes.get(&view).map(|n| n.children.clone()).unwrap_or_default()
	}

	fn child_count(&self, view: ViewId) -> usize {
		self.state.lock().nodes.get(&view).map_or(0, |n| n.children.len())
	}

	fn add_child(&self, parent: ViewId, child: ViewId) -> Result<(), ViewTreeError> {
		let listener = {
			let mut state = self.state.lock();
			if !state.nodes.contains_key(&parent) {
				return Err(ViewTreeError::UnknownView(parent));
			}
			let Some(child_node) = state.nodes.get(&child) else {
				return Err(ViewTreeError::UnknownView(child));
			};
			if let Some(existing) = child_node.parent {
				return Err(ViewTreeError::AlreadyParented { child, parent: existing });
			}
			if state.is_ancestor(child, parent) {
				return Err(ViewTreeError::Cycle { parent, child });
			}

			if let Some(node) = state.nodes.get_mut(&child) {
				node.parent = Some(parent);
			}
			let parent_node = state.nodes.get_mut(&parent).ok_or(ViewTreeError::UnknownView(parent))?;
			parent_node.children.push(child);
			parent_node.listener.clone()
		};

		Self::emit(listener, HierarchyEvent::ChildAdded { parent, child });
		Ok(())
	}

	fn remove_child(&self, parent: ViewId, child: ViewId) -> bool {
		let listener = {
			let mut state = self.state.lock();
			let Some(parent_node) = state.nodes.get_mut(&parent) else {
				return false;
			};
			let Some(pos) = parent_node.children.iter().position(|c| *c == child) else {
				return false;
			};
			parent_node.children.remove(pos);
			let listener = parent_node.listener.clone();
			if let Some(node) = state.nodes.get_mut(&child) {
				node.parent = None;
			}
			listener
		};

		Self::emit(listener, HierarchyEvent::ChildRemoved { parent, child });
		true
	}

	fn is_instance(&self, view: ViewId, class: &ViewClass) -> bool {
		self.state.lock().nodes.get(&view).is_some_and(|n| &n.class == class)
	}

	fn set_hierarchy_listener(&self, view: ViewId, listener: HierarchyListener) {
		if let Some(node) = self.state.lock().nodes.get_mut(&view) {
			node.listener = Some(listener);
		}
	}
}

#[cfg(test)]
mod tests;
