//! Depth-first search for the application root view.

use veil_primitives::{ViewClass, ViewId, ViewTree};

/// Finds the first view of a marker class under a container, skipping the
/// overlay subtree.
pub struct RootViewLocator<'a> {
	views: &'a dyn ViewTree,
	marker: &'a ViewClass,
	excluded: ViewId,
}

impl<'a> RootViewLocator<'a> {
	pub fn new(views: &'a dyn ViewTree, marker: &'a ViewClass, excluded: ViewId) -> Self {
		Self { views, marker, excluded }
	}

	/// Returns the first match in pre-order, starting with `from` itself.
	pub fn search(&self, from: ViewId) -> Option<ViewId> {
		let mut stack = vec![from];
		while let Some(view) = stack.pop() {
			if view == self.excluded {
				continue;
			}
			if self.views.is_instance(view, self.marker) {
				return Some(view);
			}
			stack.extend(self.views.children(view).into_iter().rev());
		}
		None
	}
}
