//! Reaction rules for changes under the discovered root view.

use veil_primitives::HierarchyEvent;

/// What the controller does in response to a root view hierarchy change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
	Hide,
	Show,
	Ignore,
}

/// Maps one root view event to a controller reaction.
///
/// `child_count` is the root view's child count after the change. The first
/// child appearing hides the overlay only while auto-hide is enabled; the
/// root view becoming empty always shows it again.
pub fn react(event: &HierarchyEvent, child_count: usize, auto_hide_enabled: bool) -> Reaction {
	match event {
		HierarchyEvent::ChildAdded { .. } if child_count == 1 && auto_hide_enabled => Reaction::Hide,
		HierarchyEvent::ChildRemoved { .. } if child_count == 0 => Reaction::Show,
		_ => Reaction::Ignore,
	}
}
