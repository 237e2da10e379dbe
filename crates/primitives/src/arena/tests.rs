use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;

const FRAME: ViewClass = ViewClass::new("Frame");
const ROOT: ViewClass = ViewClass::new("AppRoot");

#[test]
fn add_and_remove_preserve_order_and_parent_links() {
	let arena = ViewArena::new();
	let container = arena.create(FRAME);
	let a = arena.create(FRAME);
	let b = arena.create(ROOT);

	arena.add_child(container, a).unwrap();
	arena.add_child(container, b).unwrap();
	assert_eq!(arena.children(container), vec![a, b]);
	assert_eq!(arena.parent(b), Some(container));

	assert!(arena.remove_child(container, a));
	assert_eq!(arena.children(container), vec![b]);
	assert_eq!(arena.parent(a), None);
}

#[test]
fn remove_child_tolerates_absent_views() {
	let arena = ViewArena::new();
	let container = arena.create(FRAME);
	let stray = arena.create(FRAME);

	assert!(!arena.remove_child(container, stray));
	assert!(!arena.remove_child(ViewId(999), stray));
	assert_eq!(arena.parent(stray), None);
}

#[test]
fn add_child_rejects_second_parent_and_cycles() {
	let arena = ViewArena::new();
	let outer = arena.create(FRAME);
	let inner = arena.create(FRAME);
	let other = arena.create(FRAME);

	arena.add_child(outer, inner).unwrap();
	assert_eq!(
		arena.add_child(other, inner),
		Err(ViewTreeError::AlreadyParented { child: inner, parent: outer })
	);
	assert_eq!(arena.add_child(inner, outer), Err(ViewTreeError::Cycle { parent: inner, child: outer }));
	assert_eq!(arena.add_child(outer, ViewId(42)), Err(ViewTreeError::UnknownView(ViewId(42))));
}

#[test]
fn listener_sees_post_change_counts_and_may_reenter() {
	let arena = Arc::new(ViewArena::new());
	let root = arena.create(ROOT);
	let seen = Arc::new(Mutex::new(Vec::new()));

	let weak = Arc::downgrade(&arena);
	let log = Arc::clone(&seen);
	arena.set_hierarchy_listener(
		root,
		Arc::new(move |event: &HierarchyEvent| {
			let Some(arena) = weak.upgrade() else { return };
			log.lock().push((*event, arena.child_count(event.parent())));
		}),
	);

	let child = arena.create(FRAME);
	arena.add_child(root, child).unwrap();
	arena.clear_children(root);

	assert_eq!(
		*seen.lock(),
		vec![
			(HierarchyEvent::ChildAdded { parent: root, child }, 1),
			(HierarchyEvent::ChildRemoved { parent: root, child }, 0),
		]
	);
}

#[test]
fn is_instance_matches_exact_class() {
	let arena = ViewArena::new();
	let root = arena.create(ROOT);
	assert!(arena.is_instance(root, &ROOT));
	assert!(!arena.is_instance(root, &FRAME));
	assert!(arena.is_instance(root, &ViewClass::new("AppRoot")));
	assert!(!arena.is_instance(ViewId(999), &ROOT));
}
