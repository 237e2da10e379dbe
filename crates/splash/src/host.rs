//! Host screen collaborator.

use std::time::Duration;

use veil_primitives::{ViewId, ViewTree};
use veil_worker::UiJob;

/// Liveness of a host screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostLifecycle {
	#[default]
	Alive,
	/// Closing; still present but must not be mutated.
	Finishing,
	Destroyed,
}

impl HostLifecycle {
	pub const fn is_alive(self) -> bool {
		matches!(self, Self::Alive)
	}
}

/// The screen an overlay is presented on.
///
/// Owns the view tree and the UI-affinity thread. Controllers only hold a
/// weak reference, so a host may disappear between any two calls.
pub trait HostScreen: Send + Sync {
	/// Returns the top-level container into which the overlay and the
	/// application root view are placed.
	fn content_container(&self) -> Option<ViewId>;

	fn lifecycle(&self) -> HostLifecycle;

	/// Returns the host's view tree.
	fn views(&self) -> &dyn ViewTree;

	/// Runs `job` in place when called on the UI-affinity thread, otherwise
	/// queues it there behind earlier work.
	fn run_on_ui_thread(&self, job: UiJob);

	/// Queues `job` onto the UI-affinity thread after `delay`.
	fn post_delayed(&self, delay: Duration, job: UiJob);
}

/// Produces the overlay view for a host, once, before the controller starts.
pub trait OverlayFactory: Send + Sync {
	fn create_overlay(&self, host: &dyn HostScreen) -> ViewId;
}

impl<F> OverlayFactory for F
where
	F: Fn(&dyn HostScreen) -> ViewId + Send + Sync,
{
	fn create_overlay(&self, host: &dyn HostScreen) -> ViewId {
		self(host)
	}
}
