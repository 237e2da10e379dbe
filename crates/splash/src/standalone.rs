//! Self-contained host screen.
//!
//! [`StandaloneHost`] pairs a [`UiThread`] with an in-memory [`ViewArena`],
//! for embedding the controller outside a platform view system and for
//! end-to-end tests.

use std::time::Duration;

use parking_lot::Mutex;
use veil_primitives::{ViewArena, ViewClass, ViewId, ViewTree};
use veil_worker::{UiJob, UiThread, UiThreadError};

use crate::host::{HostLifecycle, HostScreen};

/// Class of the content container created by [`StandaloneHost::new`].
pub const CONTENT_CLASS: ViewClass = ViewClass::new("ContentFrame");

pub struct StandaloneHost {
	ui: UiThread,
	views: ViewArena,
	container: Option<ViewId>,
	lifecycle: Mutex<HostLifecycle>,
}

impl std::fmt::Debug for StandaloneHost {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StandaloneHost")
			.field("container", &self.container)
			.field("lifecycle", &*self.lifecycle.lock())
			.finish_non_exhaustive()
	}
}

impl StandaloneHost {
	/// Starts a UI thread named `name` and creates an empty content container.
	pub fn new(name: impl Into<String>) -> Result<Self, UiThreadError> {
		let host = Self::without_container(name)?;
		let container = host.views.create(CONTENT_CLASS);
		Ok(Self {
			container: Some(container),
			..host
		})
	}

	/// Starts a host that has no content container.
	pub fn without_container(name: impl Into<String>) -> Result<Self, UiThreadError> {
		Ok(Self {
			ui: UiThread::spawn(name)?,
			views: ViewArena::new(),
			container: None,
			lifecycle: Mutex::new(HostLifecycle::Alive),
		})
	}

	pub fn arena(&self) -> &ViewArena {
		&self.views
	}

	pub fn ui(&self) -> &UiThread {
		&self.ui
	}

	pub fn set_lifecycle(&self, lifecycle: HostLifecycle) {
		*self.lifecycle.lock() = lifecycle;
	}
}

impl HostScreen for StandaloneHost {
	fn content_container(&self) -> Option<ViewId> {
		self.container
	}

	fn lifecycle(&self) -> HostLifecycle {
		*self.lifecycle.lock()
	}

	fn views(&self) -> &dyn ViewTree {
		&self.views
	}

	fn run_on_ui_thread(&self, job: UiJob) {
		if self.ui.is_current() {
			return job();
		}
		if let Err(err) = self.ui.dispatch(job) {
			tracing::debug!(error = %err, "splash.host.dispatch_dropped");
		}
	}

	fn post_delayed(&self, delay: Duration, job: UiJob) {
		self.ui.dispatch_after(delay, job);
	}
}
