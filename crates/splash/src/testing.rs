//! Deterministic host for controller tests.
//!
//! [`ManualHost`] queues UI work instead of running it, and keeps a virtual
//! clock for both delayed UI posts and timers. Tests drive it explicitly
//! with [`ManualHost::run_ui`] and [`ManualHost::advance`]. While the queue
//! is draining the caller counts as the UI thread, so nested UI work runs in
//! place.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use veil_primitives::{ViewArena, ViewClass, ViewId, ViewTree};
use veil_worker::{TimerHandle, TimerJob, TimerService, UiJob};

use crate::host::{HostLifecycle, HostScreen};
use crate::notify::{Notification, Notifier};

pub(crate) const FRAME: ViewClass = ViewClass::new("Frame");
pub(crate) const ROOT: ViewClass = ViewClass::new("AppRoot");

enum Pending {
	Ui(UiJob),
	Timer(TimerHandle, TimerJob),
}

#[derive(Default)]
struct Clock {
	now: Duration,
	seq: u64,
	ui: VecDeque<UiJob>,
	draining: bool,
	delayed: Vec<(Duration, u64, Pending)>,
}

pub(crate) struct ManualHost {
	views: ViewArena,
	container: Option<ViewId>,
	lifecycle: Mutex<HostLifecycle>,
	clock: Mutex<Clock>,
}

impl ManualHost {
	pub(crate) fn new() -> Arc<Self> {
		let views = ViewArena::new();
		let container = views.create(FRAME);
		Arc::new(Self {
			views,
			container: Some(container),
			lifecycle: Mutex::new(HostLifecycle::Alive),
			clock: Mutex::default(),
		})
	}

	pub(crate) fn without_container() -> Arc<Self> {
		Arc::new(Self {
			views: ViewArena::new(),
			container: None,
			lifecycle: Mutex::new(HostLifecycle::Alive),
			clock: Mutex::default(),
		})
	}

	pub(crate) fn arena(&self) -> &ViewArena {
		&self.views
	}

	pub(crate) fn container(&self) -> ViewId {
		self.container.expect("host has a container")
	}

	pub(crate) fn set_lifecycle(&self, lifecycle: HostLifecycle) {
		*self.lifecycle.lock() = lifecycle;
	}

	/// Number of delayed UI posts not yet due.
	pub(crate) fn pending_posts(&self) -> usize {
		self.clock.lock().delayed.iter().filter(|(_, _, p)| matches!(p, Pending::Ui(_))).count()
	}

	/// Number of timers that are neither due nor cancelled.
	pub(crate) fn pending_timers(&self) -> usize {
		self.clock
			.lock()
			.delayed
			.iter()
			.filter(|(_, _, p)| matches!(p, Pending::Timer(handle, _) if handle.is_pending()))
			.count()
	}

	pub(crate) fn queued_ui(&self) -> usize {
		self.clock.lock().ui.len()
	}

	/// Runs queued UI jobs until none remain.
	pub(crate) fn run_ui(&self) {
		let outer = std::mem::replace(&mut self.clock.lock().draining, true);
		loop {
			let job = self.clock.lock().ui.pop_front();
			match job {
				Some(job) => job(),
				None => break,
			}
		}
		self.clock.lock().draining = outer;
	}

	/// Runs `job` as if it were a UI job queued from elsewhere.
	pub(crate) fn run_ui_job(&self, job: impl FnOnce() + Send + 'static) {
		self.run_on_ui_thread(Box::new(job));
		self.run_ui();
	}

	/// Moves the virtual clock forward, firing everything that comes due in
	/// order and draining the UI queue after each.
	pub(crate) fn advance(&self, by: Duration) {
		let target = self.clock.lock().now + by;
		loop {
			let next = {
				let mut clock = self.clock.lock();
				let earliest = clock
					.delayed
					.iter()
					.enumerate()
					.filter(|(_, (due, _, _))| *due <= target)
					.min_by_key(|(_, (due, seq, _))| (*due, *seq))
					.map(|(idx, _)| idx);
				earliest.map(|idx| {
					let (due, _, pending) = clock.delayed.swap_remove(idx);
					clock.now = due;
					pending
				})
			};

			match next {
				Some(Pending::Ui(job)) => self.clock.lock().ui.push_back(job),
				Some(Pending::Timer(handle, job)) => {
					if handle.try_fire() {
						job();
					}
				}
				None => break,
			}
			self.run_ui();
		}
		self.clock.lock().now = target;
		self.run_ui();
	}

	fn push_delayed(&self, delay: Duration, pending: Pending) {
		let mut clock = self.clock.lock();
		clock.seq += 1;
		let entry = (clock.now + delay, clock.seq, pending);
		clock.delayed.push(entry);
	}

	/// Adds a view of `class` with `children` plain children under `parent`.
	pub(crate) fn add_view(&self, parent: ViewId, class: ViewClass, children: usize) -> ViewId {
		let view = self.views.create(class);
		for _ in 0..children {
			let child = self.views.create(FRAME);
			self.views.add_child(view, child).unwrap();
		}
		self.views.add_child(parent, view).unwrap();
		view
	}
}

impl HostScreen for ManualHost {
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
		let job = {
			let mut clock = self.clock.lock();
			if !clock.draining {
				clock.ui.push_back(job);
				return;
			}
			job
		};
		job();
	}

	fn post_delayed(&self, delay: Duration, job: UiJob) {
		self.push_delayed(delay, Pending::Ui(job));
	}
}

impl TimerService for ManualHost {
	fn schedule(&self, delay: Duration, job: TimerJob) -> TimerHandle {
		let handle = TimerHandle::new();
		self.push_delayed(delay, Pending::Timer(handle.clone(), job));
		handle
	}
}

/// Notifier that records everything it receives.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
	seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
	pub(crate) fn take(&self) -> Vec<Notification> {
		std::mem::take(&mut *self.seen.lock())
	}
}

impl Notifier for RecordingNotifier {
	fn notify(&self, notification: Notification) {
		self.seen.lock().push(notification);
	}
}
