use std::time::Duration;

use veil_worker::{TimerHandle, TimerJob, TimerService};

/// The single outstanding "still visible" warning of a session.
///
/// Arming replaces any previous timer; cancelling is always safe.
#[derive(Debug, Default)]
pub struct WarningTimer {
	handle: Option<TimerHandle>,
}

impl WarningTimer {
	/// Cancels any pending warning and schedules `job` after `delay`.
	pub fn arm(&mut self, timers: &dyn TimerService, delay: Duration, job: TimerJob) {
		self.cancel();
		self.handle = Some(timers.schedule(delay, job));
	}

	pub fn cancel(&mut self) {
		if let Some(handle) = self.handle.take() {
			handle.cancel();
		}
	}

	/// Returns true while a warning may still fire.
	pub fn is_armed(&self) -> bool {
		self.handle.as_ref().is_some_and(TimerHandle::is_pending)
	}
}

impl Drop for WarningTimer {
	fn drop(&mut self) {
		self.cancel();
	}
}
