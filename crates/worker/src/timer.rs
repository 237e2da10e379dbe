//! Cancellable one-shot timers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::TaskClass;

/// Work run once when a timer expires.
pub type TimerJob = Box<dyn FnOnce() + Send + 'static>;

/// Handle to one scheduled timer.
///
/// Cancelling is idempotent: cancelling twice, cancelling after expiry, or
/// cancelling a handle that was never armed are all no-ops.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
	cancel: CancellationToken,
	fired: Arc<AtomicBool>,
}

impl TimerHandle {
	/// Creates a pending handle.
	///
	/// Timer implementations call [`Self::try_fire`] on expiry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests cancellation.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Returns true when cancellation was requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Returns true when the timer has fired.
	pub fn has_fired(&self) -> bool {
		self.fired.load(Ordering::Acquire)
	}

	/// Returns true while the timer may still fire.
	pub fn is_pending(&self) -> bool {
		!self.is_cancelled() && !self.has_fired()
	}

	/// Marks the timer fired unless it was cancelled first.
	///
	/// Returns true exactly once, for the caller that should run the job.
	pub fn try_fire(&self) -> bool {
		if self.is_cancelled() {
			return false;
		}
		!self.fired.swap(true, Ordering::AcqRel)
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}

/// Delayed scheduling primitive.
pub trait TimerService: Send + Sync {
	/// Runs `job` once after `delay` unless the returned handle is cancelled.
	fn schedule(&self, delay: Duration, job: TimerJob) -> TimerHandle;
}

/// [`TimerService`] backed by tokio timers.
///
/// Jobs run on a runtime worker, not on the UI thread; callers that touch
/// views must dispatch from inside the job.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimers;

impl TimerService for TokioTimers {
	fn schedule(&self, delay: Duration, job: TimerJob) -> TimerHandle {
		let handle = TimerHandle::new();
		let timer = handle.clone();
		crate::spawn(TaskClass::Timer, async move {
			tokio::select! {
				_ = timer.cancelled() => {
					tracing::trace!(?delay, "worker.timer.cancelled");
				}
				_ = tokio::time::sleep(delay) => {
					if timer.try_fire() {
						tracing::trace!(?delay, "worker.timer.fired");
						job();
					}
				}
			}
		});
		handle
	}
}
