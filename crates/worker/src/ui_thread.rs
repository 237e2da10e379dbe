//! Dedicated UI-affinity thread.
//!
//! [`UiThread`] owns one named OS thread that runs submitted jobs strictly in
//! submission order, one at a time. Work arriving from any other context is
//! queued rather than executed in place.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread::{JoinHandle, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::timer::{TimerHandle, TimerService, TokioTimers};
use crate::{TaskClass, spawn_named_thread};

/// Work executed on the UI-affinity thread.
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Errors from the UI thread.
#[derive(Debug, Error)]
pub enum UiThreadError {
	/// The OS thread could not be started.
	#[error("failed to spawn UI thread: {0}")]
	Spawn(#[from] std::io::Error),

	/// The UI thread has shut down and no longer accepts work.
	#[error("UI thread is closed")]
	Closed,
}

enum UiMessage {
	Run(UiJob),
	Shutdown,
}

/// Handle to a running UI-affinity thread.
pub struct UiThread {
	tx: mpsc::UnboundedSender<UiMessage>,
	thread_id: ThreadId,
	join: Mutex<Option<JoinHandle<()>>>,
	timers: Arc<dyn TimerService>,
}

impl std::fmt::Debug for UiThread {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("UiThread")
			.field("thread_id", &self.thread_id)
			.field("closed", &self.tx.is_closed())
			.finish_non_exhaustive()
	}
}

impl UiThread {
	/// Starts a UI thread with the given name, using tokio timers for
	/// delayed dispatch.
	pub fn spawn(name: impl Into<String>) -> Result<Self, UiThreadError> {
		Self::with_timers(name, Arc::new(TokioTimers))
	}

	/// Starts a UI thread that uses `timers` for delayed dispatch.
	pub fn with_timers(name: impl Into<String>, timers: Arc<dyn TimerService>) -> Result<Self, UiThreadError> {
		let (tx, mut rx) = mpsc::unbounded_channel::<UiMessage>();
		let join = spawn_named_thread(TaskClass::Ui, name, move || {
			while let Some(msg) = rx.blocking_recv() {
				match msg {
					UiMessage::Run(job) => {
						if std::panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
							tracing::error!("ui.job.panicked");
						}
					}
					UiMessage::Shutdown => break,
				}
			}
			tracing::debug!("ui.thread.exit");
		})?;

		Ok(Self {
			tx,
			thread_id: join.thread().id(),
			join: Mutex::new(Some(join)),
			timers,
		})
	}

	/// Returns true when called from this UI thread.
	pub fn is_current(&self) -> bool {
		std::thread::current().id() == self.thread_id
	}

	/// Queues `job` to run on the UI thread after all previously queued work.
	pub fn dispatch(&self, job: UiJob) -> Result<(), UiThreadError> {
		self.tx.send(UiMessage::Run(job)).map_err(|_| UiThreadError::Closed)
	}

	/// Queues `job` onto the UI thread once `delay` has elapsed.
	///
	/// If the thread has shut down by then, the job is dropped.
	pub fn dispatch_after(&self, delay: Duration, job: UiJob) -> TimerHandle {
		let tx = self.tx.clone();
		self.timers.schedule(
			delay,
			Box::new(move || {
				if tx.send(UiMessage::Run(job)).is_err() {
					tracing::debug!(?delay, "ui.dispatch_after.closed");
				}
			}),
		)
	}

	/// Stops the thread after the work already queued ahead of this call.
	///
	/// Blocks until the thread exits unless called from the UI thread itself.
	pub fn shutdown(&self) {
		let _ = self.tx.send(UiMessage::Shutdown);
		if self.is_current() {
			return;
		}
		if let Some(join) = self.join.lock().take()
			&& join.join().is_err()
		{
			tracing::error!("ui.thread.join_failed");
		}
	}
}

impl Drop for UiThread {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests;
