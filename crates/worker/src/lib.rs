//! Execution plumbing for the splash controller.
//!
//! Provides the UI-affinity thread that serializes all view work, a
//! cancellable one-shot timer facility, and the shared spawn helpers both
//! are built on.

mod class;
mod spawn;
pub mod timer;
pub mod ui_thread;

pub use class::TaskClass;
pub use spawn::{spawn, spawn_named_thread};
pub use timer::{TimerHandle, TimerJob, TimerService, TokioTimers};
pub use ui_thread::{UiJob, UiThread, UiThreadError};
