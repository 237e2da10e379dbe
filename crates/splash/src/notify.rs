//! Notification requests issued by the controller.
//!
//! The controller only ever issues the debug "still visible" warning; the
//! [`Notifier`] decides how (or whether) it reaches the user.

/// A transient, user-visible warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub message: String,
}

impl Notification {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
	fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
	F: Fn(Notification) + Send + Sync,
{
	fn notify(&self, notification: Notification) {
		self(notification);
	}
}

/// Emits notifications as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(&self, notification: Notification) {
		tracing::warn!(message = %notification.message, "splash.notify");
	}
}
