//! Controller configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval between root view discovery attempts.
pub const DEFAULT_SEARCH_INTERVAL: Duration = Duration::from_millis(20);

/// Delay before the "still visible" warning fires.
pub const DEFAULT_WARNING_DELAY: Duration = Duration::from_secs(20);

/// Default text of the "still visible" warning.
pub const DEFAULT_WARNING_MESSAGE: &str = "overlay visible for over 20 seconds - was hide forgotten?";

/// Tunables for one [`SplashController`](crate::SplashController).
///
/// Replaces the build-mode global of typical platform integrations with an
/// explicit `debug_warnings` flag, defaulting to whether debug assertions
/// are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
	/// Delay between discovery polls while the root view is missing.
	pub search_interval: Duration,
	/// Time the overlay may stay visible before the warning fires.
	pub warning_delay: Duration,
	/// Whether the warning notification is issued at all.
	pub debug_warnings: bool,
	/// Text of the warning notification.
	pub warning_message: String,
}

impl Default for SplashConfig {
	fn default() -> Self {
		Self {
			search_interval: DEFAULT_SEARCH_INTERVAL,
			warning_delay: DEFAULT_WARNING_DELAY,
			debug_warnings: cfg!(debug_assertions),
			warning_message: DEFAULT_WARNING_MESSAGE.to_string(),
		}
	}
}

impl SplashConfig {
	pub fn with_search_interval(mut self, interval: Duration) -> Self {
		self.search_interval = interval;
		self
	}

	pub fn with_warning_delay(mut self, delay: Duration) -> Self {
		self.warning_delay = delay;
		self
	}

	pub fn with_debug_warnings(mut self, enabled: bool) -> Self {
		self.debug_warnings = enabled;
		self
	}

	pub fn with_warning_message(mut self, message: impl Into<String>) -> Self {
		self.warning_message = message.into();
		self
	}
}
