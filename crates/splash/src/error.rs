//! Error types for the splash controller.

use thiserror::Error;

use crate::registry::HostKey;

/// Errors reported by splash controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplashError {
	/// The host screen has no content container to attach the overlay to.
	#[error("host screen has no content container")]
	NoContentContainer,

	/// The host screen has been destroyed or is finishing.
	#[error("cannot hide overlay on a destroyed host screen")]
	HostUnavailable,

	/// No controller is registered for the given host screen.
	#[error("no overlay registered for host {0}")]
	NotRegistered(HostKey),
}

/// Result type for splash operations.
pub type Result<T> = std::result::Result<T, SplashError>;
