//! Per-host controller registry.
//!
//! Bridging layers address overlays by host screen rather than by
//! controller. [`SplashRegistry`] keeps one controller per [`HostKey`] and
//! forwards the public operations, failing for unknown hosts.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::controller::SplashController;
use crate::error::{Result, SplashError};

/// Identity of one host screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostKey(pub u64);

impl fmt::Display for HostKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "host#{}", self.0)
	}
}

/// In-memory map of host screens to their controllers.
#[derive(Debug, Default, Clone)]
pub struct SplashRegistry {
	inner: Arc<RwLock<HashMap<HostKey, Arc<SplashController>>>>,
}

impl SplashRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `controller` for `key`, returning the one it replaces.
	pub fn register(&self, key: HostKey, controller: SplashController) -> Option<Arc<SplashController>> {
		tracing::debug!(%key, overlay = %controller.overlay(), "splash.registry.register");
		self.inner.write().insert(key, Arc::new(controller))
	}

	pub fn get(&self, key: HostKey) -> Option<Arc<SplashController>> {
		self.inner.read().get(&key).cloned()
	}

	pub fn remove(&self, key: HostKey) -> Option<Arc<SplashController>> {
		self.inner.write().remove(&key)
	}

	/// Returns registered keys in ascending order.
	pub fn keys(&self) -> Vec<HostKey> {
		let mut keys: Vec<_> = self.inner.read().keys().copied().collect();
		keys.sort();
		keys
	}

	/// Drops controllers whose host is no longer alive. Returns how many.
	pub fn prune(&self) -> usize {
		let mut guard = self.inner.write();
		let before = guard.len();
		guard.retain(|_, controller| controller.is_host_alive());
		let pruned = before - guard.len();
		if pruned > 0 {
			tracing::debug!(pruned, "splash.registry.prune");
		}
		pruned
	}

	fn require(&self, key: HostKey) -> Result<Arc<SplashController>> {
		self.get(key).ok_or(SplashError::NotRegistered(key))
	}

	/// Shows the overlay registered for `key`.
	pub fn show(&self, key: HostKey, on_shown: impl FnOnce() + Send + 'static) -> Result<()> {
		self.require(key)?.show(on_shown);
		Ok(())
	}

	pub fn prevent_auto_hide(&self, key: HostKey) -> Result<bool> {
		Ok(self.require(key)?.prevent_auto_hide())
	}

	/// Hides the overlay registered for `key`; unknown keys are reported
	/// through `on_result`.
	pub fn hide(&self, key: HostKey, on_result: impl FnOnce(Result<bool>) + Send + 'static) {
		match self.require(key) {
			Ok(controller) => controller.hide(on_result),
			Err(err) => on_result(Err(err)),
		}
	}
}
