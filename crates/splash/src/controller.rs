//! Overlay visibility state machine.
//!
//! [`SplashController`] owns the [`SplashSession`] of one overlay
//! presentation. It is driven externally by [`show`], [`prevent_auto_hide`]
//! and [`hide`], and internally by three sources that all funnel back into
//! it:
//!
//! - the root view discovery poll, re-posted on the host's UI thread every
//!   [`SplashConfig::search_interval`] until the marker class appears,
//! - the hierarchy listener installed on the discovered root view,
//! - the "still visible" warning timer armed by every show.
//!
//! Session state lives behind one lock that is never held while calling
//! into the view tree, so listener callbacks may re-enter the controller.
//!
//! [`show`]: SplashController::show
//! [`prevent_auto_hide`]: SplashController::prevent_auto_hide
//! [`hide`]: SplashController::hide

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use veil_primitives::{HierarchyEvent, ViewClass, ViewId};
use veil_worker::{TimerService, TokioTimers};

use crate::config::SplashConfig;
use crate::error::{Result, SplashError};
use crate::host::{HostScreen, OverlayFactory};
use crate::locator::RootViewLocator;
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::observer::{Reaction, react};
use crate::session::SplashSession;
use crate::warning::WarningTimer;

#[derive(Default)]
struct State {
	session: SplashSession,
	searching: bool,
	attempts: u64,
	warning: WarningTimer,
}

impl State {
	fn snapshot(&self) -> SplashSession {
		SplashSession {
			warning_armed: self.warning.is_armed(),
			..self.session
		}
	}
}

struct Inner {
	host: Weak<dyn HostScreen>,
	container: ViewId,
	overlay: ViewId,
	root_class: ViewClass,
	config: SplashConfig,
	timers: Arc<dyn TimerService>,
	notifier: Arc<dyn Notifier>,
	state: Mutex<State>,
	discarded: CancellationToken,
}

impl Inner {
	/// Returns the host only while it is alive.
	fn live_host(&self) -> Option<Arc<dyn HostScreen>> {
		self.host.upgrade().filter(|host| host.lifecycle().is_alive())
	}

	fn show(self: &Arc<Self>, on_shown: impl FnOnce() + Send + 'static) {
		let Some(host) = self.host.upgrade() else {
			tracing::debug!(overlay = %self.overlay, "splash.show.no_host");
			return;
		};
		let inner = Arc::clone(self);
		host.run_on_ui_thread(Box::new(move || inner.show_on_ui(on_shown)));
	}

	fn show_on_ui(self: &Arc<Self>, on_shown: impl FnOnce()) {
		if self.discarded.is_cancelled() {
			return;
		}
		let Some(host) = self.host.upgrade() else {
			tracing::debug!(overlay = %self.overlay, "splash.show.no_host");
			return;
		};

		let views = host.views();
		if let Some(parent) = views.parent(self.overlay) {
			views.remove_child(parent, self.overlay);
		}
		if let Err(err) = views.add_child(self.container, self.overlay) {
			tracing::warn!(overlay = %self.overlay, error = %err, "splash.show.attach_failed");
			return;
		}

		self.state.lock().session.shown = true;
		tracing::debug!(overlay = %self.overlay, container = %self.container, "splash.show");
		on_shown();

		self.start_discovery();
		self.arm_warning();
	}

	fn prevent_auto_hide(&self) -> bool {
		let mut state = self.state.lock();
		if !state.session.auto_hide_enabled || !state.session.shown {
			return false;
		}
		state.session.auto_hide_enabled = false;
		tracing::debug!(overlay = %self.overlay, "splash.prevent_auto_hide");
		true
	}

	fn hide(self: &Arc<Self>, on_result: impl FnOnce(Result<bool>) + Send + 'static) {
		if !self.state.lock().session.shown {
			return on_result(Ok(false));
		}

		let Some(host) = self.live_host() else {
			let err = SplashError::HostUnavailable;
			tracing::warn!(overlay = %self.overlay, reason = %err, "splash.hide.failed");
			return on_result(Err(err));
		};

		let inner = Arc::clone(self);
		host.run_on_ui_thread(Box::new(move || on_result(inner.hide_on_ui())));
	}

	fn hide_on_ui(&self) -> Result<bool> {
		let host = self.host.upgrade().ok_or(SplashError::HostUnavailable)?;

		{
			let mut state = self.state.lock();
			if !state.session.shown {
				return Ok(false);
			}
			state.session.shown = false;
			state.session.auto_hide_enabled = true;
			state.warning.cancel();
		}

		host.views().remove_child(self.container, self.overlay);
		tracing::debug!(overlay = %self.overlay, "splash.hide");
		Ok(true)
	}

	fn start_discovery(self: &Arc<Self>) {
		{
			let mut state = self.state.lock();
			if state.session.root_view.is_some() || state.searching {
				return;
			}
			state.searching = true;
		}
		self.search_for_root();
	}

	/// One discovery attempt; re-posts itself until the root view is found.
	fn search_for_root(self: &Arc<Self>) {
		if self.discarded.is_cancelled() {
			return;
		}
		{
			let mut state = self.state.lock();
			if state.session.root_view.is_some() {
				state.searching = false;
				return;
			}
		}
		let Some(host) = self.host.upgrade() else {
			tracing::debug!(overlay = %self.overlay, "splash.discovery.no_host");
			self.state.lock().searching = false;
			return;
		};

		let found = RootViewLocator::new(host.views(), &self.root_class, self.overlay).search(self.container);
		if let Some(root) = found {
			self.state.lock().searching = false;
			self.handle_root_found(&*host, root);
			return;
		}

		let attempt = {
			let mut state = self.state.lock();
			state.attempts = state.attempts.wrapping_add(1);
			state.attempts
		};
		tracing::trace!(attempt, class = %self.root_class, "splash.discovery.retry");

		let weak = Arc::downgrade(self);
		host.post_delayed(
			self.config.search_interval,
			Box::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner.search_for_root();
				}
			}),
		);
	}

	fn handle_root_found(self: &Arc<Self>, host: &dyn HostScreen, root: ViewId) {
		let views = host.views();
		let child_count = views.child_count(root);

		let auto_hide = {
			let mut state = self.state.lock();
			if state.session.root_view.is_some() {
				return;
			}
			state.session.root_view = Some(root);
			state.session.auto_hide_enabled
		};
		tracing::debug!(root = %root, child_count, "splash.discovery.found");

		if child_count > 0 && auto_hide {
			self.hide(|result| tracing::trace!(?result, "splash.auto_hide.on_discovery"));
		}

		let weak = Arc::downgrade(self);
		views.set_hierarchy_listener(
			root,
			Arc::new(move |event: &HierarchyEvent| {
				if let Some(inner) = weak.upgrade() {
					inner.on_hierarchy_event(event);
				}
			}),
		);
	}

	fn on_hierarchy_event(self: &Arc<Self>, event: &HierarchyEvent) {
		let (root, auto_hide) = {
			let state = self.state.lock();
			(state.session.root_view, state.session.auto_hide_enabled)
		};
		if root != Some(event.parent()) {
			return;
		}
		let Some(host) = self.host.upgrade() else {
			return;
		};

		let child_count = host.views().child_count(event.parent());
		match react(event, child_count, auto_hide) {
			Reaction::Hide => {
				tracing::debug!(?event, child_count, "splash.auto_hide");
				self.hide(|result| tracing::trace!(?result, "splash.auto_hide.on_child_added"));
			}
			Reaction::Show => {
				tracing::debug!(?event, "splash.root_emptied");
				self.show(|| {});
			}
			Reaction::Ignore => {}
		}
	}

	fn arm_warning(self: &Arc<Self>) {
		let weak = Arc::downgrade(self);
		let mut state = self.state.lock();
		state.warning.arm(
			&*self.timers,
			self.config.warning_delay,
			Box::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner.on_warning_expired();
				}
			}),
		);
	}

	fn on_warning_expired(&self) {
		if !self.config.debug_warnings {
			return;
		}
		let Some(host) = self.live_host() else {
			return;
		};

		let notifier = Arc::clone(&self.notifier);
		let message = self.config.warning_message.clone();
		tracing::debug!(delay = ?self.config.warning_delay, "splash.warning.expired");
		host.run_on_ui_thread(Box::new(move || notifier.notify(Notification::new(message))));
	}
}

/// Controls the visibility of one overlay on one host screen.
///
/// Dropping the controller stops root view discovery and cancels any pending
/// warning. The overlay itself stays wherever it currently is.
pub struct SplashController {
	inner: Arc<Inner>,
}

impl std::fmt::Debug for SplashController {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SplashController")
			.field("overlay", &self.inner.overlay)
			.field("container", &self.inner.container)
			.field("root_class", &self.inner.root_class)
			.field("session", &self.session())
			.finish()
	}
}

impl SplashController {
	/// Starts building a controller for `host`, discovering root views of
	/// `root_class` and presenting the overlay produced by `overlay`.
	pub fn builder<H>(host: &Arc<H>, root_class: ViewClass, overlay: impl OverlayFactory + 'static) -> SplashControllerBuilder
	where
		H: HostScreen + 'static,
	{
		let weak = Arc::downgrade(host);
		let weak: Weak<dyn HostScreen> = weak;
		SplashControllerBuilder {
			host: weak,
			root_class,
			overlay: Box::new(overlay),
			timers: None,
			notifier: None,
			config: SplashConfig::default(),
		}
	}

	/// Attaches the overlay to the content container on the UI thread, then
	/// runs `on_shown`, starts root view discovery, and arms the warning.
	pub fn show(&self, on_shown: impl FnOnce() + Send + 'static) {
		self.inner.show(on_shown);
	}

	/// Keeps the overlay up after the root view gets content.
	///
	/// Returns whether the call changed anything; it is a no-op while the
	/// overlay is hidden or auto-hide is already off.
	pub fn prevent_auto_hide(&self) -> bool {
		self.inner.prevent_auto_hide()
	}

	/// Detaches the overlay on the UI thread and re-enables auto-hide.
	///
	/// `on_result` receives `Ok(false)` when the overlay was not shown and
	/// [`SplashError::HostUnavailable`] when the host is gone or finishing.
	/// A failed hide leaves the session untouched.
	pub fn hide(&self, on_result: impl FnOnce(Result<bool>) + Send + 'static) {
		self.inner.hide(on_result);
	}

	/// Awaitable form of [`Self::hide`].
	pub async fn hide_async(&self) -> Result<bool> {
		let (tx, rx) = oneshot::channel();
		self.inner.hide(move |result| {
			let _ = tx.send(result);
		});
		rx.await.unwrap_or(Err(SplashError::HostUnavailable))
	}

	pub fn is_shown(&self) -> bool {
		self.inner.state.lock().session.shown
	}

	pub fn auto_hide_enabled(&self) -> bool {
		self.inner.state.lock().session.auto_hide_enabled
	}

	pub fn root_view(&self) -> Option<ViewId> {
		self.inner.state.lock().session.root_view
	}

	pub fn warning_armed(&self) -> bool {
		self.inner.state.lock().warning.is_armed()
	}

	/// Returns a copy of the current session.
	pub fn session(&self) -> SplashSession {
		self.inner.state.lock().snapshot()
	}

	pub fn overlay(&self) -> ViewId {
		self.inner.overlay
	}

	pub fn content_container(&self) -> ViewId {
		self.inner.container
	}

	/// Returns true while the host exists and is neither finishing nor destroyed.
	pub fn is_host_alive(&self) -> bool {
		self.inner.live_host().is_some()
	}
}

impl Drop for SplashController {
	fn drop(&mut self) {
		self.inner.discarded.cancel();
		self.inner.state.lock().warning.cancel();
	}
}

/// Builder for [`SplashController`].
pub struct SplashControllerBuilder {
	host: Weak<dyn HostScreen>,
	root_class: ViewClass,
	overlay: Box<dyn OverlayFactory>,
	timers: Option<Arc<dyn TimerService>>,
	notifier: Option<Arc<dyn Notifier>>,
	config: SplashConfig,
}

impl SplashControllerBuilder {
	/// Timer facility for the warning. Defaults to [`TokioTimers`].
	pub fn timers(mut self, timers: Arc<dyn TimerService>) -> Self {
		self.timers = Some(timers);
		self
	}

	/// Sink for the warning notification. Defaults to [`TracingNotifier`].
	pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	pub fn config(mut self, config: SplashConfig) -> Self {
		self.config = config;
		self
	}

	/// Resolves the content container and creates the overlay view.
	///
	/// Fails with [`SplashError::NoContentContainer`] when the host has no
	/// container, and with [`SplashError::HostUnavailable`] when the host was
	/// dropped before the build.
	pub fn build(self) -> Result<SplashController> {
		let host = self.host.upgrade().ok_or(SplashError::HostUnavailable)?;
		let container = host.content_container().ok_or(SplashError::NoContentContainer)?;
		let overlay = self.overlay.create_overlay(&*host);
		tracing::debug!(%overlay, %container, class = %self.root_class, "splash.controller.new");

		Ok(SplashController {
			inner: Arc::new(Inner {
				host: self.host,
				container,
				overlay,
				root_class: self.root_class,
				config: self.config,
				timers: self.timers.unwrap_or_else(|| Arc::new(TokioTimers)),
				notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
				state: Mutex::new(State::default()),
				discarded: CancellationToken::new(),
			}),
		})
	}
}
