//! Visibility controller for an application's launch overlay.
//!
//! A [`SplashController`] attaches an overlay view to a host screen's content
//! container, polls the container for the application's real root view, and
//! removes the overlay once that root view has content. Callers can hold the
//! overlay open with [`SplashController::prevent_auto_hide`] and dismiss it
//! explicitly with [`SplashController::hide`].
//!
//! All view work runs on the host's UI-affinity thread. The controller only
//! holds a weak reference to its host and reports a dead host as
//! [`SplashError::HostUnavailable`] instead of failing hard.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod locator;
pub mod notify;
pub mod observer;
pub mod registry;
pub mod session;
pub mod standalone;
pub mod warning;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SplashConfig;
pub use controller::{SplashController, SplashControllerBuilder};
pub use error::{Result, SplashError};
pub use host::{HostLifecycle, HostScreen, OverlayFactory};
pub use locator::RootViewLocator;
pub use notify::{Notification, Notifier, TracingNotifier};
pub use observer::{Reaction, react};
pub use registry::{HostKey, SplashRegistry};
pub use session::SplashSession;
pub use standalone::StandaloneHost;
pub use warning::WarningTimer;
