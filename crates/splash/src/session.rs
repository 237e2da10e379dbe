use veil_primitives::ViewId;

/// Snapshot of one overlay presentation.
///
/// `root_view` goes from `None` to `Some` at most once and is never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashSession {
	/// Overlay currently attached to the content container.
	pub shown: bool,
	/// Whether root view content may trigger an automatic hide.
	pub auto_hide_enabled: bool,
	/// The discovered application root view.
	pub root_view: Option<ViewId>,
	/// Whether a "still visible" warning is outstanding.
	pub warning_armed: bool,
}

impl Default for SplashSession {
	fn default() -> Self {
		Self {
			shown: false,
			auto_hide_enabled: true,
			root_view: None,
			warning_armed: false,
		}
	}
}
