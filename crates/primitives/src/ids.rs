use std::borrow::Cow;
use std::fmt;

/// Opaque handle for one view in a host's view tree.
///
/// Handles are non-owning: holding a `ViewId` does not keep the view alive,
/// and every tree operation tolerates handles the tree no longer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "view#{}", self.0)
	}
}

/// Runtime class of a view, used as the marker for root view discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewClass(Cow<'static, str>);

impl ViewClass {
	/// Creates a class from a static name.
	pub const fn new(name: &'static str) -> Self {
		Self(Cow::Borrowed(name))
	}

	pub fn name(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ViewClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&'static str> for ViewClass {
	fn from(name: &'static str) -> Self {
		Self::new(name)
	}
}
