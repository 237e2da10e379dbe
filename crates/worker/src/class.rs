/// Execution classes used for scheduling and observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Work that must run on the UI-affinity thread.
	Ui,
	/// Delayed one-shot work driven by the timer facility.
	Timer,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Ui => "ui",
			Self::Timer => "timer",
		}
	}
}
