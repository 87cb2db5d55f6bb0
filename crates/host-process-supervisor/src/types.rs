//! Supervisor and per-child state.

use std::fmt;

/// The supervisor's own lifecycle (§4.E), driven only by
/// [`crate::supervisor::ProcessSupervisor::start`]/`stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
	Stopped,
	Starting,
	Started,
	Stopping,
}

impl fmt::Display for SupervisorState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::Stopped => "Stopped",
			Self::Starting => "Starting",
			Self::Started => "Started",
			Self::Stopping => "Stopping",
		};
		f.write_str(s)
	}
}

/// A single extension child process's connection state, reported on the
/// bus as `extension.process` (§4.F "Connections state machine").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
	Stopped,
	Started,
	Connecting,
	Connected,
	Error,
}

impl ProcessStatus {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Stopped => "stopped",
			Self::Started => "started",
			Self::Connecting => "connecting",
			Self::Connected => "connected",
			Self::Error => "error",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn supervisor_state_displays_its_variant_name() {
		assert_eq!(SupervisorState::Started.to_string(), "Started");
	}

	#[test]
	fn process_status_as_str_matches_the_bus_payload_vocabulary() {
		assert_eq!(ProcessStatus::Connected.as_str(), "connected");
	}
}
