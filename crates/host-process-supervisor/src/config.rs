//! Configuration for the process supervisor: the fixed restart/stop
//! policy constants (§4.E) plus the runtime interpreter paths a
//! manifest's `${node}`/`${venvPython}`/`${shell}` placeholders resolve
//! to, which vary per deployment.

use std::path::PathBuf;
use std::time::Duration;

/// Consecutive unintended exits that trigger a fatal `extension.error`
/// instead of another restart (§4.E).
pub const RESTART_LIMIT: u32 = 3;

/// Grace period between a termination signal and a forced kill (§4.E).
pub const STOP_GRACE: Duration = Duration::from_secs(1);

/// How often a running child's liveness is polled.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// Interpreter/shell binaries a manifest's `executable` placeholder
/// resolves to.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
	pub node: PathBuf,
	pub venv_python: PathBuf,
	pub shell: PathBuf,
}

impl Default for RuntimePaths {
	fn default() -> Self {
		Self {
			node: PathBuf::from("node"),
			venv_python: PathBuf::from("python3"),
			shell: default_shell(),
		}
	}
}

#[cfg(unix)]
fn default_shell() -> PathBuf {
	PathBuf::from("/bin/sh")
}

#[cfg(not(unix))]
fn default_shell() -> PathBuf {
	PathBuf::from("cmd.exe")
}

/// Supervisor-wide configuration.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
	pub runtime_paths: RuntimePaths,
	pub restart_limit: u32,
	pub stop_grace: Duration,
	pub health_check_interval: Duration,
}

impl Default for SupervisorConfig {
	fn default() -> Self {
		Self {
			runtime_paths: RuntimePaths::default(),
			restart_limit: RESTART_LIMIT,
			stop_grace: STOP_GRACE,
			health_check_interval: HEALTH_CHECK_INTERVAL,
		}
	}
}

impl SupervisorConfig {
	#[must_use]
	pub fn with_node_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.runtime_paths.node = path.into();
		self
	}

	#[must_use]
	pub fn with_venv_python_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.runtime_paths.venv_python = path.into();
		self
	}

	#[must_use]
	pub fn with_shell_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.runtime_paths.shell = path.into();
		self
	}

	#[must_use]
	pub fn with_restart_limit(mut self, limit: u32) -> Self {
		self.restart_limit = limit;
		self
	}

	#[must_use]
	pub fn with_stop_grace(mut self, grace: Duration) -> Self {
		self.stop_grace = grace;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_config_matches_the_documented_policy() {
		let config = SupervisorConfig::default();
		assert_eq!(config.restart_limit, 3);
		assert_eq!(config.stop_grace, Duration::from_secs(1));
	}

	#[test]
	fn builder_overrides_runtime_paths() {
		let config = SupervisorConfig::default()
			.with_node_path("/usr/local/bin/node")
			.with_venv_python_path("/opt/venv/bin/python")
			.with_shell_path("/bin/bash")
			.with_restart_limit(5)
			.with_stop_grace(Duration::from_millis(250));

		assert_eq!(config.runtime_paths.node, PathBuf::from("/usr/local/bin/node"));
		assert_eq!(config.runtime_paths.venv_python, PathBuf::from("/opt/venv/bin/python"));
		assert_eq!(config.runtime_paths.shell, PathBuf::from("/bin/bash"));
		assert_eq!(config.restart_limit, 5);
		assert_eq!(config.stop_grace, Duration::from_millis(250));
	}
}
