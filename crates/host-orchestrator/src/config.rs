//! Orchestrator-wide configuration: the directories install/update write
//! to, the web-services base URL baked into `parameters.json`, and the
//! archive size ceiling (§6).

use std::path::PathBuf;

/// Maximum extension archive size (§6), re-exported here so callers don't
/// need to reach into `host-extension-registry` for it.
pub const MAX_ARCHIVE_BYTES: usize = host_extension_registry::archive::MAX_ARCHIVE_BYTES;

/// Filesystem locations the orchestrator's install/update/uninstall path
/// reads and writes.
#[derive(Debug, Clone)]
pub struct OrchestratorPaths {
	pub installed_extensions_dir: PathBuf,
	pub built_in_extensions_dir: PathBuf,
	pub shared_models_dir: PathBuf,
}

/// Orchestrator-wide configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
	pub paths: OrchestratorPaths,
	pub web_services_base_url: String,
	pub max_archive_bytes: usize,
}

impl OrchestratorConfig {
	/// Builds a config rooted at `installed_extensions_dir`, with the
	/// built-in extensions and shared models directories as its siblings
	/// and an empty base URL — callers needing either normally reach for
	/// `with_*` rather than constructing `OrchestratorPaths` by hand.
	#[must_use]
	pub fn new(installed_extensions_dir: impl Into<PathBuf>) -> Self {
		let installed_extensions_dir = installed_extensions_dir.into();
		let root = installed_extensions_dir.parent().map_or_else(|| PathBuf::from("."), PathBuf::from);
		Self {
			paths: OrchestratorPaths {
				built_in_extensions_dir: root.join("built-in-extensions"),
				shared_models_dir: root.join("shared-models"),
				installed_extensions_dir,
			},
			web_services_base_url: String::new(),
			max_archive_bytes: MAX_ARCHIVE_BYTES,
		}
	}

	#[must_use]
	pub fn with_built_in_extensions_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.paths.built_in_extensions_dir = path.into();
		self
	}

	#[must_use]
	pub fn with_shared_models_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.paths.shared_models_dir = path.into();
		self
	}

	#[must_use]
	pub fn with_web_services_base_url(mut self, url: impl Into<String>) -> Self {
		self.web_services_base_url = url.into();
		self
	}

	#[must_use]
	pub fn with_max_archive_bytes(mut self, bytes: usize) -> Self {
		self.max_archive_bytes = bytes;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_max_archive_bytes_matches_the_documented_limit() {
		let config = OrchestratorConfig::new("/var/lib/extension-host/installed");
		assert_eq!(config.max_archive_bytes, 8 * 1024 * 1024);
	}

	#[test]
	fn builder_overrides_every_path() {
		let config = OrchestratorConfig::new("/data/installed")
			.with_built_in_extensions_dir("/data/built-in")
			.with_shared_models_dir("/data/models")
			.with_web_services_base_url("http://localhost:8080")
			.with_max_archive_bytes(1024);

		assert_eq!(config.paths.built_in_extensions_dir, PathBuf::from("/data/built-in"));
		assert_eq!(config.paths.shared_models_dir, PathBuf::from("/data/models"));
		assert_eq!(config.web_services_base_url, "http://localhost:8080");
		assert_eq!(config.max_archive_bytes, 1024);
	}
}
