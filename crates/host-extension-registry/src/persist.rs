//! Filesystem side effects of install/update (§4.B "Persist"). These are
//! not part of `ExtensionRegistryPort` itself — the orchestrator's
//! install/uninstall operations call them directly alongside the port.

use std::path::{Path, PathBuf};

use host_commons::filesystem::{create_dir_all, read_file, write_file};
use host_commons::HostError;
use serde::Serialize;

use crate::archive;

/// `parameters.json` contents written after install/update (§6).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParametersFile {
	pub extension_id: String,
	pub web_services_base_url: String,
	pub api_key: String,
}

/// The extraction directory for an installed extension.
#[must_use]
pub fn install_directory(installed_extensions_dir: &Path, extension_id: &str) -> PathBuf {
	installed_extensions_dir.join(extension_id)
}

/// Extracts an archive under `<installedExtensionsDir>/<extensionId>`.
///
/// # Errors
/// Returns [`HostError`] if the destination can't be created, or the
/// archive's magic bytes/size/structure are invalid.
pub async fn extract_extension(installed_extensions_dir: &Path, extension_id: &str, archive_bytes: &[u8]) -> Result<PathBuf, HostError> {
	let dest = install_directory(installed_extensions_dir, extension_id);
	create_dir_all(&dest).await?;
	archive::extract_to(archive_bytes, &dest).map_err(|e| HostError::Io {
		source: std::io::Error::other(e.to_string()),
		context: Some(format!("extracting extension archive for '{extension_id}'")),
	})?;
	Ok(dest)
}

/// (Re)creates the `.cache` symlink inside an extension's install directory
/// pointing at the shared models directory.
///
/// # Errors
/// Returns [`HostError`] if the existing symlink can't be removed or the
/// new one can't be created.
#[cfg(unix)]
pub async fn ensure_cache_symlink(install_directory: &Path, shared_models_dir: &Path) -> Result<(), HostError> {
	let link_path = install_directory.join(".cache");
	if tokio::fs::symlink_metadata(&link_path).await.is_ok() {
		tokio::fs::remove_file(&link_path).await.map_err(|e| HostError::Io {
			source: e,
			context: Some(format!("removing stale .cache symlink at {}", link_path.display())),
		})?;
	}
	tokio::fs::symlink(shared_models_dir, &link_path).await.map_err(|e| HostError::Io {
		source: e,
		context: Some(format!("creating .cache symlink at {}", link_path.display())),
	})
}

/// Writes `parameters.json` atomically, but only if its content changed
/// from what's already on disk (§4.B).
///
/// # Errors
/// Returns [`HostError`] if reading the existing file or the atomic
/// write itself fails.
pub async fn write_parameters_file(install_directory: &Path, parameters: &ParametersFile) -> Result<(), HostError> {
	let path = install_directory.join("parameters.json");
	let serialized = serde_json::to_string_pretty(parameters).map_err(|e| HostError::Serialization {
		message: e.to_string(),
		format: "JSON".to_string(),
	})?;

	if let Ok(existing) = read_file(&path).await {
		if existing == serialized {
			return Ok(());
		}
	}

	write_file(&path, &serialized).await
}

/// One archive discovered while scanning the built-in extensions directory.
pub struct BuiltInCandidate {
	pub path: PathBuf,
	pub bytes: Vec<u8>,
}

/// Lists every archive file directly under the built-in extensions
/// directory, for the caller to validate and conditionally install
/// (only a strictly newer version than any already-installed copy; see
/// §4.B and the supersedes check the orchestrator applies).
///
/// # Errors
/// Returns [`HostError`] if the directory can't be read.
pub async fn scan_built_in_extensions(built_in_extensions_dir: &Path) -> Result<Vec<BuiltInCandidate>, HostError> {
	let mut entries = tokio::fs::read_dir(built_in_extensions_dir).await.map_err(|e| HostError::Io {
		source: e,
		context: Some(format!("scanning built-in extensions directory {}", built_in_extensions_dir.display())),
	})?;

	let mut candidates = Vec::new();
	while let Some(entry) = entries.next_entry().await.map_err(|e| HostError::Io {
		source: e,
		context: Some("reading built-in extensions directory entry".to_string()),
	})? {
		let path = entry.path();
		if !path.is_file() {
			continue;
		}
		let bytes = tokio::fs::read(&path).await.map_err(|e| HostError::Io {
			source: e,
			context: Some(format!("reading built-in extension archive {}", path.display())),
		})?;
		candidates.push(BuiltInCandidate { path, bytes });
	}

	Ok(candidates)
}

/// Whether a candidate version supersedes an already-installed one;
/// downgrades (and equal versions) are ignored (§4.B).
#[must_use]
pub fn supersedes(candidate: &semver::Version, installed: Option<&semver::Version>) -> bool {
	installed.map_or(true, |installed| candidate > installed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[tokio::test]
	async fn parameters_file_is_written_with_camel_case_fields() {
		let dir = TempDir::new().unwrap();
		let params = ParametersFile {
			extension_id: "photo-tagger".to_string(),
			web_services_base_url: "http://localhost:8080".to_string(),
			api_key: "a".repeat(36),
		};

		write_parameters_file(dir.path(), &params).await.unwrap();

		let written = tokio::fs::read_to_string(dir.path().join("parameters.json")).await.unwrap();
		assert!(written.contains("\"extensionId\""));
		assert!(written.contains("\"webServicesBaseUrl\""));
		assert!(written.contains("\"apiKey\""));
	}

	#[tokio::test]
	async fn parameters_file_is_not_rewritten_when_unchanged() {
		let dir = TempDir::new().unwrap();
		let params = ParametersFile {
			extension_id: "photo-tagger".to_string(),
			web_services_base_url: "http://localhost:8080".to_string(),
			api_key: "a".repeat(36),
		};

		write_parameters_file(dir.path(), &params).await.unwrap();
		let path = dir.path().join("parameters.json");
		let first_modified = tokio::fs::metadata(&path).await.unwrap().modified().unwrap();

		tokio::time::sleep(std::time::Duration::from_millis(10)).await;
		write_parameters_file(dir.path(), &params).await.unwrap();
		let second_modified = tokio::fs::metadata(&path).await.unwrap().modified().unwrap();

		assert_eq!(first_modified, second_modified);
	}

	#[test]
	fn supersedes_rejects_downgrades_and_equal_versions() {
		let v1 = semver::Version::new(1, 0, 0);
		let v2 = semver::Version::new(2, 0, 0);
		assert!(supersedes(&v2, Some(&v1)));
		assert!(!supersedes(&v1, Some(&v2)));
		assert!(!supersedes(&v1, Some(&v1)));
		assert!(supersedes(&v1, None));
	}

	#[tokio::test]
	async fn scan_built_in_extensions_lists_archive_files_only() {
		let dir = TempDir::new().unwrap();
		tokio::fs::write(dir.path().join("a.zip"), b"zipbytes").await.unwrap();
		tokio::fs::create_dir(dir.path().join("not-an-archive")).await.unwrap();

		let candidates = scan_built_in_extensions(dir.path()).await.unwrap();
		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].bytes, b"zipbytes");
	}
}
