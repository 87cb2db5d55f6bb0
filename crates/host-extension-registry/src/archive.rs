//! Archive inspection and extraction: zip or gzip-tarball, `manifest.json`
//! located at the archive root or its first subdirectory (§4.B, §6).

use std::io::{Cursor, Read};
use std::path::Path;

use thiserror::Error;

/// Maximum extension archive size (§6).
pub const MAX_ARCHIVE_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ArchiveError {
	#[error("extension archive exceeds the 8 MiB size limit")]
	TooLarge,
	#[error("unrecognized archive format; expected a zip or a gzip tarball")]
	UnknownFormat,
	#[error("manifest.json not found at the archive root or its first subdirectory")]
	ManifestNotFound,
	#[error("failed to read archive: {0}")]
	Read(String),
}

/// What `inspect` pulls out of an archive without extracting it to disk.
pub struct ArchiveContents {
	pub manifest_bytes: Vec<u8>,
	pub entry_paths: Vec<String>,
}

enum Format {
	Zip,
	TarGz,
}

fn detect_format(bytes: &[u8]) -> Result<Format, ArchiveError> {
	if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) || bytes.starts_with(&[0x50, 0x4B, 0x05, 0x06]) {
		Ok(Format::Zip)
	} else if bytes.starts_with(&[0x1F, 0x8B]) {
		Ok(Format::TarGz)
	} else {
		Err(ArchiveError::UnknownFormat)
	}
}

/// An entry counts as a shallow `manifest.json` if it sits at the archive
/// root or exactly one directory below it.
fn is_shallow_manifest_path(path: &str) -> bool {
	let trimmed = path.trim_start_matches("./");
	let components: Vec<&str> = trimmed.split('/').filter(|c| !c.is_empty()).collect();
	matches!(components.last(), Some(&"manifest.json")) && components.len() <= 2
}

/// Reads `manifest.json` and the full entry listing out of an archive
/// without writing anything to disk.
///
/// # Errors
/// Returns [`ArchiveError`] if the archive is oversized, unreadable, or
/// carries no `manifest.json` at a shallow enough path.
pub fn inspect(archive_bytes: &[u8]) -> Result<ArchiveContents, ArchiveError> {
	if archive_bytes.len() > MAX_ARCHIVE_BYTES {
		return Err(ArchiveError::TooLarge);
	}
	match detect_format(archive_bytes)? {
		Format::Zip => inspect_zip(archive_bytes),
		Format::TarGz => inspect_tar_gz(archive_bytes),
	}
}

/// Extracts every entry of an archive under `dest_dir`.
///
/// # Errors
/// Returns [`ArchiveError`] if the archive is oversized, unreadable, or
/// extraction fails.
pub fn extract_to(archive_bytes: &[u8], dest_dir: &Path) -> Result<(), ArchiveError> {
	if archive_bytes.len() > MAX_ARCHIVE_BYTES {
		return Err(ArchiveError::TooLarge);
	}
	match detect_format(archive_bytes)? {
		Format::Zip => {
			let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes)).map_err(|e| ArchiveError::Read(e.to_string()))?;
			archive.extract(dest_dir).map_err(|e| ArchiveError::Read(e.to_string()))
		}
		Format::TarGz => {
			let decoder = flate2::read::GzDecoder::new(Cursor::new(archive_bytes));
			let mut archive = tar::Archive::new(decoder);
			archive.unpack(dest_dir).map_err(|e| ArchiveError::Read(e.to_string()))
		}
	}
}

fn inspect_zip(bytes: &[u8]) -> Result<ArchiveContents, ArchiveError> {
	let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ArchiveError::Read(e.to_string()))?;
	let mut entry_paths = Vec::with_capacity(archive.len());
	let mut manifest_bytes = None;

	for i in 0..archive.len() {
		let mut file = archive.by_index(i).map_err(|e| ArchiveError::Read(e.to_string()))?;
		if file.is_dir() {
			continue;
		}
		let name = file.name().to_string();
		if manifest_bytes.is_none() && is_shallow_manifest_path(&name) {
			let mut buf = Vec::new();
			file.read_to_end(&mut buf).map_err(|e| ArchiveError::Read(e.to_string()))?;
			manifest_bytes = Some(buf);
		}
		entry_paths.push(name);
	}

	Ok(ArchiveContents {
		manifest_bytes: manifest_bytes.ok_or(ArchiveError::ManifestNotFound)?,
		entry_paths,
	})
}

fn inspect_tar_gz(bytes: &[u8]) -> Result<ArchiveContents, ArchiveError> {
	let decoder = flate2::read::GzDecoder::new(Cursor::new(bytes));
	let mut archive = tar::Archive::new(decoder);
	let mut entry_paths = Vec::new();
	let mut manifest_bytes = None;

	for entry in archive.entries().map_err(|e| ArchiveError::Read(e.to_string()))? {
		let mut entry = entry.map_err(|e| ArchiveError::Read(e.to_string()))?;
		if entry.header().entry_type().is_dir() {
			continue;
		}
		let name = entry.path().map_err(|e| ArchiveError::Read(e.to_string()))?.to_string_lossy().to_string();
		if manifest_bytes.is_none() && is_shallow_manifest_path(&name) {
			let mut buf = Vec::new();
			entry.read_to_end(&mut buf).map_err(|e| ArchiveError::Read(e.to_string()))?;
			manifest_bytes = Some(buf);
		}
		entry_paths.push(name);
	}

	Ok(ArchiveContents {
		manifest_bytes: manifest_bytes.ok_or(ArchiveError::ManifestNotFound)?,
		entry_paths,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
		let mut buf = Vec::new();
		{
			let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
			let options = zip::write::FileOptions::default();
			for (name, content) in entries {
				writer.start_file(*name, options).unwrap();
				writer.write_all(content).unwrap();
			}
			writer.finish().unwrap();
		}
		buf
	}

	#[test]
	fn oversized_archive_is_rejected_before_parsing() {
		let oversized = vec![0x50, 0x4B, 0x03, 0x04].repeat(MAX_ARCHIVE_BYTES);
		assert!(matches!(inspect(&oversized), Err(ArchiveError::TooLarge)));
	}

	#[test]
	fn unknown_magic_bytes_are_rejected() {
		assert!(matches!(inspect(b"not an archive"), Err(ArchiveError::UnknownFormat)));
	}

	#[test]
	fn manifest_at_archive_root_is_found() {
		let bytes = zip_with(&[("manifest.json", b"{}"), ("icon.png", b"\x89PNG")]);
		let contents = inspect(&bytes).unwrap();
		assert_eq!(contents.manifest_bytes, b"{}");
		assert_eq!(contents.entry_paths.len(), 2);
	}

	#[test]
	fn manifest_in_first_subdirectory_is_found() {
		let bytes = zip_with(&[("my-extension/manifest.json", b"{\"id\":\"x\"}")]);
		let contents = inspect(&bytes).unwrap();
		assert_eq!(contents.manifest_bytes, b"{\"id\":\"x\"}");
	}

	#[test]
	fn manifest_nested_two_levels_deep_is_not_found() {
		let bytes = zip_with(&[("a/b/manifest.json", b"{}")]);
		assert!(matches!(inspect(&bytes), Err(ArchiveError::ManifestNotFound)));
	}
}
