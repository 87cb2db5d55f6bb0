//! Safe filesystem utilities for the extension host
//!
//! This module provides safe filesystem operations with proper error handling,
//! atomic writes, and security validation.

use std::path::Path;
use directories::ProjectDirs;
use crate::error::HostError;

/// Safe file reading with error handling
///
/// # Examples
///
/// ```rust
/// use host_commons::filesystem::read_file;
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     // This would work with an actual file:
///     // let content = read_file("config.toml").await?;
///     // println!("Config: {}", content);
///     Ok(())
/// }
/// ```
pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<String, HostError> {
    let path = path.as_ref();
    validate_path(path)?;
    
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| HostError::Io {
            source: e,
            context: Some(format!("Failed to read file: {}", path.display())),
        })
}

/// Safe file writing with atomic operations
///
/// # Examples
///
/// ```rust
/// use host_commons::filesystem::write_file;
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     // This would write to an actual file:
///     // write_file("output.txt", "Hello, World!").await?;
///     Ok(())
/// }
/// ```
pub async fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), HostError> {
    let path = path.as_ref();
    validate_path(path)?;
    
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }
    
    // Atomic write using temporary file
    let temp_path = path.with_extension("tmp");
    
    tokio::fs::write(&temp_path, content)
        .await
        .map_err(|e| HostError::Io {
            source: e,
            context: Some(format!("Failed to write temp file: {}", temp_path.display())),
        })?;
    
    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| HostError::Io {
            source: e,
            context: Some(format!("Failed to rename temp file to: {}", path.display())),
        })?;
    
    Ok(())
}

/// Create directory and all parent directories
///
/// # Examples
///
/// ```rust
/// use host_commons::filesystem::create_dir_all;
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     // This would create actual directories:
///     // create_dir_all("path/to/nested/directory").await?;
///     Ok(())
/// }
/// ```
pub async fn create_dir_all<P: AsRef<Path>>(path: P) -> Result<(), HostError> {
    let path = path.as_ref();
    validate_path(path)?;
    
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| HostError::Io {
            source: e,
            context: Some(format!("Failed to create directory: {}", path.display())),
        })
}

/// Check if file exists
///
/// # Examples
///
/// ```rust
/// use host_commons::filesystem::file_exists;
///
/// async fn example() {
///     // This would check an actual file:
///     // if file_exists("config.toml").await {
///     //     println!("Config file exists");
///     // }
/// }
/// ```
pub async fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Get platform-specific directories
///
/// # Examples
///
/// ```rust
/// use host_commons::filesystem::get_project_dirs;
///
/// if let Some(dirs) = get_project_dirs() {
///     println!("Config dir: {:?}", dirs.config_dir());
/// }
/// ```
#[must_use] 
pub fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "extension-host", "extension-host")
}

/// Validate path for security (prevent directory traversal)
fn validate_path<P: AsRef<Path>>(path: P) -> Result<(), HostError> {
    let path = path.as_ref();
    
    // Check for directory traversal attempts
    if path.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(HostError::Validation {
            message: "Path contains directory traversal".to_string(),
            field: Some("path".to_string()),
            value: Some(path.display().to_string()),
        });
    }
    
    Ok(())
}
