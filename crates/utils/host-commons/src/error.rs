//! Centralized error handling for the extension host
//!
//! This module provides the main `HostError` type and context helpers
//! that should be used across all the extension host crates for consistent error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for all the extension host crates
///
/// This error type provides structured error handling with context information
/// to help with debugging and error reporting. All the extension host crates should use
/// this error type at their public boundaries.
///
/// # Examples
///
/// ```rust
/// use host_commons::error::{HostError, ResultContext};
///
/// fn read_config() -> Result<String, HostError> {
///     std::fs::read_to_string("config.toml")
///         .context("Failed to read configuration file")
/// }
/// ```
#[derive(Debug, Error)]
pub enum HostError {
	/// Validation error with field and value details
	#[error("Validation error: {message}")]
	Validation {
		/// The validation error message
		message: String,
		/// The field that failed validation (optional)
		field: Option<String>,
		/// The value that failed validation (optional)
		value: Option<String>,
	},

	/// IO error with context
	#[error("IO error: {source}")]
	Io {
		/// The underlying IO error
		source: std::io::Error,
		/// Additional context about the IO operation (optional)
		context: Option<String>,
	},

	/// Serialization error with format information
	#[error("Serialization error: {message}")]
	Serialization {
		/// The serialization error message
		message: String,
		/// The format being serialized (e.g., "JSON", "TOML")
		format: String,
	},

	/// Configuration error with file information
	#[error("Configuration error: {message}")]
	Configuration {
		/// The configuration error message
		message: String,
		/// The configuration file path (optional)
		file: Option<PathBuf>,
	},

	/// Generic error with context for any other error type
	#[error("Generic error: {message}")]
	Generic {
		/// The generic error message
		message: String,
		/// The underlying error source (optional)
		source: Option<Box<dyn std::error::Error + Send + Sync>>,
	},
}

impl From<std::io::Error> for HostError {
	fn from(source: std::io::Error) -> Self {
		Self::Io {
			source,
			context: None,
		}
	}
}
///
/// This trait provides `.context()` and `.with_context()` methods
/// for any Result type, converting errors to `HostError` with
/// meaningful context information.
///
/// # Examples
///
/// ```rust
/// use host_commons::error::{HostError, ResultContext};
///
/// fn process_file(path: &str) -> Result<String, HostError> {
///     let content = std::fs::read_to_string(path)
///         .context("Failed to read input file")?;
///     
///     let processed = content.to_uppercase();
///     
///     std::fs::write("output.txt", &processed)
///         .with_context(|| format!("Failed to write output to file"))?;
///     
///     Ok(processed)
/// }
/// ```
pub trait ResultContext<T> {
	/// Add static context to an error
	fn context(self, context: &str) -> Result<T, HostError>;

	/// Add dynamic context to an error using a closure
	fn with_context<F>(self, f: F) -> Result<T, HostError>
	where
		F: FnOnce() -> String;

	/// Add field-specific context for validation errors
	fn with_field_context(self, field: &str, value: &str) -> Result<T, HostError>;
}

impl<T, E> ResultContext<T> for Result<T, E>
where
	E: Into<HostError>,
{
	fn context(self, context: &str) -> Result<T, HostError> {
		self.map_err(|e| {
			let mut error = e.into();
			if let HostError::Io {
				context: ref mut ctx,
				..
			} = &mut error
			{
				*ctx = Some(context.to_string());
			}
			error
		})
	}

	fn with_context<F>(self, f: F) -> Result<T, HostError>
	where
		F: FnOnce() -> String,
	{
		self.map_err(|e| {
			let mut error = e.into();
			if let HostError::Io {
				context: ref mut ctx,
				..
			} = &mut error
			{
				*ctx = Some(f());
			}
			error
		})
	}

	fn with_field_context(self, field: &str, value: &str) -> Result<T, HostError> {
		self.map_err(|e| {
			// Convert the error to HostError first
			let symphony_error = e.into();
			// Then transform it to a validation error with field context
			HostError::Validation {
				message: format!("Validation failed: {symphony_error}"),
				field: Some(field.to_string()),
				value: Some(value.to_string()),
			}
		})
	}
}
