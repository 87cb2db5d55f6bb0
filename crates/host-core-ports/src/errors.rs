//! The closed error taxonomy shared by every port.
//!
//! Each kind maps to exactly one surface the caller sees (`BadRequest`,
//! `Unauthorized`/`Forbidden`, `InternalError`, or a bus event) per the
//! error handling design; `ChildFailure` is deliberately never returned
//! from a fallible call, since process failures are host-internal and
//! surface only via the `extension.error` bus event.

use crate::types::ExtensionId;
use host_commons::HostError;
use thiserror::Error;

/// Core error type for all port operations.
#[derive(Error, Debug)]
pub enum PortError {
	/// Bad manifest, unknown id, schema mismatch.
	#[error("validation failed: {message}")]
	Validation { message: String, field: Option<String> },

	/// Missing or wrong API key.
	#[error("unauthorized: {message}")]
	Unauthorized { message: String },

	/// Key resolved but lacks the scope the operation requires.
	#[error("forbidden: {message}")]
	Forbidden { message: String },

	/// No enabled+connected extension supports the requested capability.
	#[error("capability unavailable: {capability}")]
	CapabilityUnavailable { capability: String },

	/// Supervisor command rejected because of its current lifecycle state.
	#[error("supervisor state error: {message}")]
	SupervisorState { message: String },

	/// External store write failed.
	#[error("persistence error: {operation} - {message}")]
	Persistence { operation: String, message: String },
}

impl PortError {
	/// The fixed numeric code from the external interfaces error envelope.
	#[must_use]
	pub fn code(&self) -> i32 {
		match self {
			Self::Validation { .. } => 3,
			Self::Unauthorized { .. } => 1,
			Self::Forbidden { .. } => 2,
			Self::CapabilityUnavailable { .. } | Self::SupervisorState { .. } | Self::Persistence { .. } => -1,
		}
	}

	/// The HTTP-style status the envelope reports.
	#[must_use]
	pub fn status(&self) -> &'static str {
		match self {
			Self::Validation { .. } => "BadRequest",
			Self::Unauthorized { .. } => "Unauthorized",
			Self::Forbidden { .. } => "Forbidden",
			Self::CapabilityUnavailable { .. } | Self::SupervisorState { .. } | Self::Persistence { .. } => {
				"InternalError"
			}
		}
	}

	/// Shorthand for a validation failure naming the offending field.
	#[must_use]
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation {
			message: message.into(),
			field: None,
		}
	}

	/// Shorthand for a validation failure naming the offending field.
	#[must_use]
	pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation {
			message: message.into(),
			field: Some(field.into()),
		}
	}
}

/// A child process failure, surfaced only via the `extension.error` bus
/// event and never propagated synchronously to a caller.
#[derive(Debug, Clone)]
pub struct ChildFailure {
	pub extension_id: ExtensionId,
	pub message: String,
}

impl From<PortError> for HostError {
	fn from(err: PortError) -> Self {
		match err {
			PortError::Validation { message, field } => HostError::Validation {
				message,
				field,
				value: None,
			},
			PortError::Unauthorized { message } | PortError::Forbidden { message } => HostError::Validation {
				message,
				field: None,
				value: None,
			},
			PortError::CapabilityUnavailable { capability } => HostError::Generic {
				message: format!("capability unavailable: {capability}"),
				source: None,
			},
			PortError::SupervisorState { message } => HostError::Generic {
				message: format!("supervisor state error: {message}"),
				source: None,
			},
			PortError::Persistence { operation, message } => HostError::Generic {
				message: format!("persistence error: {operation} - {message}"),
				source: None,
			},
		}
	}
}

impl From<HostError> for PortError {
	/// Wraps an ambient filesystem/serialization failure (extraction,
	/// `parameters.json`, the built-in scan) as a persistence error; none
	/// of these map to a client-facing `BadRequest`.
	fn from(err: HostError) -> Self {
		Self::Persistence {
			operation: "filesystem".to_string(),
			message: err.to_string(),
		}
	}
}
