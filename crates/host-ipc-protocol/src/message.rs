//! Message envelope system for IPC communication
//!
//! Provides a generic correlation + envelope wrapper used around the
//! concrete socket wire payloads in [`crate::wire`] when they cross a
//! serialization boundary (e.g. persisted to the pending-call table,
//! or logged).

use host_commons::{debug::duck, error::HostError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation ID for tracking request/response pairs across process boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
	/// Creates a new unique correlation ID.
	pub fn new() -> Self {
		duck!("Creating new correlation ID");
		Self(Uuid::new_v4())
	}

	/// Creates a correlation ID from a string representation.
	///
	/// # Errors
	/// Returns `HostError` if the string is not a valid UUID.
	pub fn from_request(request_id: &str) -> Result<Self, HostError> {
		duck!("Creating correlation ID from string: {}", request_id);
		let uuid = Uuid::parse_str(request_id).map_err(|e| HostError::Validation {
			message: format!("Invalid UUID format: {e}"),
			field: Some("correlation_id".to_string()),
			value: Some(request_id.to_string()),
		})?;
		Ok(Self(uuid))
	}
}

impl std::fmt::Display for CorrelationId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Default for CorrelationId {
	fn default() -> Self {
		Self::new()
	}
}

/// Message types for type-safe routing of the messages this crate wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
	/// A `connection` channel announcement.
	Connection,
	/// A `notifications` channel payload (log/notification/acknowledgment/intent).
	Notification,
	/// An outbound bus-event delivery on the `events` channel.
	Event,
	/// A liveness check between host and an extension process.
	HealthCheck,
	/// A host-internal system event (not extension-facing).
	SystemEvent,
	/// An error report.
	ErrorReport,
}

/// Message priority levels for routing and processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePriority {
	/// System-critical messages that must be processed immediately.
	Critical,
	/// User-facing operations with high priority.
	High,
	/// Standard operations with normal priority.
	Normal,
	/// Background tasks with low priority.
	Low,
}

/// Metadata for message routing and processing hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
	/// Priority level for message processing.
	pub priority: MessagePriority,
	/// Routing hints for message delivery.
	pub routing_hints: Vec<String>,
	/// Optional timeout in milliseconds.
	pub timeout_ms: Option<u64>,
	/// Number of retry attempts.
	pub retry_count: u32,
	/// Source component identifier.
	pub source_component: String,
	/// Optional target component identifier.
	pub target_component: Option<String>,
}

impl Default for MessageMetadata {
	fn default() -> Self {
		Self {
			priority: MessagePriority::Normal,
			routing_hints: Vec::new(),
			timeout_ms: None,
			retry_count: 0,
			source_component: "unknown".to_string(),
			target_component: None,
		}
	}
}

/// Universal message envelope wrapping a typed payload with correlation,
/// routing and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope<T> {
	/// Unique correlation ID for request/response tracking.
	pub correlation_id: CorrelationId,
	/// Message type for routing.
	pub message_type: MessageType,
	/// Processing and routing metadata.
	pub metadata: MessageMetadata,
	/// Message payload.
	pub payload: T,
	/// Message creation timestamp.
	pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> MessageEnvelope<T> {
	/// Creates a new message envelope with default metadata.
	pub fn new(message_type: MessageType, payload: T) -> Self {
		duck!("Creating new message envelope for type: {:?}", message_type);
		Self {
			correlation_id: CorrelationId::new(),
			message_type,
			metadata: MessageMetadata::default(),
			payload,
			timestamp: chrono::Utc::now(),
		}
	}

	/// Creates a new message envelope with custom metadata.
	pub fn with_metadata(message_type: MessageType, payload: T, metadata: MessageMetadata) -> Self {
		duck!("Creating message envelope with custom metadata for type: {:?}", message_type);
		Self {
			correlation_id: CorrelationId::new(),
			message_type,
			metadata,
			payload,
			timestamp: chrono::Utc::now(),
		}
	}

	/// Creates a message envelope with a specific correlation ID.
	///
	/// Used for response messages that need to correlate with a request.
	pub fn with_correlation(
		correlation_id: CorrelationId,
		message_type: MessageType,
		payload: T,
		metadata: MessageMetadata,
	) -> Self {
		duck!("Creating message envelope with correlation ID: {}", correlation_id);
		Self {
			correlation_id,
			message_type,
			metadata,
			payload,
			timestamp: chrono::Utc::now(),
		}
	}
}
