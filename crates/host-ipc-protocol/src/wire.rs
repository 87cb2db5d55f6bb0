//! Concrete socket wire payloads (external interfaces, §6).
//!
//! These are the JSON shapes that actually cross the socket gateway's
//! three channels: `connection`, `notifications`, and `events`. Unions
//! here are `#[serde(untagged)]`, matching the wire format's own rule:
//! each shape is discriminated by which single extra property is
//! present, not by an explicit tag field.

use serde::{Deserialize, Serialize};

/// `connection` channel payload: a client announcing itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPayload {
	pub api_key: String,
	pub is_open: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extension_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sdk_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub runtime: Option<String>,
}

/// A log line forwarded by an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogPayload {
	pub log: String,
	pub level: String,
}

/// Acknowledgment of a prior outbound delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgmentPayload {
	pub context_id: uuid::Uuid,
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiIntent {
	pub anchor: String,
	pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogIntent {
	pub title: String,
	pub description: String,
	pub buttons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesIntent {
	#[serde(default)]
	pub selection: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowIntent {
	pub entity: String,
	pub id: String,
}

/// The five intent shapes, discriminated by their single non-undefined
/// property (§4.D.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum IntentPayload {
	/// Requests user-supplied data conforming to a JSON-schema.
	Parameters { parameters: serde_json::Value },
	/// Opens a named anchor + URL; the `imageDetail` anchor is rejected.
	Ui { ui: UiIntent },
	/// Shows a modal dialog with the given title/description/buttons.
	Dialog { dialog: DialogIntent },
	/// Requests a set of image ids from the user.
	Images { images: ImagesIntent },
	/// Jumps the UI to a named entity.
	Show { show: ShowIntent },
}

/// The outcome of a resolved intent: data entry result, user cancellation,
/// or a validation/host error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum IntentOutcome {
	Value { value: serde_json::Value },
	Cancel { cancel: String },
	Error { error: String },
}

/// `notifications` channel payload, one of four discriminants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum NotificationPayload {
	Log {
		api_key: String,
		extension_id: String,
		log: LogPayload,
	},
	Notification {
		api_key: String,
		extension_id: String,
		notification: serde_json::Value,
	},
	Acknowledgment {
		api_key: String,
		extension_id: String,
		context_id: uuid::Uuid,
		acknowledgment: AcknowledgmentPayload,
	},
	Intent {
		api_key: String,
		extension_id: String,
		intent: IntentPayload,
	},
}

/// Server → client event envelope on the `events` channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
	pub channel: String,
	pub context_id: uuid::Uuid,
	pub milliseconds: u64,
	pub value: serde_json::Value,
}
