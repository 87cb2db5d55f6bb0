//! `notifications` channel handling: log/notification republish,
//! acknowledgment resolution, and intent forwarding (§4.D, §4.D.1).

use std::sync::Arc;

use host_core_ports::ports::Result;
use host_core_ports::{BusEventName, ContextId, EventBusPort, PortError};
use host_ipc_protocol::{CompiledSchema, IntentOutcome, IntentPayload, NotificationPayload};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::ack::{PendingAcks, ACK_TIMEOUT};
use crate::gateway::send_and_await_ack_on;
use crate::intents::validate_intent;
use crate::registry::SocketRegistry;

/// Processes one inbound `notifications` payload. Returns the reply to
/// hand back over the same channel for an intent; every other variant
/// has no synchronous reply.
pub(crate) async fn handle(
	event_bus: &Arc<dyn EventBusPort>,
	sockets: &RwLock<SocketRegistry>,
	pending_acks: &PendingAcks,
	payload: NotificationPayload,
) -> Result<Option<IntentOutcome>> {
	match payload {
		NotificationPayload::Log { extension_id, log, .. } => {
			event_bus
				.emit(
					&BusEventName::new("extension", "log", None),
					json!({"extensionId": extension_id, "log": log.log, "level": log.level}),
					None,
				)
				.await;
			Ok(None)
		}
		NotificationPayload::Notification { extension_id, notification, .. } => {
			event_bus
				.emit(
					&BusEventName::new("extension", "notification", None),
					json!({"extensionId": extension_id, "notification": notification}),
					None,
				)
				.await;
			Ok(None)
		}
		NotificationPayload::Acknowledgment {
			extension_id, context_id, acknowledgment, ..
		} => {
			let value = acknowledgment.value.clone().unwrap_or_else(|| json!({"success": acknowledgment.success}));
			pending_acks.resolve(ContextId(context_id), value).await;
			event_bus
				.emit(
					&BusEventName::new("extension", "acknowledgment", None),
					json!({"extensionId": extension_id, "contextId": context_id, "success": acknowledgment.success}),
					None,
				)
				.await;
			Ok(None)
		}
		NotificationPayload::Intent { intent, .. } => forward_intent(sockets, pending_acks, intent).await.map(Some),
	}
}

/// Validates then forwards a successful intent to the master socket,
/// resolving its acknowledgment back to the caller (§4.D.1).
async fn forward_intent(sockets: &RwLock<SocketRegistry>, pending_acks: &PendingAcks, intent: IntentPayload) -> Result<IntentOutcome> {
	if let Err(message) = validate_intent(&intent) {
		return Ok(IntentOutcome::Error { error: message });
	}

	let master = sockets
		.read()
		.await
		.master_socket()
		.ok_or_else(|| PortError::CapabilityUnavailable {
			capability: "master-socket".to_string(),
		})?;

	let context_id = ContextId::new();
	let envelope = json!({"channel": "extension.intent", "contextId": context_id.0, "value": intent});
	let resolved = send_and_await_ack_on(sockets, pending_acks, master, context_id, envelope, ACK_TIMEOUT).await?;

	let outcome: IntentOutcome = serde_json::from_value(resolved.clone())
		.unwrap_or_else(|_| IntentOutcome::Value { value: resolved.clone() });

	if let (IntentPayload::Parameters { parameters }, IntentOutcome::Value { value }) = (&intent, &outcome) {
		let schema = CompiledSchema::compile(parameters).map_err(|e| PortError::validation(e.to_string()))?;
		if let Err(violations) = schema.validate(value) {
			return Ok(IntentOutcome::Error {
				error: violations.to_string(),
			});
		}
	}

	Ok(outcome)
}
