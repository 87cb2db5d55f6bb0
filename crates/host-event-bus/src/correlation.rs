//! The `resultSink` / callback-id request-response mechanism.
//!
//! `emit_with_result` generates a `callbackId`, subscribes a single-use
//! listener under the synthesized name `return|<callbackId>`, injects the
//! callback id into the outgoing payload as `resultSink`, and awaits the
//! listener with a timeout. This is the bus's only notion of a "pending
//! request": there is no side table of in-flight correlations to sweep,
//! since the timeout is owned by the single `tokio::time::timeout` call
//! that is awaiting the reply, and the caller unsubscribes as soon as that
//! call returns (see `EventBus::emit_with_result`).

use serde_json::Value;

/// Name prefix for synthesized single-use reply events.
pub const RESULT_SINK_PREFIX: &str = "return|";

/// Builds the synthesized reply event name for a callback id.
#[must_use]
pub fn result_sink_name(callback_id: &str) -> String {
	format!("{RESULT_SINK_PREFIX}{callback_id}")
}

/// Merges a `resultSink` field carrying `return_name` into `payload`.
///
/// Object payloads get the field merged in directly; non-object payloads
/// are wrapped so the callee can still recover both the original value and
/// the sink name.
pub fn attach_result_sink(payload: Value, return_name: &str) -> Value {
	match payload {
		Value::Object(mut map) => {
			map.insert("resultSink".to_string(), Value::String(return_name.to_string()));
			Value::Object(map)
		}
		other => serde_json::json!({ "value": other, "resultSink": return_name }),
	}
}
