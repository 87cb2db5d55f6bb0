//! `EventBus`: the in-process implementation of `EventBusPort`.
//!
//! Delivery is a plain synchronous fan-out over the handlers registered for
//! an exact bus event name — no channels, no background dispatch loop. A
//! `marker` attached at emit time travels alongside the payload in an
//! envelope (`{"marker": ..., "payload": ...}`) rather than being filtered
//! here: per the wire spec, marker equality is the socket gateway's own
//! routing decision (a master socket gets everything unmarked, an extension
//! socket gets an event iff it's subscribed *and* the marker matches its
//! id), not a property the bus enforces on every subscriber.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use host_commons::config::Config;
use host_commons::debug::duck;
use host_core_ports::ports::Result;
use host_core_ports::{BusEventName, EventBusPort, PortError, SubscriptionHandle};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::correlation::{attach_result_sink, result_sink_name};
use crate::error::BusResult;
use crate::pubsub::SubscriberRegistry;

/// Tunable knobs for the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBusConfig {
	/// Default wait for `emit_with_result` when the caller passes `None`.
	pub default_result_timeout_secs: u64,
}

impl Config for EventBusConfig {}

impl Default for EventBusConfig {
	fn default() -> Self {
		Self {
			default_result_timeout_secs: 30,
		}
	}
}

impl EventBusConfig {
	#[must_use]
	pub fn default_result_timeout(&self) -> Duration {
		Duration::from_secs(self.default_result_timeout_secs)
	}
}

/// Hierarchical typed publish/subscribe bus (Component C).
pub struct EventBus {
	registry: Arc<SubscriberRegistry>,
	config: EventBusConfig,
}

impl EventBus {
	#[must_use]
	pub fn new(config: EventBusConfig) -> Self {
		Self {
			registry: Arc::new(SubscriberRegistry::new()),
			config,
		}
	}

	/// Loads `EventBusConfig` for `environment` via the shared config layer.
	pub fn from_config(environment: &str) -> BusResult<Self> {
		let config = EventBusConfig::load(environment)?;
		Ok(Self::new(config))
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(EventBusConfig::default())
	}
}

/// Handle returned by `EventBus::subscribe`; `off()` deregisters the callback.
struct BusSubscriptionHandle {
	registry: Arc<SubscriberRegistry>,
	name: String,
	id: u64,
}

#[async_trait]
impl SubscriptionHandle for BusSubscriptionHandle {
	async fn off(&self) {
		self.registry.unsubscribe(&self.name, self.id).await;
	}
}

/// Wraps a payload and its optional marker for delivery to handlers.
fn build_envelope(marker: Option<&str>, payload: Value) -> Value {
	json!({ "marker": marker, "payload": payload })
}

#[async_trait]
impl EventBusPort for EventBus {
	async fn subscribe(&self, name: &BusEventName, handler: Box<dyn Fn(Value) + Send + Sync>) -> Box<dyn SubscriptionHandle> {
		let id = self.registry.subscribe(name.as_str(), handler).await;
		Box::new(BusSubscriptionHandle {
			registry: Arc::clone(&self.registry),
			name: name.as_str().to_string(),
			id,
		})
	}

	async fn emit(&self, name: &BusEventName, payload: Value, marker: Option<&str>) {
		let envelope = build_envelope(marker, payload);
		let delivered = self.registry.dispatch(name.as_str(), envelope).await;
		duck!("emitted \"{}\" to {} subscriber(s)", name, delivered);
	}

	async fn emit_with_result(
		&self,
		name: &BusEventName,
		payload: Value,
		marker: Option<&str>,
		timeout: Option<Duration>,
	) -> Result<Value> {
		let callback_id = Uuid::new_v4().to_string();
		let return_name = result_sink_name(&callback_id);

		let (tx, rx) = oneshot::channel();
		let tx = std::sync::Mutex::new(Some(tx));
		let reply_id = self
			.registry
			.subscribe(
				&return_name,
				Box::new(move |value| {
					if let Some(tx) = tx.lock().expect("reply sender mutex poisoned").take() {
						let _ = tx.send(value);
					}
				}),
			)
			.await;

		let payload = attach_result_sink(payload, &return_name);
		let envelope = build_envelope(marker, payload);
		self.registry.dispatch(name.as_str(), envelope).await;

		let wait = timeout.unwrap_or_else(|| self.config.default_result_timeout());
		let outcome = tokio::time::timeout(wait, rx).await;
		self.registry.unsubscribe(&return_name, reply_id).await;

		match outcome {
			Ok(Ok(value)) => Ok(value),
			Ok(Err(_)) | Err(_) => Err(PortError::CapabilityUnavailable {
				capability: name.to_string(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::time::Duration;

	#[tokio::test]
	async fn emit_wraps_payload_and_marker_in_an_envelope() {
		let bus = EventBus::default();
		let received = Arc::new(std::sync::Mutex::new(None));
		let received_clone = Arc::clone(&received);

		let name = BusEventName::new("repository", "created", None);
		bus.subscribe(
			&name,
			Box::new(move |value| {
				*received_clone.lock().unwrap() = Some(value);
			}),
		)
		.await;

		bus.emit(&name, json!({"repositoryId": "r1"}), Some("ext-a")).await;

		let value = received.lock().unwrap().clone().expect("handler never fired");
		assert_eq!(value["marker"], "ext-a");
		assert_eq!(value["payload"]["repositoryId"], "r1");
	}

	#[tokio::test]
	async fn subscription_off_stops_future_delivery() {
		let bus = EventBus::default();
		let calls = Arc::new(AtomicUsize::new(0));
		let calls_clone = Arc::clone(&calls);

		let name = BusEventName::new("image", "uploaded", None);
		let handle = bus
			.subscribe(
				&name,
				Box::new(move |_| {
					calls_clone.fetch_add(1, Ordering::SeqCst);
				}),
			)
			.await;

		handle.off().await;
		bus.emit(&name, json!(null), None).await;

		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn emit_with_result_round_trips_through_result_sink() {
		let bus = Arc::new(EventBus::default());
		let name = BusEventName::new("extension", "command", Some("invoke"));

		let bus_for_handler = Arc::clone(&bus);
		bus.subscribe(
			&name,
			Box::new(move |value| {
				let sink = value["payload"]["resultSink"].as_str().unwrap().to_string();
				let bus = Arc::clone(&bus_for_handler);
				tokio::spawn(async move {
					bus.emit(&BusEventName::from_literal(sink), json!({"status": "ok"}), None).await;
				});
			}),
		)
		.await;

		let result = bus
			.emit_with_result(&name, json!({"extensionId": "ext-a"}), None, Some(Duration::from_secs(1)))
			.await
			.expect("expected a reply before the timeout");

		assert_eq!(result["status"], "ok");
	}

	#[tokio::test]
	async fn emit_with_result_times_out_without_a_reply() {
		let bus = EventBus::default();
		let name = BusEventName::new("extension", "command", Some("invoke"));

		let result = bus.emit_with_result(&name, json!({}), None, Some(Duration::from_millis(20))).await;

		assert!(result.is_err());
	}
}
