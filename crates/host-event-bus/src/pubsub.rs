//! Exact-name subscriber registry and dispatch.
//!
//! Subscriptions are keyed by the literal bus event name (`entity.action[.state]`
//! or a synthesized `return|<callbackId>`); there is no wildcard or regex
//! matching, since nothing in the bus event catalog needs it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use host_commons::debug::duck;
use serde_json::Value;
use tokio::sync::RwLock;

type Handler = Arc<dyn Fn(Value) + Send + Sync>;

/// Registry of subscriber callbacks, keyed by bus event name.
pub struct SubscriberRegistry {
	subscribers: RwLock<HashMap<String, Vec<(u64, Handler)>>>,
	next_id: AtomicU64,
}

impl SubscriberRegistry {
	pub fn new() -> Self {
		Self {
			subscribers: RwLock::new(HashMap::new()),
			next_id: AtomicU64::new(1),
		}
	}

	/// Registers `handler` under `name` and returns its subscription id.
	pub async fn subscribe(&self, name: &str, handler: Box<dyn Fn(Value) + Send + Sync>) -> u64 {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let handler: Handler = Arc::from(handler);
		self.subscribers.write().await.entry(name.to_string()).or_default().push((id, handler));
		duck!("subscribed id={} to \"{}\"", id, name);
		id
	}

	/// Removes the subscription `id` registered under `name`, if present.
	pub async fn unsubscribe(&self, name: &str, id: u64) {
		let mut subscribers = self.subscribers.write().await;
		if let Some(handlers) = subscribers.get_mut(name) {
			handlers.retain(|(existing, _)| *existing != id);
			if handlers.is_empty() {
				subscribers.remove(name);
			}
		}
	}

	/// Invokes every handler registered under `name` with a clone of `value`.
	pub async fn dispatch(&self, name: &str, value: Value) -> usize {
		let handlers: Vec<Handler> = {
			let subscribers = self.subscribers.read().await;
			subscribers.get(name).map(|v| v.iter().map(|(_, h)| Arc::clone(h)).collect()).unwrap_or_default()
		};
		let delivered = handlers.len();
		for handler in handlers {
			handler(value.clone());
		}
		delivered
	}
}

impl Default for SubscriberRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::sync::atomic::AtomicUsize;

	#[tokio::test]
	async fn dispatch_invokes_every_subscriber() {
		let registry = SubscriberRegistry::new();
		let calls = Arc::new(AtomicUsize::new(0));

		let calls_a = Arc::clone(&calls);
		registry.subscribe("repository.created", Box::new(move |_| { calls_a.fetch_add(1, Ordering::SeqCst); })).await;
		let calls_b = Arc::clone(&calls);
		registry.subscribe("repository.created", Box::new(move |_| { calls_b.fetch_add(1, Ordering::SeqCst); })).await;

		let delivered = registry.dispatch("repository.created", json!({"id": "r1"})).await;

		assert_eq!(delivered, 2);
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn dispatch_to_unknown_name_delivers_nothing() {
		let registry = SubscriberRegistry::new();
		let delivered = registry.dispatch("nothing.subscribed", json!(null)).await;
		assert_eq!(delivered, 0);
	}

	#[tokio::test]
	async fn unsubscribe_stops_future_delivery() {
		let registry = SubscriberRegistry::new();
		let calls = Arc::new(AtomicUsize::new(0));
		let calls_clone = Arc::clone(&calls);
		let id = registry.subscribe("image.uploaded", Box::new(move |_| { calls_clone.fetch_add(1, Ordering::SeqCst); })).await;

		registry.unsubscribe("image.uploaded", id).await;
		registry.dispatch("image.uploaded", json!(null)).await;

		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}
}
