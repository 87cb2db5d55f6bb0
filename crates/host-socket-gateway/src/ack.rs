//! Pending-acknowledgment bookkeeping for `send_and_await_ack` (§4.D).
//!
//! Every delivery that requires an ack (an extension target, or a plain
//! event an emit-result sink was attached to) registers a one-shot slot
//! keyed by the delivery's `contextId`; the inbound `acknowledgment`
//! notification resolves it by the same id.

use std::collections::HashMap;
use std::time::Duration;

use host_core_ports::ContextId;
use serde_json::Value;
use tokio::sync::{oneshot, Mutex};

/// How long `send_and_await_ack` waits for the matching inbound ack.
pub(crate) const ACK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub(crate) struct PendingAcks {
	slots: Mutex<HashMap<ContextId, oneshot::Sender<Value>>>,
}

impl PendingAcks {
	pub async fn register(&self, context_id: ContextId) -> oneshot::Receiver<Value> {
		let (tx, rx) = oneshot::channel();
		self.slots.lock().await.insert(context_id, tx);
		rx
	}

	/// Resolves a pending slot; returns `false` if nothing was waiting on it
	/// (a late or unmatched acknowledgment).
	pub async fn resolve(&self, context_id: ContextId, value: Value) -> bool {
		if let Some(tx) = self.slots.lock().await.remove(&context_id) {
			tx.send(value).is_ok()
		} else {
			false
		}
	}

	pub async fn forget(&self, context_id: ContextId) {
		self.slots.lock().await.remove(&context_id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn resolve_delivers_the_value_to_the_registered_receiver() {
		let acks = PendingAcks::default();
		let context_id = ContextId::new();
		let rx = acks.register(context_id).await;

		assert!(acks.resolve(context_id, json!({"ok": true})).await);
		assert_eq!(rx.await.unwrap(), json!({"ok": true}));
	}

	#[tokio::test]
	async fn resolving_an_unknown_context_id_reports_no_waiter() {
		let acks = PendingAcks::default();
		assert!(!acks.resolve(ContextId::new(), json!(null)).await);
	}
}
