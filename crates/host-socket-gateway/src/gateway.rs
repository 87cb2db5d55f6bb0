//! `SocketGateway`: the persistent bidirectional extension socket
//! (Component D). Wires outbound bus-event routing at construction,
//! exposes the `connection`/`notifications` channel handlers used by
//! whichever transport accepts the physical sockets, and implements
//! [`SocketGatewayPort`] for the other components.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use host_core_ports::ports::Result;
use host_core_ports::{BusEventName, ContextId, CredentialStorePort, EventBusPort, ExtensionRegistryPort, PortError, SocketGatewayPort, SocketId};
use host_ipc_protocol::{ConnectionPayload, EventEnvelope, IntentOutcome, NotificationPayload};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;

use crate::ack::{PendingAcks, ACK_TIMEOUT};
use crate::catalog::CATALOG;
use crate::connection;
use crate::notifications;
use crate::registry::SocketRegistry;

/// The persistent bidirectional extension socket.
pub struct SocketGateway {
	credential_store: Arc<dyn CredentialStorePort>,
	extension_registry: Arc<dyn ExtensionRegistryPort>,
	event_bus: Arc<dyn EventBusPort>,
	sockets: RwLock<SocketRegistry>,
	pending_acks: PendingAcks,
}

impl SocketGateway {
	/// Builds the gateway and subscribes its outbound routing handler to
	/// every bus event name in the closed catalog.
	pub async fn new(
		credential_store: Arc<dyn CredentialStorePort>,
		extension_registry: Arc<dyn ExtensionRegistryPort>,
		event_bus: Arc<dyn EventBusPort>,
	) -> Arc<Self> {
		let gateway = Arc::new(Self {
			credential_store,
			extension_registry,
			event_bus: Arc::clone(&event_bus),
			sockets: RwLock::new(SocketRegistry::default()),
			pending_acks: PendingAcks::default(),
		});

		for name in CATALOG {
			let gateway = Arc::clone(&gateway);
			let owned_name = (*name).to_string();
			event_bus
				.subscribe(
					&BusEventName::from_literal(*name),
					Box::new(move |envelope: Value| {
						let gateway = Arc::clone(&gateway);
						let name = owned_name.clone();
						tokio::spawn(async move {
							gateway.route_outbound(&name, envelope).await;
						});
					}),
				)
				.await;
		}

		gateway
	}

	/// Authenticates and registers a newly opened physical socket.
	///
	/// # Errors
	/// Returns [`PortError::Unauthorized`] if the key does not authorize
	/// the announced role, or a validation error for a malformed extension id.
	pub async fn handle_connection(&self, payload: &ConnectionPayload, outbox: UnboundedSender<Value>) -> Result<SocketId> {
		connection::open(
			self.credential_store.as_ref(),
			self.extension_registry.as_ref(),
			&self.sockets,
			payload,
			outbox,
		)
		.await
	}

	/// Reverses a socket's indices on physical disconnect (or an explicit
	/// `isOpen=false` announcement on the same channel).
	pub async fn disconnect(&self, socket_id: SocketId) {
		connection::disconnect(&self.event_bus, &self.sockets, socket_id).await;
	}

	/// Processes one inbound `notifications` payload.
	///
	/// # Errors
	/// Returns a port error if an intent cannot be forwarded (no master
	/// socket connected, or the forwarding delivery times out).
	pub async fn handle_notification(&self, payload: NotificationPayload) -> Result<Option<IntentOutcome>> {
		notifications::handle(&self.event_bus, &self.sockets, &self.pending_acks, payload).await
	}

	/// Outbound routing for one bus event (§4.D "Outbound routing"): for
	/// every deliverable socket, assign a fresh `contextId` and either
	/// await its acknowledgment (extension targets, or a payload carrying
	/// a `resultSink`) or fire-and-forget (an unmarked delivery to the
	/// master with no result sink attached).
	async fn route_outbound(&self, event_name: &str, envelope: Value) {
		let marker = envelope["marker"].as_str().map(str::to_string);
		let payload = envelope["payload"].clone();
		let result_sink = payload.get("resultSink").and_then(|v| v.as_str()).map(str::to_string);
		let wants_result = result_sink.is_some();
		let started = Instant::now();

		let targets = self.sockets.read().await.deliverable(event_name, marker.as_deref());
		for socket_id in targets {
			let is_extension = self
				.sockets
				.read()
				.await
				.get(socket_id)
				.is_some_and(|entry| entry.extension_id.is_some());

			let context_id = ContextId::new();
			let wire = match serde_json::to_value(EventEnvelope {
				channel: event_name.to_string(),
				context_id: context_id.0,
				milliseconds: started.elapsed().as_millis() as u64,
				value: payload.clone(),
			}) {
				Ok(wire) => wire,
				Err(_) => continue,
			};

			if is_extension || wants_result {
				let resolved = send_and_await_ack_on(&self.sockets, &self.pending_acks, socket_id, context_id, wire, ACK_TIMEOUT).await;
				if let (Some(sink), Ok(value)) = (&result_sink, resolved) {
					self.event_bus.emit(&BusEventName::from_literal(sink.clone()), value, None).await;
				}
			} else {
				send_fire_and_forget(&self.sockets, socket_id, wire).await;
			}
		}
	}
}

/// Sends `wire` to `socket_id` without waiting for any reply.
async fn send_fire_and_forget(sockets: &RwLock<SocketRegistry>, socket_id: SocketId, wire: Value) {
	if let Some(entry) = sockets.read().await.get(socket_id) {
		if let Some(outbox) = &entry.outbox {
			let _ = outbox.send(wire);
		}
	}
}

/// Sends `wire` to `socket_id`, registers a pending ack for `context_id`,
/// and awaits it up to `timeout` — the shared delivery primitive behind
/// both [`SocketGatewayPort::send_and_await_ack`] and intent forwarding.
pub(crate) async fn send_and_await_ack_on(
	sockets: &RwLock<SocketRegistry>,
	pending_acks: &PendingAcks,
	socket_id: SocketId,
	context_id: ContextId,
	wire: Value,
	timeout: Duration,
) -> Result<Value> {
	let outbox = sockets
		.read()
		.await
		.get(socket_id)
		.and_then(|entry| entry.outbox.clone())
		.ok_or_else(|| PortError::validation_field("socketId", "no active connection for this socket"))?;

	let reply = pending_acks.register(context_id).await;
	if outbox.send(wire).is_err() {
		pending_acks.forget(context_id).await;
		return Err(PortError::validation_field("socketId", "socket outbox is closed"));
	}

	match tokio::time::timeout(timeout, reply).await {
		Ok(Ok(value)) => Ok(value),
		Ok(Err(_)) | Err(_) => {
			pending_acks.forget(context_id).await;
			Err(PortError::CapabilityUnavailable {
				capability: format!("socket-ack:{context_id}"),
			})
		}
	}
}

#[async_trait]
impl SocketGatewayPort for SocketGateway {
	async fn register_socket(&self, socket_id: SocketId, extension_id: Option<host_core_ports::ExtensionId>) {
		self.sockets.write().await.insert(
			socket_id,
			crate::registry::SocketEntry {
				extension_id,
				subscribed_events: Default::default(),
				is_long_lived: false,
				outbox: None,
			},
		);
	}

	async fn unregister_socket(&self, socket_id: SocketId) {
		self.sockets.write().await.remove(socket_id);
	}

	async fn has_master_socket(&self) -> bool {
		self.sockets.read().await.has_master()
	}

	async fn send_and_await_ack(&self, socket_id: SocketId, context_id: ContextId, envelope: Value) -> Result<Value> {
		send_and_await_ack_on(&self.sockets, &self.pending_acks, socket_id, context_id, envelope, ACK_TIMEOUT).await
	}
}
