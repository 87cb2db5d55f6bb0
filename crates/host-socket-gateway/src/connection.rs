//! `connection` channel handling: authentication, socket registration and
//! disconnect (§4.D steps 1-3 and "On disconnect").

use std::sync::Arc;

use host_core_ports::ports::Result;
use host_core_ports::{
	ApiKeyEntry, BusEventName, CredentialStorePort, EventBusPort, ExtensionActivity, ExtensionId, ExtensionRegistryPort, PortError, SocketId,
};
use host_ipc_protocol::ConnectionPayload;
use serde_json::{json, Value};
use tokio::sync::{mpsc::UnboundedSender, RwLock};

use crate::catalog::subscribed_events;
use crate::registry::{SocketEntry, SocketRegistry};

/// Authenticates a presented key for the given (optional) extension id,
/// per §4.D step 1: an extension payload's key must belong to that exact
/// extension; otherwise the master key (scope `all`) is required.
pub(crate) async fn authenticate(
	credential_store: &dyn CredentialStorePort,
	api_key: &str,
	extension_id: Option<&ExtensionId>,
) -> Result<ApiKeyEntry> {
	let entry = credential_store.resolve(api_key).await?;
	match extension_id {
		Some(extension_id) if entry.extension_id.as_ref() == Some(extension_id) => Ok(entry),
		Some(_) => Err(PortError::Unauthorized {
			message: "presented key does not belong to the announced extension".to_string(),
		}),
		None if entry.scopes.iter().any(|scope| scope.as_str() == ApiKeyEntry::ALL_SCOPE) => Ok(entry),
		None => Err(PortError::Unauthorized {
			message: "master connection requires the master key".to_string(),
		}),
	}
}

/// Handles a `connection` announcement with `isOpen=true`: authenticates,
/// computes the extension's subscribed events, and registers the socket.
pub(crate) async fn open(
	credential_store: &dyn CredentialStorePort,
	extension_registry: &dyn ExtensionRegistryPort,
	sockets: &RwLock<SocketRegistry>,
	payload: &ConnectionPayload,
	outbox: UnboundedSender<Value>,
) -> Result<SocketId> {
	let extension_id = payload
		.extension_id
		.as_ref()
		.map(|id| ExtensionId::parse(id.clone()))
		.transpose()
		.map_err(|message| PortError::validation_field("extensionId", message))?;

	authenticate(credential_store, &payload.api_key, extension_id.as_ref()).await?;

	let (subscribed, is_long_lived) = match &extension_id {
		Some(id) => {
			let extension = extension_registry.get(id).await?;
			extension_registry.set_activity(id, ExtensionActivity::Connected).await?;
			(subscribed_events(&extension.manifest.instructions), extension.manifest.instructions.iter().any(|i| i.is_long_lived()))
		}
		None => (Default::default(), false),
	};

	let socket_id = SocketId::new();
	sockets.write().await.insert(
		socket_id,
		SocketEntry {
			extension_id,
			subscribed_events: subscribed,
			is_long_lived,
			outbox: Some(outbox),
		},
	);
	Ok(socket_id)
}

/// Reverses a socket's indices and, if its extension required a long-lived
/// child, republishes `extension.process.stopped`.
pub(crate) async fn disconnect(event_bus: &Arc<dyn EventBusPort>, sockets: &RwLock<SocketRegistry>, socket_id: SocketId) {
	let removed = sockets.write().await.remove(socket_id);
	if let Some(entry) = removed {
		if entry.is_long_lived {
			if let Some(extension_id) = entry.extension_id {
				event_bus
					.emit(&BusEventName::new("extension", "process", Some("stopped")), json!({"extensionId": extension_id.as_str()}), None)
					.await;
			}
		}
	}
}
