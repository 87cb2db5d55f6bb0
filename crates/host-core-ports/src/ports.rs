//! Port traits: one per cooperating component (§2).
//!
//! Each port is the seam an adapter crate implements; the binary wires
//! concrete adapters together, but nothing upstream of a port ever
//! names a concrete adapter type.

use crate::errors::PortError;
use crate::types::{ApiKeyEntry, BusEventName, Capability, ContextId, Extension, ExtensionActivity, ExtensionId, ImageRecord, Manifest, SocketId};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Result type used by every port method.
pub type Result<T> = std::result::Result<T, PortError>;

/// Component A: issues and validates per-extension API keys.
#[async_trait]
pub trait CredentialStorePort: Send + Sync {
	/// Generates a fresh 36-char lowercase alphabetic key value.
	fn generate_key(&self) -> String;

	/// Sets the single master key value.
	async fn set_master_key(&self, value: String);

	/// Registers (or replaces) the key for an extension; idempotent.
	async fn register_extension_key(&self, extension_id: &ExtensionId) -> String;

	/// Removes an extension's key entirely.
	async fn unregister(&self, extension_id: &ExtensionId);

	/// Resolves a presented key to its scopes and owning extension, if any.
	async fn resolve(&self, key: &str) -> Result<ApiKeyEntry>;

	/// Invalidates a cached persisted-secret entry.
	async fn forget(&self, value: &str);

	/// Returns an extension's currently-issued key value, if any, for
	/// callers (the process supervisor's launch step) that need to hand
	/// it to a child rather than validate a presented one.
	async fn current_key(&self, extension_id: &ExtensionId) -> Option<String>;
}

/// Component B: parses, validates, persists and indexes extension manifests.
#[async_trait]
pub trait ExtensionRegistryPort: Send + Sync {
	/// Validates an extension archive's manifest without persisting it.
	async fn validate_archive(&self, archive_bytes: &[u8]) -> Result<Manifest>;

	/// Records (or replaces) an extension's runtime entry after install/update.
	async fn upsert(&self, extension: Extension) -> Result<()>;

	/// Transitions an already-registered extension's socket activity, e.g.
	/// to `Connected` once its socket authenticates.
	async fn set_activity(&self, extension_id: &ExtensionId, activity: ExtensionActivity) -> Result<()>;

	/// Removes an extension's registry entry entirely.
	async fn remove(&self, extension_id: &ExtensionId) -> Result<()>;

	/// Looks up an extension by id.
	async fn get(&self, extension_id: &ExtensionId) -> Result<Extension>;

	/// Lists extensions, enabled and connected, that declare a capability.
	async fn find_by_capability(&self, capability: Capability) -> Result<Vec<Extension>>;

	/// Lists extensions declaring the given command id.
	async fn find_by_command(&self, command_id: &str) -> Result<Vec<Extension>>;

	/// Sorted union of capability -> supporting extensions and extension -> commands.
	async fn get_configuration(&self) -> Result<Value>;

	/// All currently-registered extensions, insertion order preserved.
	async fn list(&self) -> Result<Vec<Extension>>;
}

/// Subscription handle returned by [`EventBusPort::subscribe`]; dropping
/// or calling `off` cancels the subscription.
#[async_trait]
pub trait SubscriptionHandle: Send + Sync {
	/// Cancels the subscription.
	async fn off(&self);
}

/// Component C: hierarchical typed publish/subscribe.
#[async_trait]
pub trait EventBusPort: Send + Sync {
	/// Subscribes to an exact bus event name.
	async fn subscribe(
		&self,
		name: &BusEventName,
		handler: Box<dyn Fn(Value) + Send + Sync>,
	) -> Box<dyn SubscriptionHandle>;

	/// Emits a plain, fire-and-forget event, optionally marked.
	async fn emit(&self, name: &BusEventName, payload: Value, marker: Option<&str>);

	/// Emits an event and awaits a single response delivered to a
	/// generated `return|<callbackId>` name.
	async fn emit_with_result(
		&self,
		name: &BusEventName,
		payload: Value,
		marker: Option<&str>,
		timeout: Option<Duration>,
	) -> Result<Value>;
}

/// Component D: the persistent bidirectional socket gateway.
#[async_trait]
pub trait SocketGatewayPort: Send + Sync {
	/// Registers a newly authenticated socket (extension or master).
	async fn register_socket(&self, socket_id: SocketId, extension_id: Option<ExtensionId>);

	/// Removes a socket's indices on disconnect.
	async fn unregister_socket(&self, socket_id: SocketId);

	/// Whether a master socket is currently active.
	async fn has_master_socket(&self) -> bool;

	/// Delivers a value to a specific socket and awaits its acknowledgment.
	async fn send_and_await_ack(&self, socket_id: SocketId, context_id: ContextId, envelope: Value) -> Result<Value>;
}

/// Component E: owns extension subprocess lifecycle.
#[async_trait]
pub trait ProcessSupervisorPort: Send + Sync {
	/// Starts the supervisor's worker; `Stopped -> Starting -> Started`.
	async fn start(&self, web_services_base_url: String) -> Result<()>;

	/// Stops the supervisor and every child; `Started -> Stopping -> Stopped`.
	async fn stop(&self) -> Result<()>;

	/// Spawns every `process.started` child for the given extensions.
	async fn start_processes(&self, extensions: &[Extension]) -> Result<()>;

	/// Stops every child belonging to the given extensions.
	async fn stop_processes(&self, extension_ids: &[ExtensionId]) -> Result<()>;

	/// Fans an image-domain bus event out to matching short-lived extensions.
	async fn on_image_event(&self, event_name: &BusEventName, payload: Value) -> Result<()>;

	/// Resets an extension's consecutive-exit counter after a human action.
	async fn reset_restart_counter(&self, extension_id: &ExtensionId);
}

/// The relational/vector stores (§1 "explicitly out of scope"), narrowed
/// to exactly what the orchestrator needs: enumerating images for
/// `synchronize`, existence/tag checks for `runImageCommand`, and the
/// delete-children-then-delete-parent cleanup on `uninstall`.
#[async_trait]
pub trait ImageRepositoryPort: Send + Sync {
	/// Every image across every repository, for `synchronize`'s fan-out.
	async fn list_images(&self) -> Result<Vec<ImageRecord>>;

	/// Whether every id in `image_ids` exists.
	async fn images_exist(&self, image_ids: &[String]) -> Result<bool>;

	/// Tags this extension itself has written onto an image (the
	/// `on.withTags` check in `runImageCommand`).
	async fn extension_tags(&self, image_id: &str, extension_id: &ExtensionId) -> Result<Vec<String>>;

	/// Deletes every row owned by an extension (tags, features,
	/// attachments, embeddings, settings) on uninstall.
	async fn delete_extension_data(&self, extension_id: &ExtensionId) -> Result<()>;
}

/// Component F: the public façade.
#[async_trait]
pub trait ExtensionOrchestratorPort: Send + Sync {
	/// Installs a new extension from an archive.
	async fn install(&self, archive_bytes: &[u8]) -> Result<Extension>;

	/// Replaces an installed extension's code with a new archive.
	async fn update(&self, extension_id: &ExtensionId, archive_bytes: &[u8]) -> Result<Extension>;

	/// Removes an extension and all of its owned data.
	async fn uninstall(&self, extension_id: &ExtensionId) -> Result<()>;

	/// Transitions an extension's `status` between `Enabled` and `Paused`.
	async fn pause_or_resume(&self, extension_id: &ExtensionId, paused: bool) -> Result<()>;

	/// Re-emits subscribed image events for every image in every repository.
	async fn synchronize(&self, extension_id: &ExtensionId) -> Result<()>;

	/// Dispatches a capability call to the first eligible extension.
	async fn run_capability(&self, capability: Capability, payload: Value) -> Result<Value>;

	/// Runs a `Process`-scoped command on a specific extension.
	async fn run_process_command(&self, extension_id: &ExtensionId, command_id: &str, parameters: Value) -> Result<Value>;

	/// Runs an `Images`/`Image`-scoped command against the given image ids.
	async fn run_image_command(
		&self,
		extension_id: &ExtensionId,
		command_id: &str,
		parameters: Value,
		image_ids: &[String],
	) -> Result<Value>;
}
