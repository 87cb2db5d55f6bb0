//! The persistent bidirectional extension socket (Component D, §4.D).
//!
//! [`SocketGateway`] owns two responsibilities beyond the narrow
//! [`SocketGatewayPort`](host_core_ports::SocketGatewayPort) contract other
//! components depend on:
//!
//! - **Outbound routing**: on construction it subscribes to every bus event
//!   name in the closed catalog (external interfaces, §6) and, for each
//!   emission, delivers it to every eligible socket — the master socket for
//!   every unmarked event, an extension socket iff it is subscribed to the
//!   event and the marker (if any) matches its id.
//! - **Wire-facing handlers** — [`SocketGateway::handle_connection`],
//!   [`SocketGateway::disconnect`] and [`SocketGateway::handle_notification`]
//!   — for whichever transport terminates the physical `connection`/
//!   `notifications` channels; these are not part of the port because the
//!   port is the seam other host components use, while these take the raw
//!   wire payloads only a transport adapter would have in hand.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use host_core_ports::{CredentialStorePort, ExtensionRegistryPort, EventBusPort};
//! use host_socket_gateway::SocketGateway;
//!
//! # struct NullCredentialStore;
//! # #[async_trait::async_trait]
//! # impl CredentialStorePort for NullCredentialStore {
//! #     fn generate_key(&self) -> String { String::new() }
//! #     async fn set_master_key(&self, _value: String) {}
//! #     async fn register_extension_key(&self, _id: &host_core_ports::ExtensionId) -> String { String::new() }
//! #     async fn unregister(&self, _id: &host_core_ports::ExtensionId) {}
//! #     async fn resolve(&self, _key: &str) -> host_core_ports::ports::Result<host_core_ports::ApiKeyEntry> { unimplemented!() }
//! #     async fn forget(&self, _value: &str) {}
//! #     async fn current_key(&self, _id: &host_core_ports::ExtensionId) -> Option<String> { None }
//! # }
//! # struct NullRegistry;
//! # #[async_trait::async_trait]
//! # impl ExtensionRegistryPort for NullRegistry {
//! #     async fn validate_archive(&self, _b: &[u8]) -> host_core_ports::ports::Result<host_core_ports::Manifest> { unimplemented!() }
//! #     async fn upsert(&self, _e: host_core_ports::Extension) -> host_core_ports::ports::Result<()> { Ok(()) }
//! #     async fn set_activity(&self, _id: &host_core_ports::ExtensionId, _a: host_core_ports::ExtensionActivity) -> host_core_ports::ports::Result<()> { Ok(()) }
//! #     async fn remove(&self, _id: &host_core_ports::ExtensionId) -> host_core_ports::ports::Result<()> { Ok(()) }
//! #     async fn get(&self, _id: &host_core_ports::ExtensionId) -> host_core_ports::ports::Result<host_core_ports::Extension> { unimplemented!() }
//! #     async fn find_by_capability(&self, _c: host_core_ports::Capability) -> host_core_ports::ports::Result<Vec<host_core_ports::Extension>> { Ok(vec![]) }
//! #     async fn find_by_command(&self, _id: &str) -> host_core_ports::ports::Result<Vec<host_core_ports::Extension>> { Ok(vec![]) }
//! #     async fn get_configuration(&self) -> host_core_ports::ports::Result<serde_json::Value> { Ok(serde_json::json!({})) }
//! #     async fn list(&self) -> host_core_ports::ports::Result<Vec<host_core_ports::Extension>> { Ok(vec![]) }
//! # }
//! # struct NullEventBus;
//! # #[async_trait::async_trait]
//! # impl EventBusPort for NullEventBus {
//! #     async fn subscribe(&self, _n: &host_core_ports::BusEventName, _h: Box<dyn Fn(serde_json::Value) + Send + Sync>) -> Box<dyn host_core_ports::ports::SubscriptionHandle> { unimplemented!() }
//! #     async fn emit(&self, _n: &host_core_ports::BusEventName, _p: serde_json::Value, _m: Option<&str>) {}
//! #     async fn emit_with_result(&self, _n: &host_core_ports::BusEventName, _p: serde_json::Value, _m: Option<&str>, _t: Option<std::time::Duration>) -> host_core_ports::ports::Result<serde_json::Value> { Ok(serde_json::Value::Null) }
//! # }
//! # #[tokio::main]
//! # async fn main() {
//! let gateway = SocketGateway::new(Arc::new(NullCredentialStore), Arc::new(NullRegistry), Arc::new(NullEventBus)).await;
//! assert!(!host_core_ports::SocketGatewayPort::has_master_socket(gateway.as_ref()).await);
//! # }
//! ```

mod ack;
mod catalog;
mod connection;
mod gateway;
mod intents;
mod notifications;
mod registry;

pub use gateway::SocketGateway;
