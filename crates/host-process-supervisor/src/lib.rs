//! Owns the lifecycle of extension subprocesses (Component E, §4.E):
//! launching a manifest's `process.started` children, restarting them on
//! unintended exit up to a fixed cap, stopping them gracefully, and
//! fanning image-domain bus events out to short-lived extensions.
//!
//! The supervisor's own state machine (`Stopped -> Starting -> Started ->
//! Stopping -> Stopped`) is independent of any individual child's; every
//! [`ProcessSupervisorPort`](host_core_ports::ProcessSupervisorPort)
//! method rejects calls invalid in the current state.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use host_core_ports::ProcessSupervisorPort;
//! use host_process_supervisor::{ProcessSupervisor, SupervisorConfig};
//!
//! # struct NullCredentialStore;
//! # #[async_trait::async_trait]
//! # impl host_core_ports::CredentialStorePort for NullCredentialStore {
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
//! # impl host_core_ports::ExtensionRegistryPort for NullRegistry {
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
//! # impl host_core_ports::EventBusPort for NullEventBus {
//! #     async fn subscribe(&self, _n: &host_core_ports::BusEventName, _h: Box<dyn Fn(serde_json::Value) + Send + Sync>) -> Box<dyn host_core_ports::ports::SubscriptionHandle> { unimplemented!() }
//! #     async fn emit(&self, _n: &host_core_ports::BusEventName, _p: serde_json::Value, _m: Option<&str>) {}
//! #     async fn emit_with_result(&self, _n: &host_core_ports::BusEventName, _p: serde_json::Value, _m: Option<&str>, _t: Option<std::time::Duration>) -> host_core_ports::ports::Result<serde_json::Value> { Ok(serde_json::Value::Null) }
//! # }
//! # #[tokio::main]
//! # async fn main() {
//! let supervisor = ProcessSupervisor::new(
//!     SupervisorConfig::default(),
//!     Arc::new(NullCredentialStore),
//!     Arc::new(NullRegistry),
//!     Arc::new(NullEventBus),
//! );
//! supervisor.start("http://localhost:8080".to_string()).await.unwrap();
//! # }
//! ```

pub mod child;
pub mod config;
pub mod supervisor;
pub mod types;
pub mod variables;

pub use config::SupervisorConfig;
pub use supervisor::ProcessSupervisor;
pub use types::{ProcessStatus, SupervisorState};
