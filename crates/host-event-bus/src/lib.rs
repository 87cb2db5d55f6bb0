//! Hierarchical typed publish/subscribe event bus for the extension host.
//!
//! Subscribers register by exact bus event name (`entity.action[.state]`);
//! there is no wildcard routing. Publishers may attach a `marker` — usually
//! an extension id — that travels with the payload for marker-aware
//! consumers (the socket gateway) to filter on, and may request a single
//! correlated reply via `emit_with_result`, which rides on the same
//! subscribe/emit machinery through a synthesized `return|<callbackId>`
//! name rather than a separate request/response path.
//!
//! # Examples
//!
//! ```rust
//! use host_event_bus::{EventBus, EventBusConfig};
//! use host_core_ports::{BusEventName, EventBusPort};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(EventBusConfig::default());
//! let name = BusEventName::new("repository", "created", None);
//!
//! bus.subscribe(&name, Box::new(|payload| println!("{payload}"))).await;
//! bus.emit(&name, json!({"repositoryId": "r1"}), None).await;
//! # }
//! ```

pub mod bus;
pub mod correlation;
pub mod error;
pub mod pubsub;

pub use bus::{EventBus, EventBusConfig};
pub use error::{BusError, BusResult};
