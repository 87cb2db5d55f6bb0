//! # Host Core Ports
//!
//! Domain types and port trait definitions for the extension host's
//! hexagonal architecture. These ports are the seams that separate
//! domain logic from infrastructure: the domain core calls only port
//! abstractions, adapters provide the concrete implementations.
//!
//! ## Core Ports
//!
//! - [`CredentialStorePort`]: API key issuance and resolution (Component A)
//! - [`ExtensionRegistryPort`]: manifest validation, persistence and indexing (Component B)
//! - [`EventBusPort`]: hierarchical typed publish/subscribe (Component C)
//! - [`SocketGatewayPort`]: the persistent bidirectional extension socket (Component D)
//! - [`ProcessSupervisorPort`]: extension subprocess lifecycle (Component E)
//! - [`ExtensionOrchestratorPort`]: the public façade (Component F)

pub mod errors;
pub mod ports;
pub mod types;

pub use errors::{ChildFailure, PortError};
pub use ports::{
	CredentialStorePort, EventBusPort, ExtensionOrchestratorPort, ExtensionRegistryPort, ImageRepositoryPort, ProcessSupervisorPort,
	SocketGatewayPort, SubscriptionHandle,
};
pub use types::*;

pub use host_commons::HostError;
