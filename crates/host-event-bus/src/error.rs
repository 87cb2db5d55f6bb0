//! Internal error type for bus configuration loading.
//!
//! `EventBus` implements `EventBusPort` directly and its trait methods
//! return `host_core_ports::Result<T>` (i.e. `PortError`) already; this
//! module only covers the bus's own construction path, which isn't part of
//! that trait.

use thiserror::Error;

/// Errors raised while building an `EventBus` outside of its port methods.
#[derive(Error, Debug)]
pub enum BusError {
	/// Configuration could not be loaded for the given environment.
	#[error("failed to load event bus configuration: {0}")]
	Configuration(#[from] host_commons::HostError),
}

/// Result type alias for bus construction.
pub type BusResult<T> = std::result::Result<T, BusError>;
