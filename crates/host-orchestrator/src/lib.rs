//! Component F: the public extension-lifecycle and request/response façade.
//!
//! `Orchestrator` composes the credential store, extension registry, event
//! bus, process supervisor and image repository ports behind the single
//! [`host_core_ports::ExtensionOrchestratorPort`] trait. The individual
//! operations live in their own modules (`lifecycle`, `synchronize`,
//! `commands`) as free functions over `&dyn Port` references, so each can be
//! unit-tested without standing up the whole façade.

mod commands;
mod config;
mod lifecycle;
mod orchestrator;
mod synchronize;
mod throttle;

pub use config::{OrchestratorConfig, OrchestratorPaths, MAX_ARCHIVE_BYTES};
pub use orchestrator::Orchestrator;
pub use throttle::ThrottleGate;
