//! `Orchestrator`: the in-process implementation of
//! `ExtensionOrchestratorPort` (Component F, §4.F), composing the other
//! five ports behind the one public façade.

use std::sync::Arc;

use async_trait::async_trait;
use host_core_ports::ports::Result;
use host_core_ports::{
	Capability, CredentialStorePort, EventBusPort, Extension, ExtensionId, ExtensionOrchestratorPort, ExtensionRegistryPort,
	ImageRepositoryPort, ProcessSupervisorPort,
};
use serde_json::Value;

use crate::config::OrchestratorConfig;
use crate::throttle::ThrottleGate;
use crate::{commands, lifecycle, synchronize};

/// The public façade composing credentials, registry, event bus, socket
/// gateway (indirectly, through the bus) and process supervisor.
pub struct Orchestrator {
	credential_store: Arc<dyn CredentialStorePort>,
	extension_registry: Arc<dyn ExtensionRegistryPort>,
	event_bus: Arc<dyn EventBusPort>,
	process_supervisor: Arc<dyn ProcessSupervisorPort>,
	image_repository: Arc<dyn ImageRepositoryPort>,
	config: OrchestratorConfig,
	throttle_gate: ThrottleGate,
}

impl Orchestrator {
	#[must_use]
	pub fn new(
		credential_store: Arc<dyn CredentialStorePort>,
		extension_registry: Arc<dyn ExtensionRegistryPort>,
		event_bus: Arc<dyn EventBusPort>,
		process_supervisor: Arc<dyn ProcessSupervisorPort>,
		image_repository: Arc<dyn ImageRepositoryPort>,
		config: OrchestratorConfig,
	) -> Self {
		Self {
			credential_store,
			extension_registry,
			event_bus,
			process_supervisor,
			image_repository,
			config,
			throttle_gate: ThrottleGate::default(),
		}
	}
}

#[async_trait]
impl ExtensionOrchestratorPort for Orchestrator {
	async fn install(&self, archive_bytes: &[u8]) -> Result<Extension> {
		lifecycle::install(
			self.extension_registry.as_ref(),
			self.credential_store.as_ref(),
			self.process_supervisor.as_ref(),
			self.event_bus.as_ref(),
			&self.config,
			archive_bytes,
		)
		.await
	}

	async fn update(&self, extension_id: &ExtensionId, archive_bytes: &[u8]) -> Result<Extension> {
		lifecycle::update(
			self.extension_registry.as_ref(),
			self.credential_store.as_ref(),
			self.process_supervisor.as_ref(),
			self.event_bus.as_ref(),
			&self.config,
			extension_id,
			archive_bytes,
		)
		.await
	}

	async fn uninstall(&self, extension_id: &ExtensionId) -> Result<()> {
		lifecycle::uninstall(
			self.extension_registry.as_ref(),
			self.credential_store.as_ref(),
			self.process_supervisor.as_ref(),
			self.image_repository.as_ref(),
			self.event_bus.as_ref(),
			extension_id,
		)
		.await
	}

	async fn pause_or_resume(&self, extension_id: &ExtensionId, paused: bool) -> Result<()> {
		lifecycle::pause_or_resume(
			self.extension_registry.as_ref(),
			self.process_supervisor.as_ref(),
			self.image_repository.as_ref(),
			self.event_bus.as_ref(),
			&self.throttle_gate,
			extension_id,
			paused,
		)
		.await
	}

	async fn synchronize(&self, extension_id: &ExtensionId) -> Result<()> {
		synchronize::synchronize(
			self.extension_registry.as_ref(),
			self.image_repository.as_ref(),
			self.event_bus.as_ref(),
			&self.throttle_gate,
			extension_id,
		)
		.await
	}

	async fn run_capability(&self, capability: Capability, payload: Value) -> Result<Value> {
		commands::run_capability(
			self.extension_registry.as_ref(),
			self.event_bus.as_ref(),
			&self.throttle_gate,
			capability,
			payload,
		)
		.await
	}

	async fn run_process_command(&self, extension_id: &ExtensionId, command_id: &str, parameters: Value) -> Result<Value> {
		commands::run_process_command(
			self.extension_registry.as_ref(),
			self.event_bus.as_ref(),
			&self.throttle_gate,
			extension_id,
			command_id,
			parameters,
		)
		.await
	}

	async fn run_image_command(&self, extension_id: &ExtensionId, command_id: &str, parameters: Value, image_ids: &[String]) -> Result<Value> {
		commands::run_image_command(
			self.extension_registry.as_ref(),
			self.image_repository.as_ref(),
			self.event_bus.as_ref(),
			&self.throttle_gate,
			extension_id,
			command_id,
			parameters,
			image_ids,
		)
		.await
	}
}
