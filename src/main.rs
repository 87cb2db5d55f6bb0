//! Extension host binary: composition root for Components A-F.
//!
//! Wires the credential store, extension registry, event bus, socket
//! gateway, process supervisor and orchestrator together, installs or
//! supersedes built-in extensions, starts the supervisor, and runs until
//! asked to shut down.

use std::path::PathBuf;
use std::sync::Arc;

use host_commons::config::Config;
use host_commons::logging::{init_logging, LoggingConfig};
use host_commons::{error, info};
use host_core_ports::{CredentialStorePort, EventBusPort, ExtensionOrchestratorPort, ExtensionRegistryPort, ProcessSupervisorPort};
use host_credential_store::CredentialStore;
use host_event_bus::EventBus;
use host_extension_registry::persist;
use host_extension_registry::ExtensionRegistry;
use host_orchestrator::{Orchestrator, OrchestratorConfig};
use host_process_supervisor::{ProcessSupervisor, SupervisorConfig};
use host_socket_gateway::SocketGateway;
use serde::Deserialize;

/// Top-level configuration for the `extension-host` binary.
#[derive(Debug, Clone, Deserialize)]
struct ExtensionHostConfig {
	logging: LoggingConfig,
	installed_extensions_dir: PathBuf,
	built_in_extensions_dir: PathBuf,
	shared_models_dir: PathBuf,
	web_services_base_url: String,
	master_key: String,
}

impl Config for ExtensionHostConfig {}

/// The relational/vector image store (§1 "explicitly out of scope"): every
/// query this binary needs from it answers empty until that store exists.
struct EmptyImageRepository;

#[async_trait::async_trait]
impl host_core_ports::ImageRepositoryPort for EmptyImageRepository {
	async fn list_images(&self) -> host_core_ports::ports::Result<Vec<host_core_ports::ImageRecord>> {
		Ok(Vec::new())
	}
	async fn images_exist(&self, _image_ids: &[String]) -> host_core_ports::ports::Result<bool> {
		Ok(false)
	}
	async fn extension_tags(&self, _image_id: &str, _extension_id: &host_core_ports::ExtensionId) -> host_core_ports::ports::Result<Vec<String>> {
		Ok(Vec::new())
	}
	async fn delete_extension_data(&self, _extension_id: &host_core_ports::ExtensionId) -> host_core_ports::ports::Result<()> {
		Ok(())
	}
}

/// Installs every built-in extension archive that supersedes whatever
/// version (if any) is already installed under that id.
async fn install_built_in_extensions(orchestrator: &Orchestrator, extension_registry: &ExtensionRegistry, built_in_extensions_dir: &std::path::Path) {
	let candidates = match persist::scan_built_in_extensions(built_in_extensions_dir).await {
		Ok(candidates) => candidates,
		Err(e) => {
			error!("failed to scan built-in extensions directory: {e}");
			return;
		}
	};

	for candidate in candidates {
		let manifest = match extension_registry.validate_archive(&candidate.bytes).await {
			Ok(manifest) => manifest,
			Err(e) => {
				error!("built-in extension archive {} failed manifest validation: {e}", candidate.path.display());
				continue;
			}
		};

		let installed_version = extension_registry.get(&manifest.id).await.ok().map(|extension| extension.manifest.version);
		if !persist::supersedes(&manifest.version, installed_version.as_ref()) {
			continue;
		}

		let install_result = if installed_version.is_some() {
			orchestrator.update(&manifest.id, &candidate.bytes).await
		} else {
			orchestrator.install(&candidate.bytes).await
		};

		match install_result {
			Ok(extension) => info!("installed built-in extension {} v{}", extension.id(), extension.manifest.version),
			Err(e) => error!("failed to install built-in extension {}: {e}", manifest.id),
		}
	}
}

async fn run() -> Result<(), host_commons::HostError> {
	let environment = std::env::var("EXTENSION_HOST_ENV").unwrap_or_else(|_| "development".to_string());
	let config = ExtensionHostConfig::load(&environment)?;
	init_logging(&config.logging)?;
	info!("extension host starting in {environment} environment");

	let credential_store = Arc::new(CredentialStore::default());
	credential_store.set_master_key(config.master_key.clone()).await;

	let extension_registry = Arc::new(ExtensionRegistry::default());
	let event_bus = Arc::new(EventBus::default());

	let process_supervisor = Arc::new(ProcessSupervisor::new(
		SupervisorConfig::default(),
		Arc::clone(&credential_store) as Arc<dyn CredentialStorePort>,
		Arc::clone(&extension_registry) as Arc<dyn ExtensionRegistryPort>,
		Arc::clone(&event_bus) as Arc<dyn EventBusPort>,
	));

	let _socket_gateway = SocketGateway::new(
		Arc::clone(&credential_store) as Arc<dyn CredentialStorePort>,
		Arc::clone(&extension_registry) as Arc<dyn ExtensionRegistryPort>,
		Arc::clone(&event_bus) as Arc<dyn EventBusPort>,
	)
	.await;

	let image_repository: Arc<dyn host_core_ports::ImageRepositoryPort> = Arc::new(EmptyImageRepository);

	let orchestrator_config = OrchestratorConfig::new(config.installed_extensions_dir.clone())
		.with_built_in_extensions_dir(config.built_in_extensions_dir.clone())
		.with_shared_models_dir(config.shared_models_dir.clone())
		.with_web_services_base_url(config.web_services_base_url.clone());

	let orchestrator = Orchestrator::new(
		credential_store as Arc<dyn CredentialStorePort>,
		Arc::clone(&extension_registry) as Arc<dyn ExtensionRegistryPort>,
		Arc::clone(&event_bus) as Arc<dyn EventBusPort>,
		Arc::clone(&process_supervisor) as Arc<dyn ProcessSupervisorPort>,
		image_repository,
		orchestrator_config,
	);

	process_supervisor.start(config.web_services_base_url.clone()).await.map_err(|e| host_commons::HostError::Generic {
		message: format!("failed to start process supervisor: {e}"),
		source: None,
	})?;

	install_built_in_extensions(&orchestrator, &extension_registry, &config.built_in_extensions_dir).await;

	info!("extension host ready");
	tokio::signal::ctrl_c().await.map_err(|e| host_commons::HostError::Io {
		source: e,
		context: Some("waiting for shutdown signal".to_string()),
	})?;

	info!("extension host shutting down");
	process_supervisor.stop().await.map_err(|e| host_commons::HostError::Generic {
		message: format!("failed to stop process supervisor cleanly: {e}"),
		source: None,
	})?;

	Ok(())
}

#[tokio::main]
async fn main() {
	if let Err(e) = run().await {
		error!("extension host failed: {e}");
		std::process::exit(1);
	}
}
