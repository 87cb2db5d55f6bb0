//! `install` / `update` / `uninstall` / `pauseOrResume` (§4.F): the
//! extension lifecycle state machine. Filesystem side effects route
//! through `host_extension_registry::persist` directly, since nothing in
//! `ExtensionRegistryPort`'s signature needs a filesystem path.

use host_core_ports::ports::Result;
use host_core_ports::{
	BusEventName, EventBusPort, Extension, ExtensionId, ExtensionRegistryPort, ExtensionStatus, ImageRepositoryPort, PortError,
	ProcessSupervisorPort,
};
use host_extension_registry::persist::{self, ParametersFile};
use serde_json::json;

use crate::config::OrchestratorConfig;

fn reject_oversized(archive_bytes: &[u8], max_archive_bytes: usize) -> Result<()> {
	if archive_bytes.len() > max_archive_bytes {
		return Err(PortError::validation_field(
			"archive",
			format!("extension archive of {} bytes exceeds the {max_archive_bytes}-byte limit", archive_bytes.len()),
		));
	}
	Ok(())
}

#[cfg(unix)]
async fn link_shared_cache(install_directory: &std::path::Path, shared_models_dir: &std::path::Path) -> Result<()> {
	persist::ensure_cache_symlink(install_directory, shared_models_dir).await.map_err(PortError::from)
}

#[cfg(not(unix))]
async fn link_shared_cache(_install_directory: &std::path::Path, _shared_models_dir: &std::path::Path) -> Result<()> {
	Ok(())
}

/// Installs a new extension from an archive (§4.F `install`).
///
/// # Errors
/// Returns a validation error for an oversized archive, a malformed
/// manifest, or a duplicate extension id.
pub async fn install(
	extension_registry: &dyn ExtensionRegistryPort,
	credential_store: &dyn host_core_ports::CredentialStorePort,
	process_supervisor: &dyn ProcessSupervisorPort,
	event_bus: &dyn EventBusPort,
	config: &OrchestratorConfig,
	archive_bytes: &[u8],
) -> Result<Extension> {
	reject_oversized(archive_bytes, config.max_archive_bytes)?;
	let manifest = extension_registry.validate_archive(archive_bytes).await?;

	if extension_registry.get(&manifest.id).await.is_ok() {
		return Err(PortError::validation_field("id", format!("extension '{}' is already installed", manifest.id)));
	}

	let install_directory = persist::extract_extension(&config.paths.installed_extensions_dir, manifest.id.as_str(), archive_bytes)
		.await
		.map_err(PortError::from)?;
	link_shared_cache(&install_directory, &config.paths.shared_models_dir).await?;

	let api_key = credential_store.register_extension_key(&manifest.id).await;
	persist::write_parameters_file(
		&install_directory,
		&ParametersFile {
			extension_id: manifest.id.to_string(),
			web_services_base_url: config.web_services_base_url.clone(),
			api_key,
		},
	)
	.await
	.map_err(PortError::from)?;

	let extension = Extension {
		manifest,
		status: ExtensionStatus::Enabled,
		install_directory,
		is_built_in: false,
		activity: host_core_ports::ExtensionActivity::Connecting,
	};
	extension_registry.upsert(extension.clone()).await?;

	event_bus
		.emit(&BusEventName::new("extension", "installed", None), json!({"extensionId": extension.id().to_string()}), None)
		.await;

	process_supervisor.reset_restart_counter(extension.id()).await;
	process_supervisor.start_processes(std::slice::from_ref(&extension)).await?;

	Ok(extension)
}

/// Replaces an installed extension's code with a new archive (§4.F `update`).
///
/// # Errors
/// Returns a validation error for an oversized archive, a malformed
/// manifest, a manifest id mismatching the path id, or an unknown
/// extension id.
pub async fn update(
	extension_registry: &dyn ExtensionRegistryPort,
	credential_store: &dyn host_core_ports::CredentialStorePort,
	process_supervisor: &dyn ProcessSupervisorPort,
	event_bus: &dyn EventBusPort,
	config: &OrchestratorConfig,
	extension_id: &ExtensionId,
	archive_bytes: &[u8],
) -> Result<Extension> {
	reject_oversized(archive_bytes, config.max_archive_bytes)?;
	let manifest = extension_registry.validate_archive(archive_bytes).await?;
	if manifest.id != *extension_id {
		return Err(PortError::validation_field(
			"id",
			format!("archive manifest id '{}' does not match '{extension_id}'", manifest.id),
		));
	}

	let existing = extension_registry.get(extension_id).await?;
	process_supervisor.stop_processes(std::slice::from_ref(extension_id)).await?;

	let install_directory = persist::extract_extension(&config.paths.installed_extensions_dir, extension_id.as_str(), archive_bytes)
		.await
		.map_err(PortError::from)?;
	link_shared_cache(&install_directory, &config.paths.shared_models_dir).await?;

	let api_key = credential_store.register_extension_key(extension_id).await;
	persist::write_parameters_file(
		&install_directory,
		&ParametersFile {
			extension_id: extension_id.to_string(),
			web_services_base_url: config.web_services_base_url.clone(),
			api_key,
		},
	)
	.await
	.map_err(PortError::from)?;

	let extension = Extension {
		manifest,
		status: existing.status,
		install_directory,
		is_built_in: existing.is_built_in,
		activity: host_core_ports::ExtensionActivity::Connecting,
	};
	extension_registry.upsert(extension.clone()).await?;

	event_bus
		.emit(&BusEventName::new("extension", "updated", None), json!({"extensionId": extension.id().to_string()}), None)
		.await;

	process_supervisor.reset_restart_counter(extension.id()).await;
	if extension.status == ExtensionStatus::Enabled {
		process_supervisor.start_processes(std::slice::from_ref(&extension)).await?;
	}

	Ok(extension)
}

/// Removes an extension and all of its owned data (§4.F `uninstall`).
///
/// # Errors
/// Returns a validation error if the extension id is unknown.
pub async fn uninstall(
	extension_registry: &dyn ExtensionRegistryPort,
	credential_store: &dyn host_core_ports::CredentialStorePort,
	process_supervisor: &dyn ProcessSupervisorPort,
	image_repository: &dyn ImageRepositoryPort,
	event_bus: &dyn EventBusPort,
	extension_id: &ExtensionId,
) -> Result<()> {
	let extension = extension_registry.get(extension_id).await?;
	process_supervisor.stop_processes(std::slice::from_ref(extension_id)).await?;
	process_supervisor.reset_restart_counter(extension_id).await;

	tokio::fs::remove_dir_all(&extension.install_directory).await.map_err(|e| PortError::Persistence {
		operation: "remove_dir_all".to_string(),
		message: e.to_string(),
	})?;

	credential_store.unregister(extension_id).await;
	image_repository.delete_extension_data(extension_id).await?;
	extension_registry.remove(extension_id).await?;

	event_bus
		.emit(&BusEventName::new("extension", "uninstalled", None), json!({"extensionId": extension_id.to_string()}), None)
		.await;

	Ok(())
}

/// Transitions an extension's `status` between `Enabled` and `Paused`
/// (§4.F `pauseOrResume`). Pausing stops its processes; resuming starts
/// them again and triggers a `synchronize`.
///
/// # Errors
/// Returns a validation error if the extension id is unknown.
pub async fn pause_or_resume(
	extension_registry: &dyn ExtensionRegistryPort,
	process_supervisor: &dyn ProcessSupervisorPort,
	image_repository: &dyn ImageRepositoryPort,
	event_bus: &dyn EventBusPort,
	throttle_gate: &crate::throttle::ThrottleGate,
	extension_id: &ExtensionId,
	paused: bool,
) -> Result<()> {
	let mut extension = extension_registry.get(extension_id).await?;
	extension.status = if paused { ExtensionStatus::Paused } else { ExtensionStatus::Enabled };
	extension_registry.upsert(extension.clone()).await?;

	if paused {
		process_supervisor.stop_processes(std::slice::from_ref(extension_id)).await?;
	} else {
		process_supervisor.start_processes(std::slice::from_ref(&extension)).await?;
		crate::synchronize::synchronize(extension_registry, image_repository, event_bus, throttle_gate, extension_id).await?;
	}
	process_supervisor.reset_restart_counter(extension_id).await;

	Ok(())
}
