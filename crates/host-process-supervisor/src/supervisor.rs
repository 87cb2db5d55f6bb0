//! `ProcessSupervisor`: the in-process implementation of
//! `ProcessSupervisorPort` (Component E, §4.E).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use host_commons::debug::duck;
use host_core_ports::ports::{CredentialStorePort, EventBusPort, ExtensionRegistryPort, ProcessSupervisorPort, Result};
use host_core_ports::{BusEventName, Extension, ExtensionId, ExtensionStatus, ManifestEvent, PortError};
use serde_json::{json, Value};
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use crate::child::{spawn_supervised, ExitOutcome};
use crate::config::SupervisorConfig;
use crate::types::{ProcessStatus, SupervisorState};
use crate::variables::{build_command, LaunchVariables};

const RESPAWN_BACKOFF: Duration = Duration::from_millis(500);

async fn emit_process_event(event_bus: &Arc<dyn EventBusPort>, extension_id: &ExtensionId, status: ProcessStatus) {
	event_bus
		.emit(
			&BusEventName::new("extension", "process", None),
			json!({"status": status.as_str()}),
			Some(extension_id.as_str()),
		)
		.await;
}

async fn emit_error_event(event_bus: &Arc<dyn EventBusPort>, extension_id: &ExtensionId, message: &str) {
	event_bus
		.emit(
			&BusEventName::new("extension", "error", None),
			json!({"message": message}),
			Some(extension_id.as_str()),
		)
		.await;
}

/// Increments the consecutive-exit counter; returns `true` once the
/// restart cap has been hit, after publishing the fatal `extension.error`.
async fn record_unintended_exit(
	restart_counts: &Arc<RwLock<HashMap<ExtensionId, u32>>>,
	event_bus: &Arc<dyn EventBusPort>,
	extension_id: &ExtensionId,
	restart_limit: u32,
) -> bool {
	let count = {
		let mut counts = restart_counts.write().await;
		let count = counts.entry(extension_id.clone()).or_insert(0);
		*count += 1;
		*count
	};
	let hit_cap = count >= restart_limit;
	if hit_cap {
		emit_error_event(event_bus, extension_id, "restart cap reached, no further restarts until pause/resume").await;
	}
	hit_cap
}

/// A long-lived child's supervising task plus the means to stop it.
struct RunningChild {
	stop_requested: Arc<AtomicBool>,
	current_stop_signal: Arc<RwLock<Arc<Notify>>>,
	task: JoinHandle<()>,
}

impl RunningChild {
	async fn request_stop(&self) {
		self.stop_requested.store(true, Ordering::SeqCst);
		self.current_stop_signal.read().await.notify_one();
	}
}

/// Owns every supervised extension child process (Component E). Its own
/// lifecycle (`Stopped -> Starting -> Started -> Stopping -> Stopped`) is
/// independent of any individual child's.
pub struct ProcessSupervisor {
	state: RwLock<SupervisorState>,
	web_services_base_url: RwLock<Option<String>>,
	config: SupervisorConfig,
	credential_store: Arc<dyn CredentialStorePort>,
	extension_registry: Arc<dyn ExtensionRegistryPort>,
	event_bus: Arc<dyn EventBusPort>,
	long_lived: RwLock<HashMap<(ExtensionId, usize), RunningChild>>,
	restart_counts: Arc<RwLock<HashMap<ExtensionId, u32>>>,
}

impl ProcessSupervisor {
	#[must_use]
	pub fn new(
		config: SupervisorConfig,
		credential_store: Arc<dyn CredentialStorePort>,
		extension_registry: Arc<dyn ExtensionRegistryPort>,
		event_bus: Arc<dyn EventBusPort>,
	) -> Self {
		Self {
			state: RwLock::new(SupervisorState::Stopped),
			web_services_base_url: RwLock::new(None),
			config,
			credential_store,
			extension_registry,
			event_bus,
			long_lived: RwLock::new(HashMap::new()),
			restart_counts: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	async fn require_state(&self, expected: SupervisorState) -> Result<()> {
		let current = *self.state.read().await;
		if current == expected {
			Ok(())
		} else {
			Err(PortError::SupervisorState {
				message: format!("command requires supervisor state {expected}, currently {current}"),
			})
		}
	}

	async fn launch_variables(&self, extension: &Extension) -> Result<LaunchVariables> {
		let api_key = self.credential_store.current_key(extension.id()).await.ok_or_else(|| PortError::SupervisorState {
			message: format!("no API key registered for extension '{}'", extension.id()),
		})?;
		let web_services_base_url = self.web_services_base_url.read().await.clone().unwrap_or_default();
		Ok(LaunchVariables {
			extension_id: extension.id().to_string(),
			api_key,
			web_services_base_url,
			extension_directory_path: extension.install_directory.display().to_string(),
			image_id: None,
			image_url: None,
		})
	}

	/// Spawns the supervising loop for one `process.started` instructions
	/// entry, if it isn't already running.
	async fn spawn_long_lived(&self, extension: &Extension, entry_index: usize) -> Result<()> {
		let key = (extension.id().clone(), entry_index);
		if self.long_lived.read().await.contains_key(&key) {
			return Ok(());
		}

		let entry = extension
			.manifest
			.instructions
			.get(entry_index)
			.ok_or_else(|| PortError::validation_field("entryIndex", "no such instructions entry"))?
			.clone();
		let vars = self.launch_variables(extension).await?;
		let runtime_paths = self.config.runtime_paths.clone();
		let working_directory = extension.install_directory.clone();
		let grace = self.config.stop_grace;
		let restart_limit = self.config.restart_limit;

		let stop_requested = Arc::new(AtomicBool::new(false));
		let current_stop_signal = Arc::new(RwLock::new(Arc::new(Notify::new())));
		let stop_requested_for_task = stop_requested.clone();
		let current_stop_signal_for_task = current_stop_signal.clone();
		let event_bus = self.event_bus.clone();
		let restart_counts = self.restart_counts.clone();
		let extension_id = extension.id().clone();

		let task = tokio::spawn(async move {
			loop {
				if stop_requested_for_task.load(Ordering::SeqCst) {
					break;
				}
				let command = build_command(&entry.execution, &vars, &runtime_paths, &working_directory);
				let spawned = spawn_supervised(command, grace);
				let (join, stop_signal) = match spawned {
					Ok(pair) => pair,
					Err(e) => {
						emit_error_event(&event_bus, &extension_id, &format!("launch failed: {e}")).await;
						if record_unintended_exit(&restart_counts, &event_bus, &extension_id, restart_limit).await {
							break;
						}
						tokio::time::sleep(RESPAWN_BACKOFF).await;
						continue;
					}
				};
				*current_stop_signal_for_task.write().await = stop_signal;
				emit_process_event(&event_bus, &extension_id, ProcessStatus::Started).await;

				let outcome = join.await.unwrap_or(ExitOutcome::WaitFailed("supervising task panicked".to_string()));
				if !outcome.is_unintended() {
					break;
				}

				emit_process_event(&event_bus, &extension_id, ProcessStatus::Error).await;
				if record_unintended_exit(&restart_counts, &event_bus, &extension_id, restart_limit).await {
					break;
				}
				tokio::time::sleep(RESPAWN_BACKOFF).await;
			}
			emit_process_event(&event_bus, &extension_id, ProcessStatus::Stopped).await;
		});

		self.long_lived.write().await.insert(
			key,
			RunningChild {
				stop_requested,
				current_stop_signal,
				task,
			},
		);
		Ok(())
	}

	async fn stop_children_matching(&self, predicate: impl Fn(&ExtensionId) -> bool) {
		let removed: Vec<RunningChild> = {
			let mut long_lived = self.long_lived.write().await;
			let keys: Vec<_> = long_lived.keys().filter(|(id, _)| predicate(id)).cloned().collect();
			keys.into_iter().filter_map(|key| long_lived.remove(&key)).collect()
		};

		for child in removed {
			child.request_stop().await;
			let _ = tokio::time::timeout(self.config.stop_grace + Duration::from_secs(1), child.task).await;
		}
	}

	/// Spawns one short-lived child resolving `imageId`/`imageUrl`, fire
	/// and forget, logging (and republishing as `extension.error`) a
	/// nonzero exit.
	async fn spawn_short_lived(&self, extension: &Extension, entry_index: usize, image_id: Option<String>, image_url: Option<String>) -> Result<()> {
		let entry = extension
			.manifest
			.instructions
			.get(entry_index)
			.ok_or_else(|| PortError::validation_field("entryIndex", "no such instructions entry"))?
			.clone();
		let mut vars = self.launch_variables(extension).await?;
		vars.image_id = image_id;
		vars.image_url = image_url;
		let runtime_paths = self.config.runtime_paths.clone();
		let working_directory = extension.install_directory.clone();
		let grace = self.config.stop_grace;
		let event_bus = self.event_bus.clone();
		let extension_id = extension.id().clone();

		let command = build_command(&entry.execution, &vars, &runtime_paths, &working_directory);
		let (join, _stop_signal) = spawn_supervised(command, grace).map_err(|e| PortError::SupervisorState {
			message: format!("short-lived launch failed for '{extension_id}': {e}"),
		})?;

		tokio::spawn(async move {
			if let ExitOutcome::ExitedWithCode(code) = join.await.unwrap_or(ExitOutcome::WaitFailed("join error".to_string())) {
				if code != Some(0) {
					emit_error_event(&event_bus, &extension_id, &format!("short-lived process exited with code {code:?}")).await;
				}
			}
		});
		Ok(())
	}
}

#[async_trait]
impl ProcessSupervisorPort for ProcessSupervisor {
	async fn start(&self, web_services_base_url: String) -> Result<()> {
		self.require_state(SupervisorState::Stopped).await?;
		*self.state.write().await = SupervisorState::Starting;
		*self.web_services_base_url.write().await = Some(web_services_base_url);
		*self.state.write().await = SupervisorState::Started;
		duck!("process supervisor started");
		Ok(())
	}

	async fn stop(&self) -> Result<()> {
		self.require_state(SupervisorState::Started).await?;
		*self.state.write().await = SupervisorState::Stopping;
		self.stop_children_matching(|_| true).await;
		self.restart_counts.write().await.clear();
		*self.state.write().await = SupervisorState::Stopped;
		Ok(())
	}

	async fn start_processes(&self, extensions: &[Extension]) -> Result<()> {
		self.require_state(SupervisorState::Started).await?;
		for extension in extensions {
			for (index, entry) in extension.manifest.instructions.iter().enumerate() {
				if entry.is_long_lived() {
					self.spawn_long_lived(extension, index).await?;
				}
			}
		}
		Ok(())
	}

	async fn stop_processes(&self, extension_ids: &[ExtensionId]) -> Result<()> {
		self.require_state(SupervisorState::Started).await?;
		let ids: std::collections::HashSet<_> = extension_ids.iter().collect();
		self.stop_children_matching(|id| ids.contains(id)).await;
		Ok(())
	}

	async fn on_image_event(&self, event_name: &BusEventName, payload: Value) -> Result<()> {
		self.require_state(SupervisorState::Started).await?;

		let Some(manifest_event) = [
			ManifestEvent::ImageCreated,
			ManifestEvent::ImageUpdated,
			ManifestEvent::ImageDeleted,
			ManifestEvent::ImageComputeFeatures,
			ManifestEvent::ImageComputeEmbeddings,
			ManifestEvent::ImageComputeTags,
			ManifestEvent::ImageRunCommand,
		]
		.into_iter()
		.find(|candidate| candidate.bus_event_name() == event_name.as_str()) else {
			return Ok(());
		};

		let image_id = payload.get("imageId").and_then(Value::as_str).map(str::to_string);
		let image_url = if manifest_event == ManifestEvent::ImageDeleted {
			None
		} else {
			payload.get("imageUrl").and_then(Value::as_str).map(str::to_string)
		};

		let extensions = self.extension_registry.list().await?;
		for extension in &extensions {
			if extension.status != ExtensionStatus::Enabled {
				continue;
			}
			let is_short_lived = !extension.manifest.instructions.iter().any(host_core_ports::InstructionsEntry::is_long_lived);
			if !is_short_lived {
				continue;
			}
			for (index, entry) in extension.manifest.instructions.iter().enumerate() {
				if entry.events.contains(&manifest_event) {
					self.spawn_short_lived(extension, index, image_id.clone(), image_url.clone()).await?;
				}
			}
		}
		Ok(())
	}

	async fn reset_restart_counter(&self, extension_id: &ExtensionId) {
		self.restart_counts.write().await.remove(extension_id);
	}
}
