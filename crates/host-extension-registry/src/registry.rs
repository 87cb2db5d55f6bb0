//! In-memory `ExtensionRegistryPort` implementation: validation, lookup,
//! and the insertion-ordered extension table (§4.B).

use std::collections::HashMap;

use async_trait::async_trait;
use host_commons::debug::duck;
use host_core_ports::ports::{ExtensionRegistryPort, Result};
use host_core_ports::{Capability, Extension, ExtensionActivity, ExtensionId, Manifest, PortError};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::archive;
use crate::manifest::parse_and_validate;

/// Process-wide table of installed extensions, insertion order preserved.
pub struct ExtensionRegistry {
	extensions: RwLock<HashMap<ExtensionId, Extension>>,
	order: RwLock<Vec<ExtensionId>>,
}

impl ExtensionRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self {
			extensions: RwLock::new(HashMap::new()),
			order: RwLock::new(Vec::new()),
		}
	}
}

impl Default for ExtensionRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ExtensionRegistryPort for ExtensionRegistry {
	async fn validate_archive(&self, archive_bytes: &[u8]) -> Result<Manifest> {
		let contents = archive::inspect(archive_bytes).map_err(|e| PortError::validation(e.to_string()))?;
		parse_and_validate(&contents).map_err(PortError::validation)
	}

	async fn upsert(&self, extension: Extension) -> Result<()> {
		let id = extension.id().clone();
		let mut extensions = self.extensions.write().await;
		let mut order = self.order.write().await;
		if !extensions.contains_key(&id) {
			order.push(id.clone());
		}
		extensions.insert(id.clone(), extension);
		duck!("registered extension {}", id);
		Ok(())
	}

	async fn set_activity(&self, extension_id: &ExtensionId, activity: ExtensionActivity) -> Result<()> {
		let mut extensions = self.extensions.write().await;
		let extension = extensions
			.get_mut(extension_id)
			.ok_or_else(|| PortError::validation_field("extensionId", format!("unknown extension '{extension_id}'")))?;
		extension.activity = activity;
		Ok(())
	}

	async fn remove(&self, extension_id: &ExtensionId) -> Result<()> {
		let mut extensions = self.extensions.write().await;
		if extensions.remove(extension_id).is_none() {
			return Err(PortError::validation_field("extensionId", format!("unknown extension '{extension_id}'")));
		}
		self.order.write().await.retain(|id| id != extension_id);
		Ok(())
	}

	async fn get(&self, extension_id: &ExtensionId) -> Result<Extension> {
		self.extensions
			.read()
			.await
			.get(extension_id)
			.cloned()
			.ok_or_else(|| PortError::validation_field("extensionId", format!("unknown extension '{extension_id}'")))
	}

	async fn find_by_capability(&self, capability: Capability) -> Result<Vec<Extension>> {
		let extensions = self.extensions.read().await;
		let order = self.order.read().await;
		Ok(order
			.iter()
			.filter_map(|id| extensions.get(id))
			.filter(|extension| extension.status == host_core_ports::ExtensionStatus::Enabled)
			.filter(|extension| extension.activity == host_core_ports::ExtensionActivity::Connected)
			.filter(|extension| {
				extension
					.manifest
					.instructions
					.iter()
					.any(|entry| entry.capabilities.contains(&capability))
			})
			.cloned()
			.collect())
	}

	async fn find_by_command(&self, command_id: &str) -> Result<Vec<Extension>> {
		let extensions = self.extensions.read().await;
		let order = self.order.read().await;
		Ok(order
			.iter()
			.filter_map(|id| extensions.get(id))
			.filter(|extension| {
				extension
					.manifest
					.instructions
					.iter()
					.any(|entry| entry.commands.iter().any(|command| command.id == command_id))
			})
			.cloned()
			.collect())
	}

	async fn get_configuration(&self) -> Result<Value> {
		let extensions = self.extensions.read().await;
		let order = self.order.read().await;

		let mut by_capability: HashMap<Capability, Vec<String>> = HashMap::new();
		let mut commands_by_extension: HashMap<String, Vec<String>> = HashMap::new();

		for id in order.iter() {
			let Some(extension) = extensions.get(id) else { continue };
			let mut command_ids = Vec::new();
			for entry in &extension.manifest.instructions {
				for capability in &entry.capabilities {
					by_capability.entry(*capability).or_default().push(id.to_string());
				}
				for command in &entry.commands {
					command_ids.push(command.id.clone());
				}
			}
			command_ids.sort();
			commands_by_extension.insert(id.to_string(), command_ids);
		}

		let mut capability_json = serde_json::Map::new();
		let mut capability_keys: Vec<Capability> = by_capability.keys().copied().collect();
		capability_keys.sort_by_key(|c| c.dispatch_event_name());
		for capability in capability_keys {
			let mut ids = by_capability.remove(&capability).unwrap_or_default();
			ids.sort();
			capability_json.insert(capability.dispatch_event_name().to_string(), json!(ids));
		}

		Ok(json!({
			"capabilities": capability_json,
			"commands": commands_by_extension,
		}))
	}

	async fn list(&self) -> Result<Vec<Extension>> {
		let extensions = self.extensions.read().await;
		let order = self.order.read().await;
		Ok(order.iter().filter_map(|id| extensions.get(id)).cloned().collect())
	}
}
