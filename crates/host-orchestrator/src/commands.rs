//! `runCapability` / `runProcessCommand` / `runImageCommand` (§4.F): the
//! three request/response dispatches. Each finds the target extension,
//! validates the call against the extension's own manifest, waits for a
//! throttle slot if one of the extension's policies governs the event,
//! and resolves the delivery through `EventBusPort::emit_with_result`.

use host_core_ports::ports::Result;
use host_core_ports::{
	BusEventName, Capability, Command, CommandEntity, EventBusPort, Extension, ExtensionId, ExtensionRegistryPort, ImageRepositoryPort,
	ManifestEvent, PortError,
};
use host_ipc_protocol::CompiledSchema;
use serde_json::Value;

use crate::throttle::ThrottleGate;

fn find_command<'a>(extension: &'a Extension, command_id: &str) -> Result<&'a Command> {
	extension
		.manifest
		.instructions
		.iter()
		.flat_map(|entry| &entry.commands)
		.find(|command| command.id == command_id)
		.ok_or_else(|| PortError::validation_field("commandId", format!("unknown command '{command_id}'")))
}

fn validate_parameters(command: &Command, parameters: &Value) -> Result<()> {
	let Some(schema) = &command.parameters else {
		return Ok(());
	};
	let compiled = CompiledSchema::compile_closed(schema).map_err(|e| PortError::validation(e.to_string()))?;
	compiled.validate(parameters).map_err(|e| PortError::validation(e.to_string()))
}

pub(crate) fn throttling_policy_for(extension: &Extension, event: ManifestEvent) -> Option<&host_core_ports::ThrottlingPolicy> {
	extension
		.manifest
		.instructions
		.iter()
		.flat_map(|entry| &entry.throttling_policies)
		.find(|policy| policy.events.contains(&event))
}

fn capability_manifest_event(capability: Capability) -> ManifestEvent {
	match capability {
		Capability::ImageFeatures => ManifestEvent::ImageComputeFeatures,
		Capability::ImageEmbeddings => ManifestEvent::ImageComputeEmbeddings,
		Capability::ImageTags => ManifestEvent::ImageComputeTags,
		Capability::TextEmbeddings => ManifestEvent::TextComputeEmbeddings,
	}
}

fn capability_id(capability: Capability) -> String {
	serde_json::to_value(capability)
		.ok()
		.and_then(|value| value.as_str().map(str::to_string))
		.unwrap_or_else(|| format!("{capability:?}"))
}

/// Dispatches a capability call to the first enabled+connected extension
/// declaring it.
///
/// # Errors
/// Returns [`PortError::CapabilityUnavailable`] when no candidate
/// declares the capability.
pub async fn run_capability(
	extension_registry: &dyn ExtensionRegistryPort,
	event_bus: &dyn EventBusPort,
	throttle_gate: &ThrottleGate,
	capability: Capability,
	payload: Value,
) -> Result<Value> {
	let candidates = extension_registry.find_by_capability(capability).await?;
	let extension = candidates.into_iter().next().ok_or_else(|| PortError::CapabilityUnavailable {
		capability: capability_id(capability),
	})?;

	let event = capability_manifest_event(capability);
	if let Some(policy) = throttling_policy_for(&extension, event) {
		throttle_gate.acquire(extension.id(), event, policy).await;
	}

	let result = event_bus
		.emit_with_result(&BusEventName::from_literal(capability.dispatch_event_name()), payload, Some(extension.id().as_str()), None)
		.await;
	throttle_gate.notify_slot_released();
	result
}

/// Runs a `Process`-scoped command on a specific extension.
///
/// # Errors
/// Returns a validation error for an unknown command, a command not
/// scoped to `Process`, or a schema-violating `parameters` value.
pub async fn run_process_command(
	extension_registry: &dyn ExtensionRegistryPort,
	event_bus: &dyn EventBusPort,
	throttle_gate: &ThrottleGate,
	extension_id: &ExtensionId,
	command_id: &str,
	parameters: Value,
) -> Result<Value> {
	let extension = extension_registry.get(extension_id).await?;
	let command = find_command(&extension, command_id)?;
	if command.on.entity != CommandEntity::Process {
		return Err(PortError::validation_field("commandId", format!("'{command_id}' is not a Process-scoped command")));
	}
	validate_parameters(command, &parameters)?;

	if let Some(policy) = throttling_policy_for(&extension, ManifestEvent::ProcessRunCommand) {
		throttle_gate.acquire(extension_id, ManifestEvent::ProcessRunCommand, policy).await;
	}

	let result = event_bus
		.emit_with_result(
			&BusEventName::from_literal("process.runCommand"),
			serde_json::json!({"commandId": command_id, "parameters": parameters}),
			Some(extension_id.as_str()),
			None,
		)
		.await;
	throttle_gate.notify_slot_released();
	result
}

/// Runs an `Images`/`Image`-scoped command against the given image ids.
///
/// # Errors
/// Returns a validation error for an unknown command, an unknown image
/// id, a single-image command invoked with more than one id, an image
/// missing a required tag, or a schema-violating `parameters` value.
pub async fn run_image_command(
	extension_registry: &dyn ExtensionRegistryPort,
	image_repository: &dyn ImageRepositoryPort,
	event_bus: &dyn EventBusPort,
	throttle_gate: &ThrottleGate,
	extension_id: &ExtensionId,
	command_id: &str,
	parameters: Value,
	image_ids: &[String],
) -> Result<Value> {
	let extension = extension_registry.get(extension_id).await?;
	let command = find_command(&extension, command_id)?;
	if !image_repository.images_exist(image_ids).await? {
		return Err(PortError::validation_field("imageIds", "one or more image ids do not exist"));
	}
	if command.on.entity == CommandEntity::Image && image_ids.len() != 1 {
		return Err(PortError::validation_field("imageIds", "a command scoped to a single Image requires exactly one image id"));
	}
	if !command.on.with_tags.is_empty() {
		for image_id in image_ids {
			let tags = image_repository.extension_tags(image_id, extension_id).await?;
			if !command.on.with_tags.iter().all(|tag| tags.contains(tag)) {
				return Err(PortError::validation_field(
					"imageIds",
					format!("image '{image_id}' is missing a tag required by command '{command_id}'"),
				));
			}
		}
	}
	validate_parameters(command, &parameters)?;

	if let Some(policy) = throttling_policy_for(&extension, ManifestEvent::ImageRunCommand) {
		throttle_gate.acquire(extension_id, ManifestEvent::ImageRunCommand, policy).await;
	}

	let result = event_bus
		.emit_with_result(
			&BusEventName::from_literal("image.runCommand"),
			serde_json::json!({"commandId": command_id, "parameters": parameters, "imageIds": image_ids}),
			Some(extension_id.as_str()),
			None,
		)
		.await;
	throttle_gate.notify_slot_released();
	result
}
