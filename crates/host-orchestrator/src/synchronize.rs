//! `synchronize(id)` (§4.F): re-emits, for every image in every
//! repository, the image events the extension subscribes to — excluding
//! events that would be a no-op given the extension's current
//! capability/command declarations.

use std::collections::HashSet;

use host_core_ports::ports::Result;
use host_core_ports::{BusEventName, Capability, CommandEntity, Extension, EventBusPort, ExtensionId, ExtensionRegistryPort, ExtensionStatus, ImageRepositoryPort, ManifestEvent};
use serde_json::json;

use crate::throttle::ThrottleGate;

/// The image-domain manifest events eligible for per-image fan-out at
/// all; `text.computeEmbeddings` operates on text, not images, and
/// `process.*`/`extension.*` events aren't image-scoped either.
const IMAGE_DOMAIN_EVENTS: &[ManifestEvent] = &[
	ManifestEvent::ImageCreated,
	ManifestEvent::ImageUpdated,
	ManifestEvent::ImageDeleted,
	ManifestEvent::ImageComputeFeatures,
	ManifestEvent::ImageComputeEmbeddings,
	ManifestEvent::ImageComputeTags,
	ManifestEvent::ImageRunCommand,
];

/// Whether re-emitting `event` to `extension` would be a no-op given its
/// current capability/command declarations.
fn is_eligible(extension: &Extension, event: ManifestEvent) -> bool {
	match event {
		ManifestEvent::ImageCreated | ManifestEvent::ImageUpdated | ManifestEvent::ImageDeleted => true,
		ManifestEvent::ImageComputeFeatures => declares_capability(extension, Capability::ImageFeatures),
		ManifestEvent::ImageComputeEmbeddings => declares_capability(extension, Capability::ImageEmbeddings),
		ManifestEvent::ImageComputeTags => declares_capability(extension, Capability::ImageTags),
		ManifestEvent::ImageRunCommand => declares_image_scoped_command(extension),
		_ => false,
	}
}

fn declares_capability(extension: &Extension, capability: Capability) -> bool {
	extension
		.manifest
		.instructions
		.iter()
		.any(|entry| entry.capabilities.contains(&capability))
}

fn declares_image_scoped_command(extension: &Extension) -> bool {
	extension
		.manifest
		.instructions
		.iter()
		.flat_map(|entry| &entry.commands)
		.any(|command| matches!(command.on.entity, CommandEntity::Image | CommandEntity::Images))
}

fn subscribed_image_events(extension: &Extension) -> HashSet<ManifestEvent> {
	extension
		.manifest
		.instructions
		.iter()
		.flat_map(|entry| entry.events.iter().copied())
		.filter(|event| IMAGE_DOMAIN_EVENTS.contains(event))
		.collect()
}

/// Re-emits every eligible subscribed image event for every image in
/// every repository, subject to the same throttle windows as live traffic
/// (§4.F "Throttling" governs every delivery, replayed or not).
///
/// # Errors
/// Returns [`host_core_ports::PortError::Validation`] if the extension is
/// currently paused.
pub async fn synchronize(
	extension_registry: &dyn ExtensionRegistryPort,
	image_repository: &dyn ImageRepositoryPort,
	event_bus: &dyn EventBusPort,
	throttle_gate: &ThrottleGate,
	extension_id: &ExtensionId,
) -> Result<()> {
	let extension = extension_registry.get(extension_id).await?;
	if extension.status == ExtensionStatus::Paused {
		return Err(host_core_ports::PortError::validation(format!(
			"extension '{extension_id}' is paused"
		)));
	}

	let events: Vec<ManifestEvent> = subscribed_image_events(&extension)
		.into_iter()
		.filter(|event| is_eligible(&extension, *event))
		.collect();
	if events.is_empty() {
		return Ok(());
	}

	let images = image_repository.list_images().await?;
	for event in events {
		let bus_event_name = BusEventName::from_literal(event.bus_event_name());
		let policy = crate::commands::throttling_policy_for(&extension, event);
		for image in &images {
			if let Some(policy) = policy {
				throttle_gate.acquire(extension_id, event, policy).await;
			}
			event_bus
				.emit(
					&bus_event_name,
					json!({"imageId": image.id, "repositoryId": image.repository_id}),
					Some(extension_id.as_str()),
				)
				.await;
			if policy.is_some() {
				throttle_gate.notify_slot_released();
			}
		}
	}
	Ok(())
}
