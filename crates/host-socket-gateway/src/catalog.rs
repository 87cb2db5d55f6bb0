//! The closed set of bus event names the gateway wires outbound routing
//! for (external interfaces, §6), and the per-extension subscribed-event
//! computation from §4.D step 2.

use std::collections::HashSet;

use host_core_ports::{InstructionsEntry, ManifestEvent};

/// Every bus event name the gateway subscribes to at construction.
///
/// `process.started` is deliberately excluded: the mapping table notes it
/// is "synthesized from supervisor, not delivered" — it drives the
/// supervisor's launch decision but never crosses the socket as an event.
pub(crate) const CATALOG: &[&str] = &[
	"process.runCommand",
	"extension.settings",
	"extension.installed",
	"extension.updated",
	"extension.uninstalled",
	"extension.error",
	"extension.acknowledgment",
	"extension.process",
	"extension.process.stopped",
	"image.created",
	"image.updated",
	"image.deleted",
	"image.computeFeatures",
	"image.computeEmbeddings",
	"image.computeTags",
	"image.runCommand",
	"text.computeEmbeddings",
];

/// The union of an extension's declared manifest events, mapped to bus
/// event names, plus `extension.settings` implicitly (§4.D step 2).
pub(crate) fn subscribed_events(instructions: &[InstructionsEntry]) -> HashSet<String> {
	let mut names: HashSet<String> = instructions
		.iter()
		.flat_map(|entry| entry.events.iter())
		.filter(|event| **event != ManifestEvent::ProcessStarted)
		.map(|event| event.bus_event_name().to_string())
		.collect();
	names.insert("extension.settings".to_string());
	names
}

#[cfg(test)]
mod tests {
	use super::*;
	use host_core_ports::ExecutionTemplate;

	fn entry(events: Vec<ManifestEvent>) -> InstructionsEntry {
		InstructionsEntry {
			events,
			capabilities: vec![],
			throttling_policies: vec![],
			execution: ExecutionTemplate {
				executable: "true".to_string(),
				arguments: vec![],
			},
			commands: vec![],
		}
	}

	#[test]
	fn subscribed_events_always_includes_extension_settings() {
		let names = subscribed_events(&[entry(vec![ManifestEvent::ImageCreated])]);
		assert!(names.contains("extension.settings"));
		assert!(names.contains("image.created"));
	}

	#[test]
	fn process_started_is_never_in_the_subscribed_set() {
		let names = subscribed_events(&[entry(vec![ManifestEvent::ProcessStarted, ManifestEvent::ProcessRunCommand])]);
		assert!(!names.contains("process.started"));
		assert!(names.contains("process.runCommand"));
	}

	#[test]
	fn multiple_instructions_entries_union_their_events() {
		let names = subscribed_events(&[entry(vec![ManifestEvent::ImageCreated]), entry(vec![ManifestEvent::ImageDeleted])]);
		assert!(names.contains("image.created"));
		assert!(names.contains("image.deleted"));
	}
}
