//! Validation and behavior tests for the domain types.

#[path = "factory.rs"]
mod factory;

use factory::{ExtensionIdTestFactory, InstructionsEntryTestFactory, ManifestTestFactory};
use host_core_ports::types::{
	ApiKeyEntry, BusEventName, Capability, ManifestEvent, RESTART_CAP,
};

#[test]
fn extension_id_accepts_the_documented_pattern() {
	let id = ExtensionIdTestFactory::valid();
	assert!(!id.as_str().is_empty());
}

#[test]
fn extension_id_rejects_whitespace_and_hash() {
	let candidate = ExtensionIdTestFactory::invalid();
	assert!(host_core_ports::types::ExtensionId::parse(candidate).is_err());
}

#[test]
fn extension_id_rejects_too_long_strings() {
	let too_long = "a".repeat(33);
	assert!(host_core_ports::types::ExtensionId::parse(too_long).is_err());
}

#[test]
fn manifest_event_maps_to_its_fixed_bus_name() {
	assert_eq!(ManifestEvent::ImageCreated.bus_event_name(), "image.created");
	assert_eq!(ManifestEvent::ProcessStarted.bus_event_name(), "process.started");
}

#[test]
fn capability_requires_process_started_alongside_its_compute_event() {
	let required = Capability::ImageEmbeddings.required_events();
	assert!(required.contains(&ManifestEvent::ProcessStarted));
	assert!(required.contains(&ManifestEvent::ImageComputeEmbeddings));
}

#[test]
fn instructions_entry_with_process_started_is_long_lived() {
	let entry = InstructionsEntryTestFactory::long_lived();
	assert!(entry.is_long_lived());
}

#[test]
fn instructions_entry_without_process_started_is_short_lived() {
	let entry = InstructionsEntryTestFactory::short_lived(ManifestEvent::ImageCreated);
	assert!(!entry.is_long_lived());
}

#[test]
fn bus_event_name_joins_entity_action_and_state() {
	let name = BusEventName::new("extension", "activity", Some("connected"));
	assert_eq!(name.as_str(), "extension.activity.connected");
}

#[test]
fn bus_event_name_without_state_has_two_tokens() {
	let name = BusEventName::new("image", "created", None);
	assert_eq!(name.as_str(), "image.created");
}

#[test]
fn extension_scopes_never_include_the_master_all_scope() {
	let scopes = ApiKeyEntry::extension_scopes();
	assert!(!scopes.iter().any(|s| s == ApiKeyEntry::ALL_SCOPE));
	assert!(scopes.contains(&"image:read".to_string()));
}

#[test]
fn manifest_round_trips_through_json() {
	let manifest = ManifestTestFactory::valid();
	let encoded = serde_json::to_string(&manifest).expect("manifest serializes");
	let decoded: host_core_ports::types::Manifest = serde_json::from_str(&encoded).expect("manifest deserializes");
	assert_eq!(decoded.id, manifest.id);
	assert_eq!(decoded.version, manifest.version);
}

#[test]
fn restart_cap_matches_the_documented_limit() {
	assert_eq!(RESTART_CAP, 3);
}
