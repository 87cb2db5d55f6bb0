//! Manifest schema validation and cross-field checks (§3 invariants, §4.B).

use host_core_ports::types::{Capability, CommandEntity, Manifest, ManifestEvent};
use host_ipc_protocol::{validate_is_schema, CompiledSchema};
use serde_json::{json, Value};

use crate::archive::ArchiveContents;

/// The strict manifest schema: unknown top-level and nested fields are
/// rejected, matching "unknown fields rejected by the schema" (§6).
fn manifest_schema() -> Value {
	let instructions_entry = json!({
		"type": "object",
		"additionalProperties": false,
		"required": ["events", "execution"],
		"properties": {
			"events": {"type": "array", "minItems": 1, "items": {"type": "string"}},
			"capabilities": {"type": "array", "items": {"type": "string"}},
			"throttlingPolicies": {
				"type": "array",
				"items": {
					"type": "object",
					"additionalProperties": false,
					"required": ["events", "durationMs", "maximumCount"],
					"properties": {
						"events": {"type": "array", "items": {"type": "string"}},
						"durationMs": {"type": "integer", "exclusiveMinimum": 0},
						"maximumCount": {"type": "integer", "exclusiveMinimum": 0}
					}
				}
			},
			"execution": {
				"type": "object",
				"additionalProperties": false,
				"required": ["executable", "arguments"],
				"properties": {
					"executable": {"type": "string"},
					"arguments": {"type": "array", "items": {"type": "string"}}
				}
			},
			"commands": {
				"type": "array",
				"items": {
					"type": "object",
					"additionalProperties": false,
					"required": ["id", "on", "specifications"],
					"properties": {
						"id": {"type": "string"},
						"on": {
							"type": "object",
							"additionalProperties": false,
							"required": ["entity"],
							"properties": {
								"entity": {"enum": ["Process", "Images", "Image"]},
								"withTags": {"type": "array", "items": {"type": "string"}}
							}
						},
						"parameters": {"type": "object"},
						"specifications": {
							"type": "array",
							"items": {
								"type": "object",
								"additionalProperties": false,
								"required": ["locale", "label", "description"],
								"properties": {
									"locale": {"type": "string"},
									"label": {"type": "string"},
									"description": {"type": "string"}
								}
							}
						}
					}
				}
			}
		}
	});

	json!({
		"type": "object",
		"additionalProperties": false,
		"required": ["id", "version", "name", "description", "runtimes", "instructions", "settings"],
		"properties": {
			"id": {"type": "string", "pattern": "^[A-Za-z0-9._-]{1,32}$"},
			"version": {"type": "string"},
			"name": {"type": "string"},
			"description": {"type": "string"},
			"runtimes": {
				"type": "array",
				"minItems": 1,
				"items": {"enum": ["node", "venvPython", "shell", "native"]}
			},
			"instructions": {"type": "array", "items": instructions_entry},
			"ui": {
				"type": "object",
				"additionalProperties": false,
				"properties": {
					"elements": {
						"type": "array",
						"items": {
							"type": "object",
							"additionalProperties": false,
							"required": ["anchor", "url"],
							"properties": {
								"anchor": {"type": "string"},
								"url": {"type": "string"}
							}
						}
					}
				}
			},
			"settings": {"type": "object"},
			"icon": {"type": "array", "items": {"type": "integer"}},
			"manual": {"type": "string"}
		}
	})
}

/// Parses and validates `manifest.json` against the strict schema, then
/// the cross-field invariants of §3 against the rest of the archive.
///
/// # Errors
/// Returns a single descriptive message joining every violation found,
/// matching the "single descriptive message" rule of §4.B.
pub fn parse_and_validate(contents: &ArchiveContents) -> Result<Manifest, String> {
	let raw: Value = serde_json::from_slice(&contents.manifest_bytes).map_err(|e| format!("manifest.json is not valid JSON: {e}"))?;

	let schema = CompiledSchema::compile(&manifest_schema()).expect("manifest schema is well-formed");
	schema.validate(&raw).map_err(|e| e.to_string())?;

	let manifest: Manifest = serde_json::from_value(raw).map_err(|e| format!("manifest.json does not match the manifest shape: {e}"))?;

	validate_cross_fields(&manifest, &contents.entry_paths)?;

	Ok(manifest)
}

/// Applies every cross-field invariant from §3 over an already-schema-valid manifest.
fn validate_cross_fields(manifest: &Manifest, entry_paths: &[String]) -> Result<(), String> {
	let mut problems = Vec::new();

	for entry in &manifest.instructions {
		for capability in &entry.capabilities {
			for required in capability.required_events() {
				if !entry.events.contains(required) {
					problems.push(format!(
						"capability {capability:?} requires event {required:?} to be declared in the same instructions entry"
					));
				}
			}
		}

		for command in &entry.commands {
			if command.on.entity == CommandEntity::Process
				&& !(entry.events.contains(&ManifestEvent::ProcessStarted) && entry.events.contains(&ManifestEvent::ProcessRunCommand))
			{
				problems.push(format!(
					"command '{}' on Process requires process.started and process.runCommand in the same instructions entry",
					command.id
				));
			}

			if let Some(parameters) = &command.parameters {
				if let Err(e) = validate_is_schema(parameters) {
					problems.push(format!("command '{}' parameters is not a valid JSON-schema: {e}", command.id));
				}
			}
		}

		for policy in &entry.throttling_policies {
			for event in &policy.events {
				if !entry.events.contains(event) {
					problems.push(format!("throttling policy references event {event:?} not in this instructions entry's events"));
				}
			}
		}
	}

	if let Err(e) = validate_is_schema(&manifest.settings) {
		problems.push(format!("settings is not a valid JSON-schema: {e}"));
	}

	for element in &manifest.ui.elements {
		let found = entry_paths.iter().any(|p| p == &element.url || p.ends_with(&format!("/{}", element.url)));
		if !found {
			problems.push(format!("ui element url '{}' does not resolve to a file in the archive", element.url));
		}
	}

	if problems.is_empty() {
		Ok(())
	} else {
		Err(problems.join("; "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::archive::ArchiveContents;

	fn contents(manifest_json: &str, entry_paths: &[&str]) -> ArchiveContents {
		ArchiveContents {
			manifest_bytes: manifest_json.as_bytes().to_vec(),
			entry_paths: entry_paths.iter().map(|s| (*s).to_string()).collect(),
		}
	}

	fn minimal_manifest() -> String {
		json!({
			"id": "photo-tagger",
			"version": "1.0.0",
			"name": "Photo Tagger",
			"description": "tags photos",
			"runtimes": ["node"],
			"instructions": [],
			"settings": {"type": "object"}
		})
		.to_string()
	}

	#[test]
	fn minimal_valid_manifest_parses() {
		let manifest = parse_and_validate(&contents(&minimal_manifest(), &[])).unwrap();
		assert_eq!(manifest.id.as_str(), "photo-tagger");
	}

	#[test]
	fn unknown_top_level_field_is_rejected() {
		let mut raw: Value = serde_json::from_str(&minimal_manifest()).unwrap();
		raw.as_object_mut().unwrap().insert("unexpectedField".to_string(), json!(true));
		let err = parse_and_validate(&contents(&raw.to_string(), &[])).unwrap_err();
		assert!(err.contains("additionalProperties") || !err.is_empty());
	}

	#[test]
	fn capability_without_its_required_events_is_rejected() {
		let raw = json!({
			"id": "tagger",
			"version": "1.0.0",
			"name": "Tagger",
			"description": "d",
			"runtimes": ["node"],
			"instructions": [{
				"events": ["process.started"],
				"capabilities": ["image-tags"],
				"execution": {"executable": "${node}", "arguments": []}
			}],
			"settings": {"type": "object"}
		});
		let err = parse_and_validate(&contents(&raw.to_string(), &[])).unwrap_err();
		assert!(err.contains("ImageTags") || err.contains("image.computeTags"));
	}

	#[test]
	fn command_on_process_without_sibling_events_is_rejected() {
		let raw = json!({
			"id": "runner",
			"version": "1.0.0",
			"name": "Runner",
			"description": "d",
			"runtimes": ["node"],
			"instructions": [{
				"events": ["extension.settings"],
				"execution": {"executable": "${node}", "arguments": []},
				"commands": [{
					"id": "run-it",
					"on": {"entity": "Process"},
					"specifications": [{"locale": "en", "label": "Run", "description": "d"}]
				}]
			}],
			"settings": {"type": "object"}
		});
		let err = parse_and_validate(&contents(&raw.to_string(), &[])).unwrap_err();
		assert!(err.contains("process.started"));
	}

	#[test]
	fn throttling_policy_event_outside_declared_events_is_rejected() {
		let raw = json!({
			"id": "throttled",
			"version": "1.0.0",
			"name": "Throttled",
			"description": "d",
			"runtimes": ["node"],
			"instructions": [{
				"events": ["image.created"],
				"throttlingPolicies": [{"events": ["image.updated"], "durationMs": 1000, "maximumCount": 1}],
				"execution": {"executable": "${node}", "arguments": []}
			}],
			"settings": {"type": "object"}
		});
		let err = parse_and_validate(&contents(&raw.to_string(), &[])).unwrap_err();
		assert!(err.contains("not in this instructions entry's events"));
	}

	#[test]
	fn ui_element_url_must_resolve_to_an_archive_entry() {
		let mut raw: Value = serde_json::from_str(&minimal_manifest()).unwrap();
		raw.as_object_mut()
			.unwrap()
			.insert("ui".to_string(), json!({"elements": [{"anchor": "toolbar", "url": "missing.html"}]}));
		let err = parse_and_validate(&contents(&raw.to_string(), &["other.html"])).unwrap_err();
		assert!(err.contains("does not resolve"));
	}

	#[test]
	fn ui_element_url_found_in_first_subdirectory_layout_passes() {
		let mut raw: Value = serde_json::from_str(&minimal_manifest()).unwrap();
		raw.as_object_mut()
			.unwrap()
			.insert("ui".to_string(), json!({"elements": [{"anchor": "toolbar", "url": "panel.html"}]}));
		let manifest = parse_and_validate(&contents(&raw.to_string(), &["photo-tagger/panel.html"])).unwrap();
		assert_eq!(manifest.ui.elements.len(), 1);
	}

	#[test]
	fn invalid_settings_schema_is_rejected() {
		let mut raw: Value = serde_json::from_str(&minimal_manifest()).unwrap();
		raw.as_object_mut().unwrap().insert("settings".to_string(), json!({"type": "not-a-real-type"}));
		let err = parse_and_validate(&contents(&raw.to_string(), &[])).unwrap_err();
		assert!(err.contains("settings is not a valid JSON-schema"));
	}
}
