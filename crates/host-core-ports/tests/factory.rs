//! Test data factories for host-core-ports.
//!
//! MANDATORY: all tests in this crate use these factories for data
//! generation rather than hardcoded literals.

use host_core_ports::types::{
	Command, CommandEntity, CommandOn, CommandSpecification, ExecutionTemplate, Extension, ExtensionActivity,
	ExtensionId, ExtensionStatus, InstructionsEntry, Manifest, ManifestEvent, RuntimeEnvironment, UiBlock,
};
use host_commons::testing::safe_generator;
use std::path::PathBuf;

/// Factory for generating [`ExtensionId`] test data.
pub struct ExtensionIdTestFactory;

impl ExtensionIdTestFactory {
	pub fn valid() -> ExtensionId {
		let id = safe_generator().next_unique_id();
		ExtensionId::parse(format!("ext-{id}")).expect("generated id matches the pattern")
	}

	pub fn invalid() -> String {
		format!("invalid id with spaces #{}", safe_generator().next_unique_id())
	}
}

/// Factory for generating [`ExecutionTemplate`] test data.
pub struct ExecutionTemplateTestFactory;

impl ExecutionTemplateTestFactory {
	pub fn node_script() -> ExecutionTemplate {
		ExecutionTemplate {
			executable: "${node}".to_string(),
			arguments: vec!["${extensionDir}/index.js".to_string()],
		}
	}
}

/// Factory for generating [`InstructionsEntry`] test data.
pub struct InstructionsEntryTestFactory;

impl InstructionsEntryTestFactory {
	pub fn long_lived() -> InstructionsEntry {
		InstructionsEntry {
			events: vec![ManifestEvent::ProcessStarted, ManifestEvent::ImageComputeFeatures],
			capabilities: vec![],
			throttling_policies: vec![],
			execution: ExecutionTemplateTestFactory::node_script(),
			commands: vec![],
		}
	}

	pub fn short_lived(event: ManifestEvent) -> InstructionsEntry {
		InstructionsEntry {
			events: vec![event],
			capabilities: vec![],
			throttling_policies: vec![],
			execution: ExecutionTemplateTestFactory::node_script(),
			commands: vec![],
		}
	}
}

/// Factory for generating [`Command`] test data.
pub struct CommandTestFactory;

impl CommandTestFactory {
	pub fn valid() -> Command {
		let id = safe_generator().next_unique_id();
		Command {
			id: format!("cmd-{id}"),
			on: CommandOn {
				entity: CommandEntity::Image,
				with_tags: vec![],
			},
			parameters: None,
			specifications: vec![CommandSpecification {
				locale: "en".to_string(),
				label: format!("Command {id}"),
				description: "A test command".to_string(),
			}],
		}
	}
}

/// Factory for generating [`Manifest`] test data.
pub struct ManifestTestFactory;

impl ManifestTestFactory {
	pub fn valid() -> Manifest {
		let id = safe_generator().next_unique_id();
		Manifest {
			id: ExtensionId::parse(format!("ext-{id}")).expect("generated id matches the pattern"),
			version: semver::Version::new(1, 0, 0),
			name: format!("Test Extension {id}"),
			description: "A manifest built for tests".to_string(),
			runtimes: vec![RuntimeEnvironment::Node],
			instructions: vec![InstructionsEntryTestFactory::long_lived()],
			ui: UiBlock::default(),
			settings: serde_json::json!({"type": "object", "properties": {}}),
			icon: None,
			manual: None,
		}
	}
}

/// Factory for generating [`Extension`] test data.
pub struct ExtensionTestFactory;

impl ExtensionTestFactory {
	pub fn enabled() -> Extension {
		Extension {
			manifest: ManifestTestFactory::valid(),
			status: ExtensionStatus::Enabled,
			install_directory: PathBuf::from(format!("/tmp/extensions/{}", safe_generator().next_unique_id())),
			is_built_in: false,
			activity: ExtensionActivity::Connected,
		}
	}

	pub fn paused() -> Extension {
		let mut extension = Self::enabled();
		extension.status = ExtensionStatus::Paused;
		extension
	}
}
