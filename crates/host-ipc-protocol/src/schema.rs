//! JSON-schema validation of extension-supplied schemas.
//!
//! Two places in the data model carry an arbitrary JSON-schema authored
//! by the extension itself: a manifest's `settings` document and a
//! command's `parameters`. Both are compiled once at install time and
//! re-used for every subsequent validation.

use host_commons::debug::duck;
use jsonschema::Validator;
use serde_json::Value as JsonValue;

/// Validation error types.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
	/// The schema document itself does not compile.
	#[error("invalid JSON-schema: {0}")]
	InvalidSchema(String),

	/// An instance failed validation; each entry is one violation message.
	#[error("schema violation: {0}")]
	Violations(String),
}

/// A compiled JSON-schema, ready to validate instances against.
pub struct CompiledSchema {
	validator: Validator,
}

impl CompiledSchema {
	/// Compiles a schema document.
	///
	/// # Errors
	/// Returns [`ValidationError::InvalidSchema`] if `schema` is not a
	/// well-formed JSON-schema document.
	pub fn compile(schema: &JsonValue) -> Result<Self, ValidationError> {
		duck!("Compiling JSON-schema");
		let validator = jsonschema::validator_for(schema).map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;
		Ok(Self { validator })
	}

	/// Compiles a schema document with `additionalProperties: false` forced
	/// onto its top-level object, matching the command-parameters rule
	/// in §4.F (`runProcessCommand`/`runImageCommand`).
	///
	/// # Errors
	/// Returns [`ValidationError::InvalidSchema`] if the augmented schema
	/// does not compile.
	pub fn compile_closed(schema: &JsonValue) -> Result<Self, ValidationError> {
		let mut closed = schema.clone();
		if let JsonValue::Object(map) = &mut closed {
			map.entry("additionalProperties").or_insert(JsonValue::Bool(false));
		}
		Self::compile(&closed)
	}

	/// Validates an instance, collecting every violation message.
	///
	/// # Errors
	/// Returns [`ValidationError::Violations`] joining every violation
	/// encountered, semicolon-separated.
	pub fn validate(&self, instance: &JsonValue) -> Result<(), ValidationError> {
		let messages: Vec<String> = self.validator.iter_errors(instance).map(|e| e.to_string()).collect();
		if messages.is_empty() {
			Ok(())
		} else {
			Err(ValidationError::Violations(messages.join("; ")))
		}
	}

	/// Whether `instance` satisfies the schema, without collecting messages.
	#[must_use]
	pub fn is_valid(&self, instance: &JsonValue) -> bool {
		self.validator.is_valid(instance)
	}
}

/// Validates that a document is itself a well-formed JSON-schema, without
/// keeping the compiled form around (used for the manifest `settings`
/// field and a command's `parameters` field at install time).
///
/// # Errors
/// Returns [`ValidationError::InvalidSchema`] if `schema` does not compile.
pub fn validate_is_schema(schema: &JsonValue) -> Result<(), ValidationError> {
	jsonschema::validator_for(schema)
		.map(|_| ())
		.map_err(|e| ValidationError::InvalidSchema(e.to_string()))
}
