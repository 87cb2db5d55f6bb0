//! Validation of the five intent shapes (§4.D.1).
//!
//! `IntentPayload`'s `#[serde(untagged)]` discrimination already rejects
//! anything that isn't one of the five shapes at parse time; this module
//! covers the shape-specific constraints the wire format leaves for a
//! second pass: a `parameters` intent's schema must itself compile, and
//! the `imageDetail` anchor is rejected for `ui` intents.

use host_ipc_protocol::{validate_is_schema, IntentPayload};

/// Validates an already-parsed intent, returning the violation message a
/// failed intent reports back to the extension (§4.D.1: "any validation
/// failure returns `{error: "..."}` without forwarding").
pub(crate) fn validate_intent(intent: &IntentPayload) -> Result<(), String> {
	match intent {
		IntentPayload::Parameters { parameters } => {
			validate_is_schema(parameters).map_err(|e| format!("intent parameters is not a valid schema: {e}"))
		}
		IntentPayload::Ui { ui } => {
			if ui.anchor == "imageDetail" {
				Err("the imageDetail anchor is rejected for ui intents".to_string())
			} else {
				Ok(())
			}
		}
		IntentPayload::Dialog { .. } | IntentPayload::Images { .. } | IntentPayload::Show { .. } => Ok(()),
	}
}
