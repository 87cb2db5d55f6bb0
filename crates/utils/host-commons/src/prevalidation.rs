//! Pre-validation rule helpers for the extension host
//!
//! This module provides lightweight technical validation utilities with
//! performance optimization (<1ms requirement).

use crate::error::HostError;

/// Trait for pre-validation rules
///
/// # Examples
///
/// ```rust
/// use host_commons::prevalidation::{PreValidationRule, NonEmptyRule};
///
/// let rule = NonEmptyRule;
/// let value = "not empty".to_string();
/// assert!(rule.validate(&value).is_ok());
/// ```
pub trait PreValidationRule<T> {
	/// The error type returned when validation fails
	type Error;

	/// Validate the value, returning Ok(()) if valid
	fn validate(&self, value: &T) -> Result<(), Self::Error>;

	/// Get a description of this rule
	fn description(&self) -> &str;
}

/// Rule that validates non-empty strings
pub struct NonEmptyRule;

impl PreValidationRule<String> for NonEmptyRule {
	type Error = HostError;

	fn validate(&self, value: &String) -> Result<(), Self::Error> {
		if value.is_empty() {
			Err(HostError::Validation {
				message: "Value cannot be empty".to_string(),
				field: None,
				value: Some(value.clone()),
			})
		} else {
			Ok(())
		}
	}

	fn description(&self) -> &'static str {
		"Value must not be empty"
	}
}

/// Rule that validates minimum string length
pub struct MinLengthRule(pub usize);

impl PreValidationRule<String> for MinLengthRule {
	type Error = HostError;

	fn validate(&self, value: &String) -> Result<(), Self::Error> {
		if value.len() < self.0 {
			Err(HostError::Validation {
				message: format!("Value must be at least {} characters", self.0),
				field: None,
				value: Some(value.clone()),
			})
		} else {
			Ok(())
		}
	}

	fn description(&self) -> &'static str {
		"Value must meet minimum length requirement"
	}
}

/// Rule that validates maximum string length
pub struct MaxLengthRule(pub usize);

impl PreValidationRule<String> for MaxLengthRule {
	type Error = HostError;

	fn validate(&self, value: &String) -> Result<(), Self::Error> {
		if value.len() > self.0 {
			Err(HostError::Validation {
				message: format!("Value must be at most {} characters", self.0),
				field: None,
				value: Some(value.clone()),
			})
		} else {
			Ok(())
		}
	}

	fn description(&self) -> &'static str {
		"Value must meet maximum length requirement"
	}
}

/// Rule composition for complex validation
pub struct CompositeRule<T> {
	rules: Vec<Box<dyn PreValidationRule<T, Error = HostError>>>,
}

impl<T> CompositeRule<T> {
	/// Create a new empty composite rule
	#[must_use]
	pub fn new() -> Self {
		Self { rules: Vec::new() }
	}

	/// Add a validation rule to this composite rule
	pub fn add_rule<R>(mut self, rule: R) -> Self
	where
		R: PreValidationRule<T, Error = HostError> + 'static,
	{
		self.rules.push(Box::new(rule));
		self
	}
}

impl<T> Default for CompositeRule<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> PreValidationRule<T> for CompositeRule<T> {
	type Error = HostError;

	fn validate(&self, value: &T) -> Result<(), Self::Error> {
		for rule in &self.rules {
			rule.validate(value)?;
		}
		Ok(())
	}

	fn description(&self) -> &'static str {
		"Composite validation rule"
	}
}

/// Performance-optimized validation helper
///
/// # Examples
///
/// ```rust
/// use host_commons::prevalidation::{validate_fast, NonEmptyRule};
///
/// let rule = NonEmptyRule;
/// let value = "test value".to_string();
/// assert!(validate_fast(&value, &rule).is_ok());
/// ```
pub fn validate_fast<T, R>(value: &T, rule: &R) -> Result<(), HostError>
where
	R: PreValidationRule<T, Error = HostError>,
{
	let start = std::time::Instant::now();
	let result = rule.validate(value);
	let duration = start.elapsed();

	// Ensure validation completes in <1ms
	if duration.as_millis() > 1 {
		crate::duck!("Validation took {}ms, exceeding 1ms target", duration.as_millis());
	}

	result
}
