//! Thread-safe testing utilities for factory-based test data generation
//!
//! Provides safety infrastructure that eliminates race conditions and ensures
//! unique, deterministic test data across parallel test execution.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Thread-safe generator for unique test data
///
/// Provides utilities that specific factory structs can use to generate
/// unique, deterministic test data without race conditions.
pub struct SafeGenerator {
	session_id: String,
	counter: AtomicU64,
}

impl SafeGenerator {
	/// Create a new safe generator with unique session ID
	fn new() -> Self {
		let session_id = format!(
			"test_session_{}",
			std::process::id() % 10000 // Keep session ID short but unique per process
		);

		Self {
			session_id,
			counter: AtomicU64::new(1),
		}
	}

	/// Get next unique ID for this test session
	///
	/// Thread-safe, monotonically increasing counter that ensures
	/// each call returns a different value across all threads.
	pub fn next_unique_id(&self) -> u64 {
		self.counter.fetch_add(1, Ordering::SeqCst)
	}

	/// Generate unique string with prefix
	///
	/// Format: "{prefix}_{`session_id`}_{`unique_id`}"
	pub fn unique_string_with_prefix(&self, prefix: &str) -> String {
		let id = self.next_unique_id();
		format!("{}_{}_{}", prefix, self.session_id, id)
	}

	/// Mutate a valid string to create predictable invalid variant
	///
	/// Uses deterministic mutations based on string content to ensure
	/// the same input always produces the same invalid output.
	pub fn mutate_to_invalid(&self, valid: &str) -> String {
		if valid.is_empty() {
			return "invalid".to_string();
		}

		let mut invalid = valid.to_string();

		// Apply deterministic mutations based on content
		if valid.contains('@') {
			// For emails: remove @ symbol
			invalid = invalid.replace('@', "-");
		} else if valid.contains('-') && valid.len() > 10 {
			// For UUIDs: remove last character
			invalid.pop();
		} else if valid.starts_with('{') && valid.ends_with('}') {
			// For JSON: remove closing brace
			invalid.pop();
		} else {
			// Generic: append invalid suffix
			invalid.push_str("_INVALID");
		}

		invalid
	}

	/// Generate number in range (thread-safe)
	///
	/// Uses the internal counter to generate deterministic values
	/// within the specified range.
	pub fn number_in_range(&self, min: u64, max: u64) -> u64 {
		if min >= max {
			return min;
		}

		let id = self.next_unique_id();
		min + (id % (max - min))
	}
}

/// Global safe generator instance
static GENERATOR: OnceLock<SafeGenerator> = OnceLock::new();

/// Get the global safe generator instance
///
/// Thread-safe singleton that provides consistent behavior across
/// all test factories in the current test session.
pub fn safe_generator() -> &'static SafeGenerator {
	GENERATOR.get_or_init(SafeGenerator::new)
}
