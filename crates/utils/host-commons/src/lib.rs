//! # Host Commons
//!
//! Common utilities and patterns shared across all the extension host crates.
//! This crate provides centralized error handling, debugging utilities,
//! and extension traits following the Open-Closed Principle.
//!
//! ## Features
//!
//! - **Centralized Error Handling** - Single `HostError` type with context
//! - **Duck Debugging** - Loud, temporary debugging with consistent format
//! - **Extension Traits** - Add functionality without breaking existing APIs
//!
//! ## Usage
//!
//! ```rust
//! use host_commons::error::{HostError, ResultContext};
//! use host_commons::duck;
//!
//! fn example() -> Result<String, HostError> {
//!     duck!("Starting example function");
//!     
//!     let content = std::fs::read_to_string("config.toml")
//!         .context("Failed to read configuration file")?;
//!     
//!     Ok(content)
//! }
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod extensions;
pub mod filesystem;
pub mod logging;
pub mod prevalidation;
pub mod testing;

// Re-export commonly used items
pub use error::{HostError, ResultContext};
pub use logging::{error, info, warn};
pub use debug::duck;