//! Archive validation, filesystem persistence and in-memory lookup of
//! installed extensions (Component B).
//!
//! `validate_archive`, and the rest of [`ExtensionRegistryPort`], operate
//! purely in memory. The filesystem side effects of install/update — archive
//! extraction, the `.cache` symlink, `parameters.json`, and the built-in
//! extensions directory scan — live in [`persist`] and are called directly
//! by the orchestrator rather than through the port, since nothing in the
//! port's signature needs a filesystem path.
//!
//! # Examples
//!
//! ```rust
//! use host_core_ports::ExtensionRegistryPort;
//! use host_extension_registry::ExtensionRegistry;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = ExtensionRegistry::default();
//! assert!(registry.list().await.unwrap().is_empty());
//! # }
//! ```

pub mod archive;
pub mod manifest;
pub mod persist;
pub mod registry;

pub use archive::{ArchiveContents, ArchiveError};
pub use persist::{BuiltInCandidate, ParametersFile};
pub use registry::ExtensionRegistry;
