//! Per-extension API key issuance, the master key, and persisted-secret
//! resolution (Component A).
//!
//! A process-wide table of API key entries plus a cache keyed by
//! persisted-secret value. `resolve` consults, in order: master-key
//! equality, the extension key table, then a persisted-secret lookup with
//! per-entry expiration.
//!
//! # Examples
//!
//! ```rust
//! use host_credential_store::CredentialStore;
//! use host_core_ports::{CredentialStorePort, ExtensionId};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = CredentialStore::default();
//! let id = ExtensionId::parse("sample-ext").unwrap();
//!
//! let key = store.register_extension_key(&id).await;
//! let entry = store.resolve(&key).await.unwrap();
//! assert_eq!(entry.extension_id, Some(id));
//! # }
//! ```

pub mod resolver;
pub mod store;

pub use resolver::{NullPersistedSecretResolver, PersistedSecret, PersistedSecretResolver};
pub use store::CredentialStore;
