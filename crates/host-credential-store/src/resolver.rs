//! Seam for looking up API keys this host never issued itself.
//!
//! The credential store's own tables only know about the master key and
//! the one key per installed extension. `resolve()` falls back to a
//! `PersistedSecretResolver` for any other key value — e.g. a longer-lived
//! personal access token minted and stored by whatever system sits above
//! the extension host. That system is out of scope here, so this crate
//! only defines the seam and a no-op default.

use async_trait::async_trait;
use host_core_ports::types::{ExtensionId, Scope};
use std::time::Duration;

/// What a persisted-secret lookup resolves to.
#[derive(Debug, Clone)]
pub struct PersistedSecret {
	pub scopes: Vec<Scope>,
	pub extension_id: Option<ExtensionId>,
	/// How long to cache this resolution before re-querying the resolver.
	pub ttl: Option<Duration>,
}

/// Looks up a key value the credential store's own tables don't recognize.
#[async_trait]
pub trait PersistedSecretResolver: Send + Sync {
	/// Resolves `value`, or `None` if it names no known secret.
	async fn resolve(&self, value: &str) -> Option<PersistedSecret>;
}

/// Default resolver for deployments with no external secret store wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPersistedSecretResolver;

#[async_trait]
impl PersistedSecretResolver for NullPersistedSecretResolver {
	async fn resolve(&self, _value: &str) -> Option<PersistedSecret> {
		None
	}
}
