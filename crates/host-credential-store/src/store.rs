//! `CredentialStore`: the in-process implementation of `CredentialStorePort`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use host_commons::debug::duck;
use host_core_ports::ports::Result;
use host_core_ports::{ApiKeyEntry, CredentialStorePort, ExtensionId, PortError};
use rand::Rng;
use tokio::sync::RwLock;

use crate::resolver::{NullPersistedSecretResolver, PersistedSecretResolver};

const KEY_LENGTH: usize = 36;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

fn generate_lowercase_key() -> String {
	let mut rng = rand::thread_rng();
	(0..KEY_LENGTH).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char).collect()
}

/// A persisted-secret resolution cached after its first lookup.
struct CachedSecret {
	entry: ApiKeyEntry,
	expires_at: Option<DateTime<Utc>>,
}

impl CachedSecret {
	fn is_expired(&self) -> bool {
		self.expires_at.is_some_and(|expires_at| expires_at <= Utc::now())
	}
}

/// Process-wide table of API key entries plus a cache of persisted-secret
/// resolutions, per §4.A.
pub struct CredentialStore {
	master_key: RwLock<Option<ApiKeyEntry>>,
	extension_keys: RwLock<HashMap<String, ApiKeyEntry>>,
	key_by_extension: RwLock<HashMap<ExtensionId, String>>,
	persisted_secret_cache: RwLock<HashMap<String, CachedSecret>>,
	resolver: Arc<dyn PersistedSecretResolver>,
}

impl CredentialStore {
	#[must_use]
	pub fn new(resolver: Arc<dyn PersistedSecretResolver>) -> Self {
		Self {
			master_key: RwLock::new(None),
			extension_keys: RwLock::new(HashMap::new()),
			key_by_extension: RwLock::new(HashMap::new()),
			persisted_secret_cache: RwLock::new(HashMap::new()),
			resolver,
		}
	}
}

impl Default for CredentialStore {
	fn default() -> Self {
		Self::new(Arc::new(NullPersistedSecretResolver))
	}
}

#[async_trait]
impl CredentialStorePort for CredentialStore {
	fn generate_key(&self) -> String {
		generate_lowercase_key()
	}

	async fn set_master_key(&self, value: String) {
		duck!("setting master key");
		*self.master_key.write().await = Some(ApiKeyEntry {
			value,
			scopes: vec![ApiKeyEntry::ALL_SCOPE.to_string()],
			extension_id: None,
		});
	}

	async fn register_extension_key(&self, extension_id: &ExtensionId) -> String {
		let value = self.generate_key();
		let entry = ApiKeyEntry {
			value: value.clone(),
			scopes: ApiKeyEntry::extension_scopes(),
			extension_id: Some(extension_id.clone()),
		};

		let previous = self.key_by_extension.write().await.insert(extension_id.clone(), value.clone());
		let mut extension_keys = self.extension_keys.write().await;
		if let Some(previous_value) = previous {
			extension_keys.remove(&previous_value);
		}
		extension_keys.insert(value.clone(), entry);

		duck!("registered key for extension {}", extension_id);
		value
	}

	async fn unregister(&self, extension_id: &ExtensionId) {
		if let Some(value) = self.key_by_extension.write().await.remove(extension_id) {
			self.extension_keys.write().await.remove(&value);
		}
	}

	async fn resolve(&self, key: &str) -> Result<ApiKeyEntry> {
		if let Some(master) = self.master_key.read().await.as_ref() {
			if master.value == key {
				return Ok(master.clone());
			}
		}

		if let Some(entry) = self.extension_keys.read().await.get(key) {
			return Ok(entry.clone());
		}

		if let Some(cached) = self.persisted_secret_cache.read().await.get(key) {
			if !cached.is_expired() {
				return Ok(cached.entry.clone());
			}
		}
		self.persisted_secret_cache.write().await.remove(key);

		let resolved = self.resolver.resolve(key).await.ok_or_else(|| PortError::Unauthorized {
			message: "unknown API key".to_string(),
		})?;

		let entry = ApiKeyEntry {
			value: key.to_string(),
			scopes: resolved.scopes,
			extension_id: resolved.extension_id,
		};
		let expires_at = resolved.ttl.and_then(|ttl| chrono::Duration::from_std(ttl).ok()).map(|ttl| Utc::now() + ttl);
		self.persisted_secret_cache.write().await.insert(
			key.to_string(),
			CachedSecret {
				entry: entry.clone(),
				expires_at,
			},
		);

		Ok(entry)
	}

	async fn forget(&self, value: &str) {
		self.persisted_secret_cache.write().await.remove(value);
	}

	async fn current_key(&self, extension_id: &ExtensionId) -> Option<String> {
		self.key_by_extension.read().await.get(extension_id).cloned()
	}
}
