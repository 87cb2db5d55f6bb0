use host_core_ports::{CredentialStorePort, ExtensionId};
use host_credential_store::CredentialStore;

#[tokio::test]
async fn every_extension_gets_exactly_one_key_and_uninstall_removes_it() {
	let store = CredentialStore::default();
	let id = ExtensionId::parse("photo-tagger").unwrap();

	let key = store.register_extension_key(&id).await;
	assert!(store.resolve(&key).await.is_ok());

	store.unregister(&id).await;

	assert!(store.resolve(&key).await.is_err());
}

#[tokio::test]
async fn master_key_takes_precedence_over_an_extension_key_with_the_same_value() {
	let store = CredentialStore::default();
	let id = ExtensionId::parse("photo-tagger").unwrap();
	let extension_key = store.register_extension_key(&id).await;

	// Master key equality is checked first regardless of what else is registered.
	store.set_master_key(extension_key.clone()).await;

	let entry = store.resolve(&extension_key).await.unwrap();
	assert!(entry.extension_id.is_none());
	assert_eq!(entry.scopes, vec!["all".to_string()]);
}

#[tokio::test]
async fn missing_key_header_policy_is_left_to_the_caller() {
	let store = CredentialStore::default();
	// resolve() only ever sees a presented key; an absent header is the
	// socket gateway's own Unauthorized case (§4.D), not this store's.
	let err = store.resolve("").await.unwrap_err();
	assert_eq!(err.status(), "Unauthorized");
}
