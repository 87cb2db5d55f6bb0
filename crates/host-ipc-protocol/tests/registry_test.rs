use host_ipc_protocol::{MessageEnvelope, MessageRegistry, MessageType, SerializationFormat};

#[test]
fn default_registry_knows_the_socket_message_types() {
	let registry = MessageRegistry::new();
	assert!(registry.get_message_type("connection").is_some());
	assert!(registry.get_message_type("event").is_some());
	assert!(registry.get_message_type("unknown").is_none());
}

#[test]
fn default_registry_supports_all_three_formats() {
	let registry = MessageRegistry::new();
	assert!(registry.supports_format(SerializationFormat::Json));
	assert!(registry.supports_format(SerializationFormat::MessagePack));
	assert!(registry.supports_format(SerializationFormat::Bincode));
}

#[tokio::test]
async fn registry_dispatches_serialization_by_format() {
	let registry = MessageRegistry::new();
	let envelope = MessageEnvelope::new(MessageType::Event, "payload".to_string());
	let bytes = registry
		.serialize_message(&envelope, SerializationFormat::Json)
		.await
		.expect("json is supported");
	let decoded: MessageEnvelope<String> = registry
		.deserialize_message(&bytes, SerializationFormat::Json)
		.await
		.expect("round trips");
	assert_eq!(decoded.payload, envelope.payload);
}
