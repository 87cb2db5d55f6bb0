use host_ipc_protocol::{MessageEnvelope, MessageSerializer, MessageType};

#[tokio::test]
async fn json_serializer_round_trips_an_envelope() {
	let envelope = MessageEnvelope::new(MessageType::Event, "hello".to_string());
	let serializer = MessageSerializer::json();
	let bytes = serializer.serialize(&envelope).await.expect("serializes");
	let decoded: MessageEnvelope<String> = serializer.deserialize(&bytes).await.expect("deserializes");
	assert_eq!(decoded.payload, envelope.payload);
	assert_eq!(decoded.correlation_id, envelope.correlation_id);
}

#[tokio::test]
async fn messagepack_serializer_round_trips_an_envelope() {
	let envelope = MessageEnvelope::new(MessageType::Event, 42_u32);
	let serializer = MessageSerializer::message_pack();
	let bytes = serializer.serialize(&envelope).await.expect("serializes");
	let decoded: MessageEnvelope<u32> = serializer.deserialize(&bytes).await.expect("deserializes");
	assert_eq!(decoded.payload, 42);
}

#[tokio::test]
async fn bincode_serializer_round_trips_an_envelope() {
	let envelope = MessageEnvelope::new(MessageType::Event, vec![1_u8, 2, 3]);
	let serializer = MessageSerializer::bincode();
	let bytes = serializer.serialize(&envelope).await.expect("serializes");
	let decoded: MessageEnvelope<Vec<u8>> = serializer.deserialize(&bytes).await.expect("deserializes");
	assert_eq!(decoded.payload, vec![1, 2, 3]);
}
