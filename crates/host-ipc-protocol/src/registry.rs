//! Message registry for type-safe message routing
//!
//! Provides a centralized registry for message types, serializers,
//! and schema validators with compile-time verification.

use crate::{MessageEnvelope, MessageSerializer, MessageType, SerializationError, SerializationFormat};
use host_commons::debug::duck;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// Centralized message registry for type-safe serialization dispatch.
///
/// Manages message types and serializers to provide a unified interface
/// for message processing. JSON-schema validation of extension-supplied
/// documents lives in [`crate::schema`] instead, since it compiles and
/// validates against per-extension schemas rather than a fixed set of
/// internal message shapes.
pub struct MessageRegistry {
    /// Message type mappings
    type_map: HashMap<String, MessageType>,
    /// Serializer implementations by format
    serializers: HashMap<SerializationFormat, MessageSerializer>,
}

impl MessageRegistry {
    /// Creates a new message registry with the default serializer set.
    ///
    /// # Examples
    ///
    /// ```
    /// use host_ipc_protocol::MessageRegistry;
    ///
    /// let registry = MessageRegistry::new();
    /// ```
    pub fn new() -> Self {
        duck!("Creating new message registry");

        let mut registry = Self {
            type_map: HashMap::new(),
            serializers: HashMap::new(),
        };

        registry.register_serializer(SerializationFormat::MessagePack, MessageSerializer::message_pack());
        registry.register_serializer(SerializationFormat::Bincode, MessageSerializer::bincode());
        registry.register_serializer(SerializationFormat::Json, MessageSerializer::json());

        registry.register_message_type("connection".to_string(), MessageType::Connection);
        registry.register_message_type("notification".to_string(), MessageType::Notification);
        registry.register_message_type("event".to_string(), MessageType::Event);
        registry.register_message_type("health_check".to_string(), MessageType::HealthCheck);
        registry.register_message_type("system_event".to_string(), MessageType::SystemEvent);
        registry.register_message_type("error_report".to_string(), MessageType::ErrorReport);

        duck!(
            "Message registry initialized with {} serializers and {} message types",
            registry.serializers.len(),
            registry.type_map.len()
        );

        registry
    }

    /// Registers a message type mapping
    ///
    /// # Arguments
    ///
    /// * `type_name` - String identifier for the message type
    /// * `message_type` - MessageType enum variant
    pub fn register_message_type(&mut self, type_name: String, message_type: MessageType) {
        duck!("Registering message type: {} -> {:?}", type_name, message_type);
        self.type_map.insert(type_name, message_type);
    }

    /// Registers a serializer for a format
    ///
    /// # Arguments
    ///
    /// * `format` - Serialization format
    /// * `serializer` - Serializer implementation
    pub fn register_serializer(
        &mut self,
        format: SerializationFormat,
        serializer: MessageSerializer,
    ) {
        duck!("Registering serializer for format: {:?}", format);
        self.serializers.insert(format, serializer);
    }

    /// Serializes a message envelope using the specified format
    ///
    /// # Arguments
    ///
    /// * `message` - Message envelope to serialize
    /// * `format` - Serialization format to use
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if serialization fails or format is unsupported
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use host_ipc_protocol::{MessageRegistry, MessageEnvelope, MessageType, SerializationFormat};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let registry = MessageRegistry::new();
    /// let envelope = MessageEnvelope::new(MessageType::Event, "test".to_string());
    /// 
    /// let serialized = registry.serialize_message(&envelope, SerializationFormat::MessagePack).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn serialize_message<T>(
        &self,
        message: &MessageEnvelope<T>,
        format: SerializationFormat,
    ) -> Result<Vec<u8>, SerializationError>
    where
        T: Serialize + Send + Sync,
    {
        duck!("Serializing message with format: {:?}", format);
        
        let serializer = self
            .serializers
            .get(&format)
            .ok_or(SerializationError::UnsupportedFormat(format))?;

        serializer.serialize(message).await
    }

    /// Deserializes bytes to a message envelope using the specified format
    ///
    /// # Arguments
    ///
    /// * `data` - Bytes to deserialize
    /// * `format` - Serialization format used
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if deserialization fails or format is unsupported
    pub async fn deserialize_message<T>(
        &self,
        data: &[u8],
        format: SerializationFormat,
    ) -> Result<MessageEnvelope<T>, SerializationError>
    where
        T: DeserializeOwned + Send + Sync,
    {
        duck!("Deserializing message with format: {:?}", format);
        
        let serializer = self
            .serializers
            .get(&format)
            .ok_or(SerializationError::UnsupportedFormat(format))?;

        serializer.deserialize(data).await
    }

    /// Gets a message type by string identifier
    ///
    /// # Arguments
    ///
    /// * `type_name` - String identifier for the message type
    ///
    /// # Returns
    ///
    /// Returns `Some(MessageType)` if found, `None` otherwise
    pub fn get_message_type(&self, type_name: &str) -> Option<&MessageType> {
        self.type_map.get(type_name)
    }

    /// Returns the number of registered message types
    pub fn message_type_count(&self) -> usize {
        self.type_map.len()
    }

    /// Returns the number of registered serializers
    pub fn serializer_count(&self) -> usize {
        self.serializers.len()
    }

    /// Returns whether a serialization format is supported
    ///
    /// # Arguments
    ///
    /// * `format` - Serialization format to check
    pub fn supports_format(&self, format: SerializationFormat) -> bool {
        self.serializers.contains_key(&format)
    }

    /// Lists all registered message type names
    pub fn message_type_names(&self) -> Vec<&String> {
        self.type_map.keys().collect()
    }

    /// Lists all supported serialization formats
    pub fn supported_formats(&self) -> Vec<SerializationFormat> {
        self.serializers.keys().copied().collect()
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}