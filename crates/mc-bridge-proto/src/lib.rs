//! Wire types for the Java -> Bedrock entity bridge.
//!
//! Bedrock (target) side: the packets the entity layer emits and the metadata
//! entries they carry. Java (source) side: the entity-metadata list decoder.

pub mod codec;
pub mod entity_data;
pub mod error;
pub mod item_stack;
pub mod java_metadata;
pub mod packets;
pub mod types;
