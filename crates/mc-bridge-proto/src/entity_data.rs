//! Bedrock entity metadata entries as they appear on the wire.
//!
//! Every packet that carries actor data (`AddActor`, `SetEntityData`) writes the
//! same list: `VarUInt32(count)` then `(VarUInt32 key, VarUInt32 type, value)`.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};
use crate::types::{VarInt, VarLong, VarUInt32, Vec3};

/// Wire data-type ids.
pub mod data_type {
    pub const BYTE: u32 = 0;
    pub const SHORT: u32 = 1;
    pub const INT: u32 = 2;
    pub const FLOAT: u32 = 3;
    pub const STRING: u32 = 4;
    pub const LONG: u32 = 7;
    pub const VEC3: u32 = 8;
}

/// A typed metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Byte(u8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
    Long(i64),
    Vec3(Vec3),
}

impl MetadataValue {
    pub fn data_type(&self) -> u32 {
        match self {
            MetadataValue::Byte(_) => data_type::BYTE,
            MetadataValue::Short(_) => data_type::SHORT,
            MetadataValue::Int(_) => data_type::INT,
            MetadataValue::Float(_) => data_type::FLOAT,
            MetadataValue::String(_) => data_type::STRING,
            MetadataValue::Long(_) => data_type::LONG,
            MetadataValue::Vec3(_) => data_type::VEC3,
        }
    }
}

/// A single entity metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadataEntry {
    /// Metadata key (0 = FLAGS, 4 = NAMETAG, 38 = SCALE, ...).
    pub key: u32,
    pub value: MetadataValue,
}

impl EntityMetadataEntry {
    pub fn new(key: u32, value: MetadataValue) -> Self {
        Self { key, value }
    }
}

impl ProtoEncode for EntityMetadataEntry {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.key).proto_encode(buf);
        VarUInt32(self.value.data_type()).proto_encode(buf);
        match &self.value {
            MetadataValue::Byte(v) => buf.put_u8(*v),
            MetadataValue::Short(v) => buf.put_i16_le(*v),
            MetadataValue::Int(v) => VarInt(*v).proto_encode(buf),
            MetadataValue::Float(v) => buf.put_f32_le(*v),
            MetadataValue::String(v) => write_string(buf, v),
            MetadataValue::Long(v) => VarLong(*v).proto_encode(buf),
            MetadataValue::Vec3(v) => v.proto_encode(buf),
        }
    }
}

/// Encode a full metadata list (count prefix included).
pub fn encode_entity_metadata(buf: &mut impl BufMut, entries: &[EntityMetadataEntry]) {
    VarUInt32(entries.len() as u32).proto_encode(buf);
    for entry in entries {
        entry.proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn scale_entry_layout() {
        let mut buf = BytesMut::new();
        EntityMetadataEntry::new(38, MetadataValue::Float(0.55)).proto_encode(&mut buf);
        assert_eq!(buf[0], 38);
        assert_eq!(buf[1], data_type::FLOAT as u8);
        assert_eq!(&buf[2..], &0.55f32.to_le_bytes());
    }

    #[test]
    fn nametag_entry_layout() {
        let mut buf = BytesMut::new();
        EntityMetadataEntry::new(4, MetadataValue::String("Bob".into())).proto_encode(&mut buf);
        assert_eq!(&buf[..], &[4, 4, 3, b'B', b'o', b'b']);
    }

    #[test]
    fn list_has_count_prefix() {
        let entries = vec![
            EntityMetadataEntry::new(0, MetadataValue::Long(1 << 5)),
            EntityMetadataEntry::new(78, MetadataValue::Int(3)),
        ];
        let mut buf = BytesMut::new();
        encode_entity_metadata(&mut buf, &entries);
        assert_eq!(buf[0], 2);
        // key 0, type LONG, zigzag(32) = 64
        assert_eq!(&buf[1..4], &[0, 7, 64]);
        // key 78, type INT, zigzag(3) = 6
        assert_eq!(&buf[4..], &[78, 2, 6]);
    }
}
