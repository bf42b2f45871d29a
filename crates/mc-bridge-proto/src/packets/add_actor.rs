//! AddActor (0x0D): Server → Client.
//!
//! Spawns a non-player entity visible to the client.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};
use crate::entity_data::{encode_entity_metadata, EntityMetadataEntry};
use crate::types::{VarLong, VarUInt32, VarUInt64, Vec3};

/// Spawn a non-player entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AddActor {
    pub entity_unique_id: i64,
    pub entity_runtime_id: u64,
    /// Bedrock identifier, e.g. `"minecraft:armor_stand"`.
    pub entity_type: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub body_yaw: f32,
    pub metadata: Vec<EntityMetadataEntry>,
}

impl ProtoEncode for AddActor {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarLong(self.entity_unique_id).proto_encode(buf);
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        write_string(buf, &self.entity_type);
        self.position.proto_encode(buf);
        self.velocity.proto_encode(buf);
        buf.put_f32_le(self.pitch);
        buf.put_f32_le(self.yaw);
        buf.put_f32_le(self.head_yaw);
        buf.put_f32_le(self.body_yaw);
        // Attributes (none for translated entities)
        VarUInt32(0).proto_encode(buf);
        encode_entity_metadata(buf, &self.metadata);
        // Entity sync properties (int count + float count)
        VarUInt32(0).proto_encode(buf);
        VarUInt32(0).proto_encode(buf);
        // Entity links
        VarUInt32(0).proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_data::MetadataValue;
    use bytes::BytesMut;

    fn armor_stand(metadata: Vec<EntityMetadataEntry>) -> AddActor {
        AddActor {
            entity_unique_id: 7,
            entity_runtime_id: 7,
            entity_type: "minecraft:armor_stand".to_string(),
            position: Vec3::new(0.5, 64.0, 0.5),
            velocity: Vec3::ZERO,
            pitch: 90.0,
            yaw: 90.0,
            head_yaw: 90.0,
            body_yaw: 90.0,
            metadata,
        }
    }

    #[test]
    fn header_layout() {
        let mut buf = BytesMut::new();
        armor_stand(vec![]).proto_encode(&mut buf);
        // VarLong(7) zigzag = 14, VarUInt64(7) = 7, then the identifier
        assert_eq!(buf[0], 14);
        assert_eq!(buf[1], 7);
        assert_eq!(buf[2] as usize, "minecraft:armor_stand".len());
        assert_eq!(&buf[3..24], b"minecraft:armor_stand");
        // + 2 Vec3 + 4 f32 + attrs + metadata count + 2 sync counts + links
        assert_eq!(buf.len(), 24 + 24 + 16 + 5);
    }

    #[test]
    fn metadata_grows_packet() {
        let mut bare = BytesMut::new();
        armor_stand(vec![]).proto_encode(&mut bare);
        let mut with_scale = BytesMut::new();
        armor_stand(vec![EntityMetadataEntry::new(38, MetadataValue::Float(1.0))])
            .proto_encode(&mut with_scale);
        // key + type + f32
        assert_eq!(with_scale.len(), bare.len() + 6);
    }
}
