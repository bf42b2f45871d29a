//! SetEntityData (0x27): Server → Client.
//!
//! Replaces the client's view of an entity's metadata. The bridge always sends
//! the full store, never a diff.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::entity_data::{encode_entity_metadata, EntityMetadataEntry};
use crate::types::{VarUInt32, VarUInt64};

#[derive(Debug, Clone, PartialEq)]
pub struct SetEntityData {
    pub entity_runtime_id: u64,
    pub metadata: Vec<EntityMetadataEntry>,
    /// Server tick the data applies to; 0 when not tied to player input.
    pub tick: u64,
}

impl ProtoEncode for SetEntityData {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        encode_entity_metadata(buf, &self.metadata);
        // Entity sync properties (int count + float count)
        VarUInt32(0).proto_encode(buf);
        VarUInt32(0).proto_encode(buf);
        VarUInt64(self.tick).proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_data::MetadataValue;
    use bytes::BytesMut;

    #[test]
    fn encode_pose_update() {
        let pkt = SetEntityData {
            entity_runtime_id: 3,
            metadata: vec![EntityMetadataEntry::new(78, MetadataValue::Int(3))],
            tick: 0,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[3, 1, 78, 2, 6, 0, 0, 0]);
    }
}
