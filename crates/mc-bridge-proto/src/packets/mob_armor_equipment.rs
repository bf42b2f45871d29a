//! MobArmorEquipment (0x20): Server → Client.
//!
//! Sets the four worn armor pieces (plus the body slot used by horses and
//! wolves) of an entity.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::item_stack::ItemStack;
use crate::types::VarUInt64;

#[derive(Debug, Clone, PartialEq)]
pub struct MobArmorEquipment {
    pub entity_runtime_id: u64,
    pub helmet: ItemStack,
    pub chestplate: ItemStack,
    pub leggings: ItemStack,
    pub boots: ItemStack,
    pub body: ItemStack,
}

impl ProtoEncode for MobArmorEquipment {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        self.helmet.proto_encode(buf);
        self.chestplate.proto_encode(buf);
        self.leggings.proto_encode(buf);
        self.boots.proto_encode(buf);
        self.body.proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn bare_stand_is_all_air() {
        let pkt = MobArmorEquipment {
            entity_runtime_id: 9,
            helmet: ItemStack::AIR,
            chestplate: ItemStack::AIR,
            leggings: ItemStack::AIR,
            boots: ItemStack::AIR,
            body: ItemStack::AIR,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[9, 0, 0, 0, 0, 0]);
    }
}
