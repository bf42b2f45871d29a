//! MobEquipment (0x1F): Server → Client.
//!
//! Shows what an entity is holding in one hand.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::item_stack::ItemStack;
use crate::types::VarUInt64;

/// Equipment change for one hand of a mob.
#[derive(Debug, Clone, PartialEq)]
pub struct MobEquipment {
    pub entity_runtime_id: u64,
    pub item: ItemStack,
    pub inventory_slot: u8,
    pub hotbar_slot: u8,
    /// Container window id: 0 = inventory (main hand), 119 = off hand.
    pub window_id: u8,
}

impl MobEquipment {
    pub const WINDOW_INVENTORY: u8 = 0;
    pub const WINDOW_OFFHAND: u8 = 119;

    pub fn main_hand(runtime_id: u64, item: ItemStack) -> Self {
        Self {
            entity_runtime_id: runtime_id,
            item,
            inventory_slot: 0,
            hotbar_slot: 0,
            window_id: Self::WINDOW_INVENTORY,
        }
    }

    pub fn off_hand(runtime_id: u64, item: ItemStack) -> Self {
        Self {
            entity_runtime_id: runtime_id,
            item,
            inventory_slot: 0,
            hotbar_slot: 0,
            window_id: Self::WINDOW_OFFHAND,
        }
    }
}

impl ProtoEncode for MobEquipment {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.entity_runtime_id).proto_encode(buf);
        self.item.proto_encode(buf);
        buf.put_u8(self.inventory_slot);
        buf.put_u8(self.hotbar_slot);
        buf.put_u8(self.window_id);
    }
}
