//! Item stacks as carried by equipment packets.
//!
//! Item translation happens upstream; by the time a stack reaches the entity
//! layer it already holds Bedrock runtime ids.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::{VarInt, VarUInt32};

/// A single item stack. `runtime_id == 0` is air.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    /// Item runtime id from the StartGame item table. 0 = air.
    pub runtime_id: i32,
    pub count: u16,
    /// Damage / variant.
    pub damage: u16,
    /// Block runtime id if this item places a block.
    pub block_runtime_id: i32,
    /// Network-format NBT (enchantments, custom names, dye colour).
    pub nbt_data: Vec<u8>,
}

impl ItemStack {
    /// The empty-slot sentinel.
    pub const AIR: ItemStack = ItemStack {
        runtime_id: 0,
        count: 0,
        damage: 0,
        block_runtime_id: 0,
        nbt_data: Vec::new(),
    };

    pub fn empty() -> Self {
        Self::AIR
    }

    pub fn new(runtime_id: i32, count: u16) -> Self {
        Self {
            runtime_id,
            count,
            ..Self::AIR
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime_id == 0 || self.count == 0
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::AIR
    }
}

/// Encoded as `NetworkItemStackDescriptor` without a stack network id.
///
/// ```text
/// VarInt(runtime_id)      0 = air, nothing follows
/// u16_le(count)
/// VarUInt32(damage)
/// u8(0)                   no stack network id
/// VarInt(block_runtime_id)
/// VarUInt32(0) | VarUInt32(0xFFFFFFFF) u8(1) nbt
/// VarInt(0) VarInt(0)     can-place-on / can-destroy
/// ```
impl ProtoEncode for ItemStack {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        if self.is_empty() {
            VarInt(0).proto_encode(buf);
            return;
        }
        VarInt(self.runtime_id).proto_encode(buf);
        buf.put_u16_le(self.count);
        VarUInt32(u32::from(self.damage)).proto_encode(buf);
        buf.put_u8(0);
        VarInt(self.block_runtime_id).proto_encode(buf);
        if self.nbt_data.is_empty() {
            VarUInt32(0).proto_encode(buf);
        } else {
            VarUInt32(0xFFFF_FFFF).proto_encode(buf);
            buf.put_u8(1);
            buf.put_slice(&self.nbt_data);
        }
        VarInt(0).proto_encode(buf);
        VarInt(0).proto_encode(buf);
    }
}
