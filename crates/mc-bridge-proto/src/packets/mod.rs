//! Bedrock packets emitted by the entity layer.

pub mod add_actor;
pub mod mob_armor_equipment;
pub mod mob_equipment;
pub mod move_actor_absolute;
pub mod remove_entity;
pub mod set_entity_data;

use bytes::BufMut;

use crate::codec::ProtoEncode;

pub use add_actor::AddActor;
pub use mob_armor_equipment::MobArmorEquipment;
pub use mob_equipment::MobEquipment;
pub use move_actor_absolute::MoveActorAbsolute;
pub use remove_entity::RemoveEntity;
pub use set_entity_data::SetEntityData;

/// Game packet IDs.
pub mod id {
    pub const ADD_ACTOR: u32 = 0x0D;
    pub const REMOVE_ENTITY: u32 = 0x0E;
    pub const MOVE_ACTOR_ABSOLUTE: u32 = 0x10;
    pub const MOB_EQUIPMENT: u32 = 0x1F;
    pub const MOB_ARMOR_EQUIPMENT: u32 = 0x20;
    pub const SET_ENTITY_DATA: u32 = 0x27;
}

/// Every packet the entity layer can hand to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPacket {
    AddActor(AddActor),
    RemoveEntity(RemoveEntity),
    MoveActorAbsolute(MoveActorAbsolute),
    SetEntityData(SetEntityData),
    MobEquipment(MobEquipment),
    MobArmorEquipment(MobArmorEquipment),
}

impl UpstreamPacket {
    pub fn packet_id(&self) -> u32 {
        match self {
            UpstreamPacket::AddActor(_) => id::ADD_ACTOR,
            UpstreamPacket::RemoveEntity(_) => id::REMOVE_ENTITY,
            UpstreamPacket::MoveActorAbsolute(_) => id::MOVE_ACTOR_ABSOLUTE,
            UpstreamPacket::SetEntityData(_) => id::SET_ENTITY_DATA,
            UpstreamPacket::MobEquipment(_) => id::MOB_EQUIPMENT,
            UpstreamPacket::MobArmorEquipment(_) => id::MOB_ARMOR_EQUIPMENT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpstreamPacket::AddActor(_) => "AddActor",
            UpstreamPacket::RemoveEntity(_) => "RemoveEntity",
            UpstreamPacket::MoveActorAbsolute(_) => "MoveActorAbsolute",
            UpstreamPacket::SetEntityData(_) => "SetEntityData",
            UpstreamPacket::MobEquipment(_) => "MobEquipment",
            UpstreamPacket::MobArmorEquipment(_) => "MobArmorEquipment",
        }
    }
}

impl ProtoEncode for UpstreamPacket {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            UpstreamPacket::AddActor(p) => p.proto_encode(buf),
            UpstreamPacket::RemoveEntity(p) => p.proto_encode(buf),
            UpstreamPacket::MoveActorAbsolute(p) => p.proto_encode(buf),
            UpstreamPacket::SetEntityData(p) => p.proto_encode(buf),
            UpstreamPacket::MobEquipment(p) => p.proto_encode(buf),
            UpstreamPacket::MobArmorEquipment(p) => p.proto_encode(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec3;
    use bytes::BytesMut;

    #[test]
    fn ids_match_payload() {
        let remove = UpstreamPacket::RemoveEntity(RemoveEntity {
            entity_unique_id: 1,
        });
        assert_eq!(remove.packet_id(), 0x0E);
        assert_eq!(remove.name(), "RemoveEntity");

        let moved = UpstreamPacket::MoveActorAbsolute(MoveActorAbsolute::new(
            1,
            Vec3::ZERO,
            0.0,
            0.0,
            0.0,
            false,
            false,
        ));
        assert_eq!(moved.packet_id(), id::MOVE_ACTOR_ABSOLUTE);
    }

    #[test]
    fn enum_encodes_inner_packet() {
        let inner = RemoveEntity {
            entity_unique_id: 42,
        };
        let mut direct = BytesMut::new();
        inner.proto_encode(&mut direct);
        let mut wrapped = BytesMut::new();
        UpstreamPacket::RemoveEntity(inner).proto_encode(&mut wrapped);
        assert_eq!(direct, wrapped);
    }
}
