//! Shared entity lifecycle: spawn, despawn, movement, equipment and the
//! generic part of metadata translation.

use mc_bridge_proto::entity_data::MetadataValue;
use mc_bridge_proto::item_stack::ItemStack;
use mc_bridge_proto::java_metadata::{JavaMetadata, JavaMetadataValue};
use mc_bridge_proto::packets::{
    AddActor, MobArmorEquipment, MobEquipment, MoveActorAbsolute, RemoveEntity, SetEntityData,
    UpstreamPacket,
};
use mc_bridge_proto::types::Vec3;
use tracing::debug;

use crate::chat;
use crate::metadata::{EntityDataKey, EntityFlag, EntityMetadataStore};
use crate::registry::EntityDefinition;
use crate::session::Session;

/// Default `MAX_AIR_SUPPLY` for every entity.
pub const MAX_AIR_SUPPLY: i16 = 300;

// Java shared flag bits (field 0).
const JAVA_ON_FIRE: u8 = 0x01;
const JAVA_SNEAKING: u8 = 0x02;
const JAVA_SPRINTING: u8 = 0x08;
const JAVA_SWIMMING: u8 = 0x10;
const JAVA_INVISIBLE: u8 = 0x20;
const JAVA_GLIDING: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentSlot {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    MainHand,
    OffHand,
}

impl EquipmentSlot {
    fn index(self) -> usize {
        self as usize
    }
}

/// Six equipment slots; an empty slot holds [`ItemStack::AIR`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Equipment {
    slots: [ItemStack; 6],
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> &ItemStack {
        &self.slots[slot.index()]
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: ItemStack) {
        self.slots[slot.index()] = item;
    }

    /// True when every slot is air.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(ItemStack::is_empty)
    }
}

/// Where an entity is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Pending,
    Spawned,
    Despawned,
}

/// Who owns the Bedrock `INVISIBLE` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invisibility {
    /// Mirror Java bit 0x20 of field 0.
    FromFlags,
    /// The caller decides; field 0 leaves the flag alone.
    Managed,
}

/// Bedrock rotation triple sent with spawn and move packets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
}

impl Facing {
    /// Rotation is stored as `(yaw, pitch, head_yaw)`.
    pub fn from_rotation(rotation: Vec3) -> Self {
        Self {
            pitch: rotation.y,
            yaw: rotation.x,
            head_yaw: rotation.z,
        }
    }

    /// Yaw replicated on all three axes.
    pub fn collapsed(rotation: Vec3) -> Self {
        Self {
            pitch: rotation.x,
            yaw: rotation.x,
            head_yaw: rotation.x,
        }
    }
}

/// State shared by every tracked entity.
#[derive(Debug, Clone)]
pub struct EntityBase {
    /// Id on the Java side.
    pub java_id: i64,
    /// Id on the Bedrock side; also used as the unique id.
    pub runtime_id: u64,
    pub definition: EntityDefinition,
    /// Logical position, without any display offset.
    pub position: Vec3,
    pub motion: Vec3,
    /// `(yaw, pitch, head_yaw)`.
    pub rotation: Vec3,
    pub on_ground: bool,
    /// Vertical display offset added to every sent position.
    pub y_offset: f32,
    pub metadata: EntityMetadataStore,
    pub equipment: Equipment,
    pub passengers: Vec<i64>,
    state: LifeState,
}

impl EntityBase {
    pub fn new(
        java_id: i64,
        runtime_id: u64,
        definition: EntityDefinition,
        position: Vec3,
        motion: Vec3,
        rotation: Vec3,
    ) -> Self {
        let mut metadata = EntityMetadataStore::default();
        metadata.put_float(EntityDataKey::Scale, 1.0);
        metadata.put_float(EntityDataKey::BoundingBoxWidth, definition.width);
        metadata.put_float(EntityDataKey::BoundingBoxHeight, definition.height);
        metadata.put(EntityDataKey::AirSupply, MetadataValue::Short(0));
        metadata.put(EntityDataKey::MaxAirSupply, MetadataValue::Short(MAX_AIR_SUPPLY));
        metadata.set_flag(EntityFlag::HasGravity, true);
        metadata.set_flag(EntityFlag::HasCollision, true);
        metadata.set_flag(EntityFlag::CanShowName, true);
        metadata.set_flag(EntityFlag::CanClimb, true);

        Self {
            java_id,
            runtime_id,
            definition,
            position,
            motion,
            rotation,
            on_ground: false,
            y_offset: 0.0,
            metadata,
            equipment: Equipment::default(),
            passengers: Vec::new(),
            state: LifeState::Pending,
        }
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    pub fn is_spawned(&self) -> bool {
        self.state == LifeState::Spawned
    }

    /// Position as the client sees it.
    pub fn wire_position(&self) -> Vec3 {
        self.position.with_y_offset(self.y_offset)
    }

    pub fn spawn(&mut self, session: &mut impl Session) {
        self.spawn_facing(session, Facing::from_rotation(self.rotation));
    }

    /// Send `AddActor` with an explicit rotation. Only a pending entity spawns.
    pub fn spawn_facing(&mut self, session: &mut impl Session, facing: Facing) {
        if self.state != LifeState::Pending {
            debug!("Ignoring spawn of runtime id {} ({:?})", self.runtime_id, self.state);
            return;
        }
        self.state = LifeState::Spawned;
        session.send_upstream(UpstreamPacket::AddActor(AddActor {
            entity_unique_id: self.runtime_id as i64,
            entity_runtime_id: self.runtime_id,
            entity_type: self.definition.identifier.clone(),
            position: self.wire_position(),
            velocity: self.motion,
            pitch: facing.pitch,
            yaw: facing.yaw,
            head_yaw: facing.head_yaw,
            body_yaw: facing.yaw,
            metadata: self.metadata.to_entries(),
        }));
    }

    /// Remove the entity from the client. Returns `true` when there was
    /// nothing to remove, in which case no packet is sent.
    pub fn despawn(&mut self, session: &mut impl Session) -> bool {
        let was_spawned = self.state == LifeState::Spawned;
        self.state = LifeState::Despawned;
        if !was_spawned {
            return true;
        }
        session.send_upstream(UpstreamPacket::RemoveEntity(RemoveEntity {
            entity_unique_id: self.runtime_id as i64,
        }));
        false
    }

    pub fn move_relative(
        &mut self,
        session: &mut impl Session,
        delta: Vec3,
        rotation: Vec3,
        on_ground: bool,
    ) {
        self.move_relative_facing(session, delta, rotation, on_ground, Facing::from_rotation(rotation));
    }

    pub fn move_relative_facing(
        &mut self,
        session: &mut impl Session,
        delta: Vec3,
        rotation: Vec3,
        on_ground: bool,
        facing: Facing,
    ) {
        self.position = self.position + delta;
        self.rotation = rotation;
        self.on_ground = on_ground;
        self.send_position(session, facing, false);
    }

    pub fn move_absolute(
        &mut self,
        session: &mut impl Session,
        position: Vec3,
        rotation: Vec3,
        on_ground: bool,
        teleported: bool,
    ) {
        self.move_absolute_facing(
            session,
            position,
            rotation,
            on_ground,
            teleported,
            Facing::from_rotation(rotation),
        );
    }

    pub fn move_absolute_facing(
        &mut self,
        session: &mut impl Session,
        position: Vec3,
        rotation: Vec3,
        on_ground: bool,
        teleported: bool,
        facing: Facing,
    ) {
        self.position = position;
        self.rotation = rotation;
        self.on_ground = on_ground;
        self.send_position(session, facing, teleported);
    }

    /// Send the current wire position without changing any state.
    pub fn send_position(&self, session: &mut impl Session, facing: Facing, teleported: bool) {
        if !self.is_spawned() {
            return;
        }
        session.send_upstream(UpstreamPacket::MoveActorAbsolute(MoveActorAbsolute::new(
            self.runtime_id,
            self.wire_position(),
            facing.pitch,
            facing.yaw,
            facing.head_yaw,
            self.on_ground,
            teleported,
        )));
    }

    /// Store an item. Nothing is sent until [`EntityBase::update_equipment`].
    pub fn set_equipment(&mut self, slot: EquipmentSlot, item: ItemStack) {
        self.equipment.set(slot, item);
    }

    /// Send armor and both hands.
    pub fn update_equipment(&self, session: &mut impl Session) {
        if !self.is_spawned() {
            return;
        }
        let eq = &self.equipment;
        session.send_upstream(UpstreamPacket::MobArmorEquipment(MobArmorEquipment {
            entity_runtime_id: self.runtime_id,
            helmet: eq.get(EquipmentSlot::Helmet).clone(),
            chestplate: eq.get(EquipmentSlot::Chestplate).clone(),
            leggings: eq.get(EquipmentSlot::Leggings).clone(),
            boots: eq.get(EquipmentSlot::Boots).clone(),
            body: ItemStack::empty(),
        }));
        session.send_upstream(UpstreamPacket::MobEquipment(MobEquipment::main_hand(
            self.runtime_id,
            eq.get(EquipmentSlot::MainHand).clone(),
        )));
        session.send_upstream(UpstreamPacket::MobEquipment(MobEquipment::off_hand(
            self.runtime_id,
            eq.get(EquipmentSlot::OffHand).clone(),
        )));
    }

    pub fn set_passengers(&mut self, passengers: Vec<i64>) {
        self.passengers = passengers;
    }

    /// Translate one shared Java field, with field 0 driving `INVISIBLE`.
    pub fn apply_metadata(&mut self, meta: &JavaMetadata) -> bool {
        self.apply_shared_metadata(meta, Invisibility::FromFlags)
    }

    /// Translate one of the shared Java fields (0 to 5).
    ///
    /// Returns `false` when the field is not a shared one or its value has
    /// the wrong type; the store is left untouched in both cases.
    pub fn apply_shared_metadata(&mut self, meta: &JavaMetadata, invisibility: Invisibility) -> bool {
        let store = &mut self.metadata;
        match (meta.id, &meta.value) {
            (0, JavaMetadataValue::Byte(bits)) => {
                let bits = *bits;
                store.set_flag(EntityFlag::OnFire, bits & JAVA_ON_FIRE != 0);
                store.set_flag(EntityFlag::Sneaking, bits & JAVA_SNEAKING != 0);
                let sprinting = bits & JAVA_SPRINTING != 0;
                store.set_flag(EntityFlag::Sprinting, sprinting);
                store.set_flag(EntityFlag::Swimming, sprinting && bits & JAVA_SWIMMING != 0);
                store.set_flag(EntityFlag::Gliding, bits & JAVA_GLIDING != 0);
                if invisibility == Invisibility::FromFlags {
                    store.set_flag(EntityFlag::Invisible, bits & JAVA_INVISIBLE != 0);
                }
            }
            (1, JavaMetadataValue::VarInt(air)) => {
                let air = (*air).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
                store.put(EntityDataKey::AirSupply, MetadataValue::Short(air));
            }
            (2, JavaMetadataValue::OptChat(name)) => {
                let name = name.as_deref().map(chat::plain_text).unwrap_or_default();
                store.put(EntityDataKey::Nametag, MetadataValue::String(name));
            }
            (3, JavaMetadataValue::Boolean(visible)) => {
                store.put(EntityDataKey::AlwaysShowNametag, MetadataValue::Byte(*visible as u8));
            }
            (4, JavaMetadataValue::Boolean(silent)) => {
                store.set_flag(EntityFlag::Silent, *silent);
            }
            (5, JavaMetadataValue::Boolean(no_gravity)) => {
                store.set_flag(EntityFlag::HasGravity, !*no_gravity);
            }
            (0..=5, value) => {
                debug!(
                    "Dropping field {} of runtime id {}: unexpected type {}",
                    meta.id,
                    self.runtime_id,
                    value.type_id()
                );
                return false;
            }
            _ => return false,
        }
        true
    }

    /// Send the full metadata store.
    pub fn flush_metadata(&self, session: &mut impl Session) {
        if !self.is_spawned() {
            return;
        }
        session.send_upstream(UpstreamPacket::SetEntityData(SetEntityData {
            entity_runtime_id: self.runtime_id,
            metadata: self.metadata.to_entries(),
            tick: 0,
        }));
    }
}
