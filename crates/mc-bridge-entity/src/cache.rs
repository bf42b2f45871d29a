//! Per-session set of tracked entities, keyed by Java entity id.

use std::collections::HashMap;

use mc_bridge_proto::item_stack::ItemStack;
use mc_bridge_proto::java_metadata::JavaMetadata;
use mc_bridge_proto::types::Vec3;
use tracing::{debug, info, warn};

use crate::armor_stand::ArmorStand;
use crate::entity::{EntityBase, EquipmentSlot};
use crate::error::EntityError;
use crate::registry::{EntityBehavior, EntityKindRegistry};
use crate::session::Session;

/// One tracked entity, by translation behavior.
#[derive(Debug, Clone)]
pub enum TrackedEntity {
    Generic(EntityBase),
    ArmorStand(ArmorStand),
}

impl TrackedEntity {
    pub fn base(&self) -> &EntityBase {
        match self {
            TrackedEntity::Generic(base) => base,
            TrackedEntity::ArmorStand(stand) => stand.base(),
        }
    }

    pub fn runtime_id(&self) -> u64 {
        self.base().runtime_id
    }

    pub fn as_armor_stand(&self) -> Option<&ArmorStand> {
        match self {
            TrackedEntity::ArmorStand(stand) => Some(stand),
            TrackedEntity::Generic(_) => None,
        }
    }

    pub fn spawn(&mut self, session: &mut impl Session) {
        match self {
            TrackedEntity::Generic(base) => base.spawn(session),
            TrackedEntity::ArmorStand(stand) => stand.spawn(session),
        }
    }

    pub fn despawn(&mut self, session: &mut impl Session) -> bool {
        match self {
            TrackedEntity::Generic(base) => base.despawn(session),
            TrackedEntity::ArmorStand(stand) => stand.despawn(session),
        }
    }

    pub fn move_relative(
        &mut self,
        session: &mut impl Session,
        delta: Vec3,
        rotation: Vec3,
        on_ground: bool,
    ) {
        match self {
            TrackedEntity::Generic(base) => base.move_relative(session, delta, rotation, on_ground),
            TrackedEntity::ArmorStand(stand) => stand.move_relative(session, delta, rotation, on_ground),
        }
    }

    pub fn move_absolute(
        &mut self,
        session: &mut impl Session,
        position: Vec3,
        rotation: Vec3,
        on_ground: bool,
        teleported: bool,
    ) {
        match self {
            TrackedEntity::Generic(base) => {
                base.move_absolute(session, position, rotation, on_ground, teleported)
            }
            TrackedEntity::ArmorStand(stand) => {
                stand.move_absolute(session, position, rotation, on_ground, teleported)
            }
        }
    }

    pub fn apply_metadata(&mut self, session: &mut impl Session, meta: &JavaMetadata) {
        match self {
            TrackedEntity::Generic(base) => {
                base.apply_metadata(meta);
            }
            TrackedEntity::ArmorStand(stand) => stand.apply_metadata(session, meta),
        }
    }

    pub fn set_equipment(&mut self, session: &mut impl Session, slot: EquipmentSlot, item: ItemStack) {
        match self {
            TrackedEntity::Generic(base) => base.set_equipment(slot, item),
            TrackedEntity::ArmorStand(stand) => stand.set_equipment(session, slot, item),
        }
    }

    pub fn update_equipment(&self, session: &mut impl Session) {
        match self {
            TrackedEntity::Generic(base) => base.update_equipment(session),
            TrackedEntity::ArmorStand(stand) => stand.update_equipment(session),
        }
    }

    pub fn set_passengers(&mut self, passengers: Vec<i64>) {
        match self {
            TrackedEntity::Generic(base) => base.set_passengers(passengers),
            TrackedEntity::ArmorStand(stand) => stand.set_passengers(passengers),
        }
    }

    pub fn flush_metadata(&self, session: &mut impl Session) {
        match self {
            TrackedEntity::Generic(base) => base.flush_metadata(session),
            TrackedEntity::ArmorStand(stand) => stand.flush_metadata(session),
        }
    }
}

/// Entities visible to one client.
#[derive(Debug, Default)]
pub struct EntityCache {
    entities: HashMap<i64, TrackedEntity>,
    registry: EntityKindRegistry,
}

impl EntityCache {
    pub fn new(registry: EntityKindRegistry) -> Self {
        Self {
            entities: HashMap::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &EntityKindRegistry {
        &self.registry
    }

    pub fn get(&self, java_id: i64) -> Option<&TrackedEntity> {
        self.entities.get(&java_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Start tracking a Java entity and spawn it on the client.
    ///
    /// A Java id that is already tracked is despawned first.
    pub fn spawn(
        &mut self,
        session: &mut impl Session,
        java_id: i64,
        identifier: &str,
        position: Vec3,
        motion: Vec3,
        rotation: Vec3,
    ) -> Result<u64, EntityError> {
        let definition = self
            .registry
            .get(identifier)
            .cloned()
            .ok_or_else(|| EntityError::UnknownEntityKind(identifier.to_string()))?;
        let runtime_id = session.next_entity_id()?;

        if let Some(mut previous) = self.entities.remove(&java_id) {
            warn!("Entity {java_id} spawned twice, replacing runtime id {}", previous.runtime_id());
            previous.despawn(session);
        }

        let mut entity = match definition.behavior {
            EntityBehavior::ArmorStand => TrackedEntity::ArmorStand(ArmorStand::new(
                java_id, runtime_id, definition, position, motion, rotation,
            )),
            EntityBehavior::Generic => TrackedEntity::Generic(EntityBase::new(
                java_id, runtime_id, definition, position, motion, rotation,
            )),
        };
        entity.spawn(session);
        debug!("Spawned {identifier} {java_id} as runtime id {runtime_id}");
        self.entities.insert(java_id, entity);
        Ok(runtime_id)
    }

    /// Stop tracking an entity. Returns `true` when it was not tracked.
    pub fn despawn(&mut self, session: &mut impl Session, java_id: i64) -> bool {
        match self.entities.remove(&java_id) {
            Some(mut entity) => entity.despawn(session),
            None => {
                debug!("Despawn for unknown entity {java_id}");
                true
            }
        }
    }

    pub fn move_absolute(
        &mut self,
        session: &mut impl Session,
        java_id: i64,
        position: Vec3,
        rotation: Vec3,
        on_ground: bool,
        teleported: bool,
    ) {
        if let Some(entity) = self.tracked(java_id) {
            entity.move_absolute(session, position, rotation, on_ground, teleported);
        }
    }

    pub fn move_relative(
        &mut self,
        session: &mut impl Session,
        java_id: i64,
        delta: Vec3,
        rotation: Vec3,
        on_ground: bool,
    ) {
        if let Some(entity) = self.tracked(java_id) {
            entity.move_relative(session, delta, rotation, on_ground);
        }
    }

    /// Apply one Java metadata packet in order, then send the result once.
    pub fn apply_metadata(&mut self, session: &mut impl Session, java_id: i64, fields: &[JavaMetadata]) {
        if let Some(entity) = self.tracked(java_id) {
            for meta in fields {
                entity.apply_metadata(session, meta);
            }
            entity.flush_metadata(session);
        }
    }

    /// Store new equipment, then send the full equipment set.
    pub fn set_equipment(
        &mut self,
        session: &mut impl Session,
        java_id: i64,
        items: Vec<(EquipmentSlot, ItemStack)>,
    ) {
        if let Some(entity) = self.tracked(java_id) {
            for (slot, item) in items {
                entity.set_equipment(session, slot, item);
            }
            entity.update_equipment(session);
        }
    }

    pub fn set_passengers(&mut self, java_id: i64, passengers: Vec<i64>) {
        if let Some(entity) = self.tracked(java_id) {
            entity.set_passengers(passengers);
        }
    }

    /// Despawn everything, e.g. when the session closes.
    pub fn despawn_all(&mut self, session: &mut impl Session) -> usize {
        let count = self.entities.len();
        for (_, mut entity) in self.entities.drain() {
            entity.despawn(session);
        }
        if count > 0 {
            info!("Despawned {count} tracked entities");
        }
        count
    }

    fn tracked(&mut self, java_id: i64) -> Option<&mut TrackedEntity> {
        let entity = self.entities.get_mut(&java_id);
        if entity.is_none() {
            debug!("Update for unknown entity {java_id}");
        }
        entity
    }
}
