//! Armor stand translation.
//!
//! Bedrock cannot render an invisible armor stand's armor and its name tag on
//! one entity. When both are needed the primary stand keeps the armor and an
//! extra name-tag stand (the twin) is spawned above it with zero scale and no
//! bounding box. The twin is owned by the primary and follows it around.

use mc_bridge_proto::entity_data::MetadataValue;
use mc_bridge_proto::item_stack::ItemStack;
use mc_bridge_proto::java_metadata::{JavaMetadata, JavaMetadataValue};
use mc_bridge_proto::types::Vec3;
use tracing::{debug, warn};

use crate::entity::{EntityBase, EquipmentSlot, Facing, Invisibility, LifeState};
use crate::metadata::{EntityDataKey, EntityFlag, EntityMetadataStore};
use crate::pose::{closest_pose, ArmorStandPose, Joint};
use crate::registry::EntityDefinition;
use crate::session::Session;

/// Scale of a small stand.
pub const SMALL_SCALE: f32 = 0.55;

// Java field 0.
const JAVA_INVISIBLE: u8 = 0x20;
// Java field 14.
const JAVA_SMALL: u8 = 0x01;
const JAVA_SHOW_HANDS: u8 = 0x04;
const JAVA_MARKER: u8 = 0x10;

/// What a stand is for. Only a primary can own a twin.
#[derive(Debug, Clone)]
pub enum StandRole {
    Primary { twin: Option<Box<ArmorStand>> },
    NameTag,
}

#[derive(Debug, Clone)]
pub struct ArmorStand {
    base: EntityBase,
    role: StandRole,
    is_marker: bool,
    /// Java bit 0x20 of field 0. Tracked on the primary only.
    is_invisible: bool,
    is_small: bool,
    show_hands: bool,
    /// Whether the last position sent included the name tag offset.
    last_position_included_offset: bool,
    pose: ArmorStandPose,
}

impl ArmorStand {
    pub fn new(
        java_id: i64,
        runtime_id: u64,
        definition: EntityDefinition,
        position: Vec3,
        motion: Vec3,
        rotation: Vec3,
    ) -> Self {
        Self::with_role(
            EntityBase::new(java_id, runtime_id, definition, position, motion, rotation),
            StandRole::Primary { twin: None },
        )
    }

    fn with_role(base: EntityBase, role: StandRole) -> Self {
        Self {
            base,
            role,
            is_marker: false,
            is_invisible: false,
            is_small: false,
            show_hands: false,
            last_position_included_offset: false,
            pose: ArmorStandPose::default(),
        }
    }

    pub fn base(&self) -> &EntityBase {
        &self.base
    }

    pub fn runtime_id(&self) -> u64 {
        self.base.runtime_id
    }

    pub fn metadata(&self) -> &EntityMetadataStore {
        &self.base.metadata
    }

    pub fn position(&self) -> Vec3 {
        self.base.position
    }

    pub fn wire_position(&self) -> Vec3 {
        self.base.wire_position()
    }

    pub fn twin(&self) -> Option<&ArmorStand> {
        match &self.role {
            StandRole::Primary { twin } => twin.as_deref(),
            StandRole::NameTag => None,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.role, StandRole::Primary { .. })
    }

    pub fn is_marker(&self) -> bool {
        self.is_marker
    }

    pub fn is_invisible(&self) -> bool {
        self.is_invisible
    }

    pub fn is_small(&self) -> bool {
        self.is_small
    }

    pub fn show_hands(&self) -> bool {
        self.show_hands
    }

    pub fn pose(&self) -> &ArmorStandPose {
        &self.pose
    }

    pub fn last_position_included_offset(&self) -> bool {
        self.last_position_included_offset
    }

    /// Height the name tag must be lifted by to sit above the stand's head.
    pub fn name_tag_offset(&self) -> f32 {
        self.base.definition.height * if self.is_small { SMALL_SCALE } else { 1.0 }
    }

    fn size_scale(&self) -> f32 {
        if self.is_small {
            SMALL_SCALE
        } else {
            1.0
        }
    }

    fn set_offset_included(&mut self, included: bool) {
        self.last_position_included_offset = included;
        self.base.y_offset = if included { self.name_tag_offset() } else { 0.0 };
    }

    pub fn spawn(&mut self, session: &mut impl Session) {
        let facing = Facing::collapsed(self.base.rotation);
        self.base.spawn_facing(session, facing);
        if self.is_invisible {
            self.update_twin_status(session);
        }
    }

    /// Despawn the twin, then the stand itself.
    pub fn despawn(&mut self, session: &mut impl Session) -> bool {
        self.drop_twin(session);
        self.base.despawn(session)
    }

    pub fn move_relative(
        &mut self,
        session: &mut impl Session,
        delta: Vec3,
        rotation: Vec3,
        on_ground: bool,
    ) {
        if let StandRole::Primary { twin: Some(twin) } = &mut self.role {
            twin.move_relative(session, delta, rotation, on_ground);
        }
        self.base
            .move_relative_facing(session, delta, rotation, on_ground, Facing::collapsed(rotation));
    }

    pub fn move_absolute(
        &mut self,
        session: &mut impl Session,
        position: Vec3,
        rotation: Vec3,
        on_ground: bool,
        teleported: bool,
    ) {
        let include_offset = match &mut self.role {
            StandRole::Primary { twin: Some(twin) } => {
                twin.move_absolute(session, position, rotation, on_ground, teleported);
                false
            }
            StandRole::Primary { twin: None } => {
                !self.is_marker
                    && self.is_invisible
                    && self.base.passengers.is_empty()
                    && !self.base.metadata.flag(EntityFlag::Invisible)
            }
            StandRole::NameTag => true,
        };
        self.set_offset_included(include_offset);
        self.base.move_absolute_facing(
            session,
            position,
            rotation,
            on_ground,
            teleported,
            Facing::collapsed(rotation),
        );
    }

    /// Store an item and re-evaluate whether a twin is needed.
    pub fn set_equipment(&mut self, session: &mut impl Session, slot: EquipmentSlot, item: ItemStack) {
        self.base.set_equipment(slot, item);
        self.update_twin_status(session);
    }

    pub fn update_equipment(&self, session: &mut impl Session) {
        self.base.update_equipment(session);
    }

    pub fn set_passengers(&mut self, passengers: Vec<i64>) {
        self.base.set_passengers(passengers);
    }

    /// Translate one Java metadata field, then mirror it onto the twin.
    pub fn apply_metadata(&mut self, session: &mut impl Session, meta: &JavaMetadata) {
        self.base.apply_shared_metadata(meta, Invisibility::Managed);

        match (meta.id, &meta.value) {
            (0, JavaMetadataValue::Byte(bits)) => {
                if self.is_primary() {
                    self.is_invisible = bits & JAVA_INVISIBLE != 0;
                    self.update_twin_status(session);
                }
            }
            (2, _) => self.update_twin_status(session),
            (14, JavaMetadataValue::Byte(bits)) => self.apply_stand_flags(session, *bits),
            (15..=20, JavaMetadataValue::Rotation(rotation)) => {
                if let Some(joint) = Joint::from_field(meta.id) {
                    self.pose
                        .set(joint, Vec3::new(rotation.pitch, rotation.yaw, rotation.roll));
                    self.recalculate_closest_pose();
                }
            }
            (14..=20, value) => {
                debug!(
                    "Dropping armor stand field {} of runtime id {}: unexpected type {}",
                    meta.id,
                    self.base.runtime_id,
                    value.type_id()
                );
            }
            _ => {}
        }

        if let StandRole::Primary { twin: Some(twin) } = &mut self.role {
            twin.apply_metadata(session, meta);
        }
    }

    /// Field 14: small, show hands and marker bits.
    fn apply_stand_flags(&mut self, session: &mut impl Session, bits: u8) {
        let show_hands = bits & JAVA_SHOW_HANDS != 0;
        let hands_changed = show_hands != self.show_hands;
        self.show_hands = show_hands;
        let was_small = self.is_small;

        let primary = self.is_primary();
        let (width, height) = (self.base.definition.width, self.base.definition.height);
        let store = &mut self.base.metadata;
        let scale = store.get_float(EntityDataKey::Scale);
        let box_width = store.get_float(EntityDataKey::BoundingBoxWidth);
        if bits & JAVA_SMALL != 0 {
            self.is_small = true;
            if scale != Some(SMALL_SCALE) && scale != Some(0.0) {
                store.put_float(EntityDataKey::Scale, SMALL_SCALE);
            }
            if box_width == Some(width) {
                store.put_float(EntityDataKey::BoundingBoxWidth, width * 0.5);
                store.put_float(EntityDataKey::BoundingBoxHeight, height * 0.5);
            }
        } else {
            self.is_small = false;
            if scale == Some(SMALL_SCALE) {
                store.put_float(EntityDataKey::Scale, 1.0);
            }
            if box_width == Some(width * 0.5) {
                store.put_float(EntityDataKey::BoundingBoxWidth, width);
                store.put_float(EntityDataKey::BoundingBoxHeight, height);
            }
        }

        // The twin's box stays zero whatever the primary does.
        if primary {
            let marker = bits & JAVA_MARKER != 0;
            let box_width = store.get_float(EntityDataKey::BoundingBoxWidth);
            if marker && box_width != Some(0.0) {
                store.put_float(EntityDataKey::BoundingBoxWidth, 0.0);
                store.put_float(EntityDataKey::BoundingBoxHeight, 0.0);
            } else if !marker && self.is_marker && box_width == Some(0.0) {
                let factor = if self.is_small { 0.5 } else { 1.0 };
                store.put_float(EntityDataKey::BoundingBoxWidth, width * factor);
                store.put_float(EntityDataKey::BoundingBoxHeight, height * factor);
            }
            if marker != self.is_marker {
                self.is_marker = marker;
                self.update_twin_status(session);
            }
        }

        // The name tag offset scales with the stand.
        if self.is_small != was_small && self.last_position_included_offset {
            self.set_offset_included(true);
            self.base
                .send_position(session, Facing::collapsed(self.base.rotation), false);
        }

        if hands_changed {
            self.recalculate_closest_pose();
        }
    }

    /// Pick the Bedrock pose nearest to the Java joints.
    fn recalculate_closest_pose(&mut self) {
        let name_only = self.is_invisible && !self.base.metadata.flag(EntityFlag::Invisible);
        if !self.is_primary() || self.is_marker || name_only {
            return;
        }
        let pose = closest_pose(&self.pose, self.show_hands);
        self.base
            .metadata
            .put(EntityDataKey::ArmorStandPoseIndex, MetadataValue::Int(pose.index()));
    }

    /// Bring the primary's visibility, scale and twin in line with the
    /// current invisibility, marker, equipment and name, then flush.
    fn update_twin_status(&mut self, session: &mut impl Session) {
        if !self.is_primary() || self.base.state() != LifeState::Spawned {
            return;
        }

        let name_empty = self.base.metadata.get_string(EntityDataKey::Nametag).is_empty();
        let has_equipment = !self.base.equipment.is_empty();
        let scale = self.size_scale();

        if !self.is_invisible || self.is_marker {
            // Bedrock renders this stand as is. An invisible marker still shows armor.
            let had_twin = self.drop_twin(session);
            let store = &mut self.base.metadata;
            store.set_flag(EntityFlag::Invisible, self.is_invisible);
            store.put_float(EntityDataKey::Scale, scale);
            if had_twin || self.last_position_included_offset {
                self.update_position(session);
            }
        } else if has_equipment && !name_empty {
            if self.twin().is_none() {
                self.spawn_twin(session);
            }
        } else if name_empty {
            // Armor only.
            let store = &mut self.base.metadata;
            store.put_float(EntityDataKey::Scale, scale);
            store.set_flag(EntityFlag::Invisible, true);
            let had_twin = self.drop_twin(session);
            if had_twin || self.last_position_included_offset {
                self.update_position(session);
            }
        } else {
            // Name only: a visible stand shrunk to nothing still draws its tag.
            self.update_position_with_offset(session);
            let store = &mut self.base.metadata;
            store.set_flag(EntityFlag::Invisible, false);
            store.put_float(EntityDataKey::Scale, 0.0);
            self.drop_twin(session);
        }

        self.recalculate_closest_pose();
        self.flush_metadata(session);
    }

    fn spawn_twin(&mut self, session: &mut impl Session) {
        let runtime_id = match session.next_entity_id() {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    "No runtime id for the name tag of armor stand {}, showing armor only: {err}",
                    self.base.java_id
                );
                let scale = self.size_scale();
                self.base.metadata.put_float(EntityDataKey::Scale, scale);
                self.base.metadata.set_flag(EntityFlag::Invisible, true);
                if self.last_position_included_offset {
                    self.update_position(session);
                }
                return;
            }
        };

        let mut base = EntityBase::new(
            self.base.java_id,
            runtime_id,
            self.base.definition.clone(),
            self.base.position,
            self.base.motion,
            self.base.rotation,
        );
        base.on_ground = self.base.on_ground;
        base.y_offset = self.base.y_offset;
        base.metadata = self.base.metadata.clone();
        base.metadata.set_flag(EntityFlag::Invisible, false);
        base.metadata.put_float(EntityDataKey::Scale, 0.0);
        base.metadata.put_float(EntityDataKey::BoundingBoxWidth, 0.0);
        base.metadata.put_float(EntityDataKey::BoundingBoxHeight, 0.0);

        let mut twin = ArmorStand::with_role(base, StandRole::NameTag);
        twin.is_small = self.is_small;
        twin.show_hands = self.show_hands;
        twin.pose = self.pose;
        twin.last_position_included_offset = self.last_position_included_offset;
        twin.spawn(session);

        let scale = self.size_scale();
        self.base.metadata.put_float(EntityDataKey::Scale, scale);
        self.base.metadata.set_flag(EntityFlag::Invisible, true);

        self.update_position(session);
        twin.update_position_with_offset(session);
        debug!(
            "Spawned name tag stand {runtime_id} for armor stand {}",
            self.base.java_id
        );
        self.role = StandRole::Primary {
            twin: Some(Box::new(twin)),
        };
    }

    /// Despawn and forget the twin. Returns whether there was one.
    fn drop_twin(&mut self, session: &mut impl Session) -> bool {
        let StandRole::Primary { twin } = &mut self.role else {
            return false;
        };
        match twin.take() {
            Some(mut twin) => {
                twin.despawn(session);
                debug!(
                    "Despawned name tag stand {} of armor stand {}",
                    twin.runtime_id(),
                    self.base.java_id
                );
                true
            }
            None => false,
        }
    }

    /// Send the position without the name tag offset.
    fn update_position(&mut self, session: &mut impl Session) {
        if self.last_position_included_offset {
            self.set_offset_included(false);
        }
        self.base
            .send_position(session, Facing::collapsed(self.base.rotation), false);
    }

    /// Send the position with the name tag offset.
    fn update_position_with_offset(&mut self, session: &mut impl Session) {
        if !self.last_position_included_offset {
            self.set_offset_included(true);
        }
        self.base
            .send_position(session, Facing::collapsed(self.base.rotation), false);
    }

    /// Send the twin's metadata, then this stand's.
    pub fn flush_metadata(&self, session: &mut impl Session) {
        if let Some(twin) = self.twin() {
            twin.flush_metadata(session);
        }
        self.base.flush_metadata(session);
    }
}
