//! Runs a scripted event list against one session's entity cache.

use bytes::BytesMut;
use mc_bridge_entity::{
    EntityBehavior, EntityCache, EntityDefinition, EntityKindRegistry, EquipmentSlot,
    RecordingSession, Session,
};
use mc_bridge_proto::codec::ProtoEncode;
use mc_bridge_proto::item_stack::ItemStack;
use mc_bridge_proto::java_metadata::{decode_entity_metadata, JavaMetadata, JavaMetadataValue, Rotation};
use mc_bridge_proto::packets::UpstreamPacket;
use tracing::{info, warn};

use crate::config::{BehaviorConfig, FieldConfig, ReplayConfig, ReplayEvent, ReplayValue, SlotConfig};
use crate::error::ReplayError;

/// Outcome of one replay.
#[derive(Debug, Default)]
pub struct ReplaySummary {
    /// Every packet sent to the client, in order.
    pub packets: Vec<UpstreamPacket>,
    /// Total encoded size of `packets`.
    pub bytes: usize,
    /// Events that could not be applied.
    pub skipped: usize,
}

fn slot(slot: SlotConfig) -> EquipmentSlot {
    match slot {
        SlotConfig::Helmet => EquipmentSlot::Helmet,
        SlotConfig::Chestplate => EquipmentSlot::Chestplate,
        SlotConfig::Leggings => EquipmentSlot::Leggings,
        SlotConfig::Boots => EquipmentSlot::Boots,
        SlotConfig::MainHand => EquipmentSlot::MainHand,
        SlotConfig::OffHand => EquipmentSlot::OffHand,
    }
}

fn java_field(field: &FieldConfig) -> JavaMetadata {
    let value = match &field.value {
        ReplayValue::Byte(v) => JavaMetadataValue::Byte(*v),
        ReplayValue::Int(v) => JavaMetadataValue::VarInt(*v),
        ReplayValue::Float(v) => JavaMetadataValue::Float(*v),
        ReplayValue::Boolean(v) => JavaMetadataValue::Boolean(*v),
        ReplayValue::Text(v) => JavaMetadataValue::String(v.clone()),
        ReplayValue::Name(name) if name.is_empty() => JavaMetadataValue::OptChat(None),
        ReplayValue::Name(name) => {
            JavaMetadataValue::OptChat(Some(serde_json::json!({ "text": name }).to_string()))
        }
        ReplayValue::Rotation([pitch, yaw, roll]) => {
            JavaMetadataValue::Rotation(Rotation::new(*pitch, *yaw, *roll))
        }
    };
    JavaMetadata::new(field.index, value)
}

/// Build the kind registry: built-ins plus configured kinds.
pub fn registry(config: &ReplayConfig) -> EntityKindRegistry {
    let mut registry = EntityKindRegistry::new();
    for kind in &config.entities.kinds {
        let behavior = match kind.behavior {
            BehaviorConfig::Generic => EntityBehavior::Generic,
            BehaviorConfig::ArmorStand => EntityBehavior::ArmorStand,
        };
        registry.register(EntityDefinition::new(
            kind.identifier.clone(),
            kind.width,
            kind.height,
            behavior,
        ));
    }
    registry
}

/// Play every event in order and collect what the client would receive.
pub fn run(config: &ReplayConfig) -> ReplaySummary {
    let mut cache = EntityCache::new(registry(config));
    let mut session = RecordingSession::new(config.entities.first_runtime_id);
    let mut summary = ReplaySummary::default();

    for (index, event) in config.events.iter().enumerate() {
        if let Err(e) = apply_event(&mut cache, &mut session, event) {
            warn!("Event {index} skipped: {e}");
            summary.skipped += 1;
        }
        drain(&mut session, index, &mut summary);
    }

    if config.entities.despawn_on_exit {
        cache.despawn_all(&mut session);
        drain(&mut session, config.events.len(), &mut summary);
    }
    summary
}

fn apply_event(
    cache: &mut EntityCache,
    session: &mut impl Session,
    event: &ReplayEvent,
) -> Result<(), ReplayError> {
    match event {
        ReplayEvent::Spawn {
            id,
            kind,
            position,
            motion,
            rotation,
        } => {
            cache.spawn(session, *id, kind, *position, *motion, *rotation)?;
        }
        ReplayEvent::MoveAbsolute {
            id,
            position,
            rotation,
            on_ground,
            teleported,
        } => cache.move_absolute(session, *id, *position, *rotation, *on_ground, *teleported),
        ReplayEvent::MoveRelative {
            id,
            delta,
            rotation,
            on_ground,
        } => cache.move_relative(session, *id, *delta, *rotation, *on_ground),
        ReplayEvent::Metadata { id, fields } => {
            let fields: Vec<JavaMetadata> = fields.iter().map(java_field).collect();
            cache.apply_metadata(session, *id, &fields);
        }
        ReplayEvent::RawMetadata { id, data } => {
            let raw = hex::decode(data.trim())?;
            let fields = decode_entity_metadata(&mut raw.as_slice())?;
            cache.apply_metadata(session, *id, &fields);
        }
        ReplayEvent::Equipment { id, items } => {
            let items = items
                .iter()
                .map(|i| (slot(i.slot), ItemStack::new(i.item, i.count)))
                .collect();
            cache.set_equipment(session, *id, items);
        }
        ReplayEvent::Passengers { id, passengers } => cache.set_passengers(*id, passengers.clone()),
        ReplayEvent::Despawn { id } => {
            cache.despawn(session, *id);
        }
    }
    Ok(())
}

fn drain(session: &mut RecordingSession, index: usize, summary: &mut ReplaySummary) {
    for packet in session.take() {
        let mut buf = BytesMut::new();
        packet.proto_encode(&mut buf);
        info!(
            "[{index}] {} (0x{:02X}) -> {} bytes",
            packet.name(),
            packet.packet_id(),
            buf.len()
        );
        summary.bytes += buf.len();
        summary.packets.push(packet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
        [[events]]
        type = "spawn"
        id = 10
        kind = "minecraft:armor_stand"
        position = [0.5, 64.0, 0.5]

        [[events]]
        type = "metadata"
        id = 10
        fields = [{ index = 0, value = { byte = 32 } }]

        [[events]]
        type = "equipment"
        id = 10
        items = [{ slot = "helmet", item = 310 }]

        [[events]]
        type = "metadata"
        id = 10
        fields = [{ index = 2, value = { name = "Bob" } }]
    "#;

    fn count(summary: &ReplaySummary, pred: impl Fn(&UpstreamPacket) -> bool) -> usize {
        summary.packets.iter().filter(|p| pred(*p)).count()
    }

    #[test]
    fn name_tag_twin_is_spawned_and_cleaned_up() {
        let config = ReplayConfig::parse(SCRIPT).unwrap();
        let summary = run(&config);

        assert_eq!(summary.skipped, 0);
        assert_eq!(count(&summary, |p| matches!(p, UpstreamPacket::AddActor(_))), 2);
        assert_eq!(count(&summary, |p| matches!(p, UpstreamPacket::RemoveEntity(_))), 2);
        assert!(summary.bytes > 0);
        match summary.packets.last() {
            Some(UpstreamPacket::RemoveEntity(r)) => assert_eq!(r.entity_unique_id, 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_skipped() {
        let config = ReplayConfig::parse(
            r#"
            [[events]]
            type = "spawn"
            id = 1
            kind = "minecraft:warden"
            "#,
        )
        .unwrap();
        let summary = run(&config);
        assert_eq!(summary.skipped, 1);
        assert!(summary.packets.is_empty());
    }

    #[test]
    fn configured_kind_spawns() {
        let config = ReplayConfig::parse(
            r#"
            [entities]
            first_runtime_id = 7
            despawn_on_exit = false

            [[entities.kinds]]
            identifier = "custom:statue"
            width = 0.5
            height = 1.975
            behavior = "armor_stand"

            [[events]]
            type = "spawn"
            id = 1
            kind = "custom:statue"
            "#,
        )
        .unwrap();
        let summary = run(&config);
        assert_eq!(summary.packets.len(), 1);
        match &summary.packets[0] {
            UpstreamPacket::AddActor(a) => {
                assert_eq!(a.entity_runtime_id, 7);
                assert_eq!(a.entity_type, "custom:statue");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn raw_metadata_hides_stand() {
        let config = ReplayConfig::parse(
            r#"
            [entities]
            despawn_on_exit = false

            [[events]]
            type = "spawn"
            id = 3
            kind = "minecraft:armor_stand"

            [[events]]
            type = "raw_metadata"
            id = 3
            data = "000020ff"

            [[events]]
            type = "raw_metadata"
            id = 3
            data = "0000"

            [[events]]
            type = "raw_metadata"
            id = 3
            data = "zz"
            "#,
        )
        .unwrap();
        let summary = run(&config);

        assert_eq!(summary.skipped, 2);
        match summary.packets.last() {
            Some(UpstreamPacket::SetEntityData(p)) => assert_eq!(p.entity_runtime_id, 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_name_clears_custom_name() {
        let field = FieldConfig {
            index: 2,
            value: ReplayValue::Name(String::new()),
        };
        assert_eq!(java_field(&field).value, JavaMetadataValue::OptChat(None));
    }
}
