//! The per-connection boundary the entity layer talks to.

use std::sync::atomic::{AtomicU64, Ordering};

use mc_bridge_proto::packets::UpstreamPacket;

use crate::error::EntityError;

/// Outbound side of one client connection.
pub trait Session {
    /// Queue a packet for the Bedrock client.
    fn send_upstream(&mut self, packet: UpstreamPacket);

    /// Reserve a fresh runtime id for a bridge-created entity.
    fn next_entity_id(&mut self) -> Result<u64, EntityError>;
}

/// Largest id handed out. Unique ids travel as signed 64-bit values.
pub const MAX_ENTITY_ID: u64 = i64::MAX as u64;

/// Monotonic runtime id source. Never reuses an id.
#[derive(Debug)]
pub struct EntityIdAllocator {
    next: AtomicU64,
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl EntityIdAllocator {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Allocate the next id, or fail once the id space is used up.
    pub fn allocate(&self) -> Result<u64, EntityError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| {
                (id <= MAX_ENTITY_ID).then(|| id + 1)
            })
            .map_err(|_| EntityError::IdsExhausted)
    }

    /// Next id that will be handed out.
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// A session that keeps every packet in order instead of writing to a socket.
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub allocator: EntityIdAllocator,
    packets: Vec<UpstreamPacket>,
}

impl RecordingSession {
    pub fn new(first_runtime_id: u64) -> Self {
        Self {
            allocator: EntityIdAllocator::new(first_runtime_id),
            packets: Vec::new(),
        }
    }

    pub fn packets(&self) -> &[UpstreamPacket] {
        &self.packets
    }

    /// Drain the recorded packets.
    pub fn take(&mut self) -> Vec<UpstreamPacket> {
        std::mem::take(&mut self.packets)
    }

    /// Packets addressed to the given runtime id.
    pub fn packets_for(&self, runtime_id: u64) -> Vec<&UpstreamPacket> {
        self.packets
            .iter()
            .filter(|p| target_runtime_id(p) == Some(runtime_id))
            .collect()
    }
}

impl Session for RecordingSession {
    fn send_upstream(&mut self, packet: UpstreamPacket) {
        self.packets.push(packet);
    }

    fn next_entity_id(&mut self) -> Result<u64, EntityError> {
        self.allocator.allocate()
    }
}

/// Runtime id a packet addresses. `RemoveEntity` carries the unique id,
/// which the bridge keeps equal to the runtime id.
pub fn target_runtime_id(packet: &UpstreamPacket) -> Option<u64> {
    match packet {
        UpstreamPacket::AddActor(p) => Some(p.entity_runtime_id),
        UpstreamPacket::RemoveEntity(p) => u64::try_from(p.entity_unique_id).ok(),
        UpstreamPacket::MoveActorAbsolute(p) => Some(p.entity_runtime_id),
        UpstreamPacket::SetEntityData(p) => Some(p.entity_runtime_id),
        UpstreamPacket::MobEquipment(p) => Some(p.entity_runtime_id),
        UpstreamPacket::MobArmorEquipment(p) => Some(p.entity_runtime_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_bridge_proto::packets::RemoveEntity;

    #[test]
    fn allocator_is_monotonic() {
        let alloc = EntityIdAllocator::new(10);
        assert_eq!(alloc.allocate(), Ok(10));
        assert_eq!(alloc.allocate(), Ok(11));
        assert_eq!(alloc.current(), 12);
    }

    #[test]
    fn allocator_reports_exhaustion() {
        let alloc = EntityIdAllocator::new(MAX_ENTITY_ID - 1);
        assert_eq!(alloc.allocate(), Ok(MAX_ENTITY_ID - 1));
        assert_eq!(alloc.allocate(), Ok(MAX_ENTITY_ID));
        assert_eq!(alloc.allocate(), Err(EntityError::IdsExhausted));
        assert_eq!(alloc.allocate(), Err(EntityError::IdsExhausted));
    }

    #[test]
    fn last_id_still_maps_back_from_remove() {
        let mut session = RecordingSession::new(MAX_ENTITY_ID);
        let id = session.next_entity_id().unwrap();
        session.send_upstream(UpstreamPacket::RemoveEntity(RemoveEntity {
            entity_unique_id: id as i64,
        }));
        assert_eq!(target_runtime_id(&session.packets()[0]), Some(MAX_ENTITY_ID));
        assert_eq!(session.next_entity_id(), Err(EntityError::IdsExhausted));
    }

    #[test]
    fn start_beyond_signed_range_is_exhausted() {
        let alloc = EntityIdAllocator::new(u64::MAX);
        assert_eq!(alloc.allocate(), Err(EntityError::IdsExhausted));
    }

    #[test]
    fn recording_session_keeps_order() {
        let mut session = RecordingSession::new(1);
        session.send_upstream(UpstreamPacket::RemoveEntity(RemoveEntity { entity_unique_id: 5 }));
        session.send_upstream(UpstreamPacket::RemoveEntity(RemoveEntity { entity_unique_id: 6 }));
        assert_eq!(session.packets().len(), 2);
        assert_eq!(session.packets_for(6).len(), 1);
        let drained = session.take();
        assert_eq!(target_runtime_id(&drained[0]), Some(5));
        assert!(session.packets().is_empty());
    }
}
