//! The outgoing (Bedrock) view of one entity: keyed data fields plus the
//! actor flag set.
//!
//! The store is a plain value. Cloning it clones the flags too, so two
//! entities never share flag storage.

use std::collections::HashMap;

use mc_bridge_proto::entity_data::{EntityMetadataEntry, MetadataValue};

/// Bedrock actor data keys used by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum EntityDataKey {
    Nametag = 4,
    AirSupply = 7,
    Scale = 38,
    MaxAirSupply = 42,
    BoundingBoxWidth = 53,
    BoundingBoxHeight = 54,
    ArmorStandPoseIndex = 78,
    AlwaysShowNametag = 81,
}

impl EntityDataKey {
    /// Key the flag set is written under (as a `Long` bitmask).
    pub const FLAGS: u32 = 0;

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Bedrock actor flags (bit positions in the `FLAGS` long).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EntityFlag {
    OnFire = 0,
    Sneaking = 1,
    Sprinting = 3,
    Invisible = 5,
    CanShowName = 14,
    AlwaysShowName = 15,
    Silent = 17,
    CanClimb = 19,
    Gliding = 32,
    HasCollision = 47,
    HasGravity = 48,
    Swimming = 56,
}

/// Bit set of [`EntityFlag`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityFlags(u64);

impl EntityFlags {
    pub fn get(&self, flag: EntityFlag) -> bool {
        self.0 & (1 << flag as u8) != 0
    }

    pub fn set(&mut self, flag: EntityFlag, value: bool) {
        if value {
            self.0 |= 1 << flag as u8;
        } else {
            self.0 &= !(1 << flag as u8);
        }
    }

    pub fn bits(&self) -> u64 {
        self.0
    }
}

/// Keyed actor data plus flags. Absent keys mean "protocol default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMetadataStore {
    values: HashMap<EntityDataKey, MetadataValue>,
    flags: EntityFlags,
}

impl EntityMetadataStore {
    pub fn put(&mut self, key: EntityDataKey, value: MetadataValue) {
        self.values.insert(key, value);
    }

    pub fn put_float(&mut self, key: EntityDataKey, value: f32) {
        self.put(key, MetadataValue::Float(value));
    }

    pub fn get(&self, key: EntityDataKey) -> Option<&MetadataValue> {
        self.values.get(&key)
    }

    pub fn get_float(&self, key: EntityDataKey) -> Option<f32> {
        match self.values.get(&key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: EntityDataKey) -> Option<i32> {
        match self.values.get(&key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// String value, or `""` when the key is unset.
    pub fn get_string(&self, key: EntityDataKey) -> &str {
        match self.values.get(&key) {
            Some(MetadataValue::String(s)) => s,
            _ => "",
        }
    }

    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    pub fn put_flags(&mut self, flags: EntityFlags) {
        self.flags = flags;
    }

    pub fn flag(&self, flag: EntityFlag) -> bool {
        self.flags.get(flag)
    }

    pub fn set_flag(&mut self, flag: EntityFlag, value: bool) {
        self.flags.set(flag, value);
    }

    /// Full-state wire entries, flags first, then by ascending key.
    pub fn to_entries(&self) -> Vec<EntityMetadataEntry> {
        let mut keys: Vec<_> = self.values.keys().copied().collect();
        keys.sort();
        let mut entries = Vec::with_capacity(keys.len() + 1);
        entries.push(EntityMetadataEntry::new(
            EntityDataKey::FLAGS,
            MetadataValue::Long(self.flags.bits() as i64),
        ));
        for key in keys {
            entries.push(EntityMetadataEntry::new(key.id(), self.values[&key].clone()));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_write_wins() {
        let mut store = EntityMetadataStore::default();
        store.put_float(EntityDataKey::Scale, 1.0);
        store.put_float(EntityDataKey::Scale, 0.55);
        assert_eq!(store.get_float(EntityDataKey::Scale), Some(0.55));
    }

    #[test]
    fn absent_string_is_empty() {
        let store = EntityMetadataStore::default();
        assert_eq!(store.get_string(EntityDataKey::Nametag), "");
        assert!(store.get(EntityDataKey::Nametag).is_none());
    }

    #[test]
    fn typed_getters_reject_other_types() {
        let mut store = EntityMetadataStore::default();
        store.put(EntityDataKey::Scale, MetadataValue::Int(1));
        assert_eq!(store.get_float(EntityDataKey::Scale), None);
        assert_eq!(store.get_int(EntityDataKey::Scale), Some(1));
    }

    #[test]
    fn flag_bits() {
        let mut flags = EntityFlags::default();
        flags.set(EntityFlag::Invisible, true);
        flags.set(EntityFlag::HasGravity, true);
        assert_eq!(flags.bits(), (1 << 5) | (1 << 48));
        flags.set(EntityFlag::Invisible, false);
        assert!(!flags.get(EntityFlag::Invisible));
        assert!(flags.get(EntityFlag::HasGravity));
    }

    #[test]
    fn clone_does_not_share_flags() {
        let mut primary = EntityMetadataStore::default();
        primary.set_flag(EntityFlag::Invisible, true);
        let mut copy = primary.clone();
        copy.set_flag(EntityFlag::Invisible, false);
        assert!(primary.flag(EntityFlag::Invisible));
        assert!(!copy.flag(EntityFlag::Invisible));
    }

    #[test]
    fn entries_are_ordered_with_flags_first() {
        let mut store = EntityMetadataStore::default();
        store.put(EntityDataKey::ArmorStandPoseIndex, MetadataValue::Int(3));
        store.put_float(EntityDataKey::Scale, 1.0);
        store.put(EntityDataKey::Nametag, MetadataValue::String("Bob".into()));
        store.set_flag(EntityFlag::Invisible, true);
        let keys: Vec<u32> = store.to_entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![0, 4, 38, 78]);
        assert_eq!(store.to_entries()[0].value, MetadataValue::Long(32));
    }
}
