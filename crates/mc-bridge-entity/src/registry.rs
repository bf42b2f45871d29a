//! Entity kind definitions.
//!
//! Maps Bedrock identifiers to bounding box dimensions and the translation
//! behavior the cache should use for that kind.

/// Which translator handles an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityBehavior {
    /// Shared metadata only (fields 0..=5).
    Generic,
    /// Armor stand translation with poses and the name-tag twin.
    ArmorStand,
}

/// Definition of an entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    /// Bedrock identifier, e.g. `"minecraft:armor_stand"`.
    pub identifier: String,
    /// Bounding box width.
    pub width: f32,
    /// Bounding box height.
    pub height: f32,
    pub behavior: EntityBehavior,
}

impl EntityDefinition {
    pub fn new(identifier: impl Into<String>, width: f32, height: f32, behavior: EntityBehavior) -> Self {
        Self {
            identifier: identifier.into(),
            width,
            height,
            behavior,
        }
    }

    pub fn armor_stand() -> Self {
        Self::new(ARMOR_STAND, 0.5, 1.975, EntityBehavior::ArmorStand)
    }
}

pub const ARMOR_STAND: &str = "minecraft:armor_stand";

/// Registry of known entity kinds.
#[derive(Debug, Clone)]
pub struct EntityKindRegistry {
    kinds: Vec<EntityDefinition>,
}

impl Default for EntityKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityKindRegistry {
    /// Build the registry with the built-in kinds.
    pub fn new() -> Self {
        use EntityBehavior::Generic;
        Self {
            kinds: vec![
                EntityDefinition::armor_stand(),
                EntityDefinition::new("minecraft:zombie", 0.6, 1.95, Generic),
                EntityDefinition::new("minecraft:skeleton", 0.6, 1.99, Generic),
                EntityDefinition::new("minecraft:cow", 0.9, 1.4, Generic),
                EntityDefinition::new("minecraft:pig", 0.9, 0.9, Generic),
                EntityDefinition::new("minecraft:chicken", 0.4, 0.7, Generic),
            ],
        }
    }

    /// Look up a kind by its Bedrock identifier.
    pub fn get(&self, identifier: &str) -> Option<&EntityDefinition> {
        self.kinds.iter().find(|k| k.identifier == identifier)
    }

    pub fn all(&self) -> &[EntityDefinition] {
        &self.kinds
    }

    /// Add a kind, replacing any existing one with the same identifier.
    pub fn register(&mut self, def: EntityDefinition) {
        if let Some(existing) = self.kinds.iter_mut().find(|k| k.identifier == def.identifier) {
            *existing = def;
        } else {
            self.kinds.push(def);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_armor_stand() {
        let reg = EntityKindRegistry::new();
        let stand = reg.get(ARMOR_STAND).unwrap();
        assert_eq!(stand.width, 0.5);
        assert_eq!(stand.height, 1.975);
        assert_eq!(stand.behavior, EntityBehavior::ArmorStand);
    }

    #[test]
    fn unknown_kind() {
        assert!(EntityKindRegistry::new().get("minecraft:dragon").is_none());
    }

    #[test]
    fn register_replaces_existing() {
        let mut reg = EntityKindRegistry::new();
        let count = reg.all().len();
        reg.register(EntityDefinition::new("minecraft:pig", 1.0, 1.0, EntityBehavior::Generic));
        assert_eq!(reg.all().len(), count);
        assert_eq!(reg.get("minecraft:pig").unwrap().width, 1.0);

        reg.register(EntityDefinition::new("custom:golem", 1.4, 2.7, EntityBehavior::Generic));
        assert_eq!(reg.all().len(), count + 1);
    }
}
