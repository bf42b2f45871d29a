use mc_bridge_proto::types::Vec3;
use serde::Deserialize;
use std::path::Path;

use crate::error::ReplayError;

#[derive(Debug, Deserialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub entities: EntitiesSection,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EntitiesSection {
    /// First Bedrock runtime id handed out. Default: 1.
    #[serde(default = "default_first_runtime_id")]
    pub first_runtime_id: u64,
    /// Despawn whatever is still tracked when the script ends. Default: true.
    #[serde(default = "default_true")]
    pub despawn_on_exit: bool,
    /// Extra entity kinds, registered on top of the built-in ones.
    #[serde(default)]
    pub kinds: Vec<KindConfig>,
}

fn default_first_runtime_id() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for EntitiesSection {
    fn default() -> Self {
        Self {
            first_runtime_id: default_first_runtime_id(),
            despawn_on_exit: true,
            kinds: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KindConfig {
    pub identifier: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorConfig {
    #[default]
    Generic,
    ArmorStand,
}

/// One scripted inbound update.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Spawn {
        id: i64,
        kind: String,
        #[serde(default)]
        position: Vec3,
        #[serde(default)]
        motion: Vec3,
        /// `[yaw, pitch, head_yaw]`.
        #[serde(default)]
        rotation: Vec3,
    },
    MoveAbsolute {
        id: i64,
        position: Vec3,
        #[serde(default)]
        rotation: Vec3,
        #[serde(default)]
        on_ground: bool,
        #[serde(default)]
        teleported: bool,
    },
    MoveRelative {
        id: i64,
        delta: Vec3,
        #[serde(default)]
        rotation: Vec3,
        #[serde(default)]
        on_ground: bool,
    },
    Metadata {
        id: i64,
        fields: Vec<FieldConfig>,
    },
    /// A Java metadata list as captured off the wire, hex encoded.
    RawMetadata {
        id: i64,
        data: String,
    },
    Equipment {
        id: i64,
        items: Vec<ItemConfig>,
    },
    Passengers {
        id: i64,
        #[serde(default)]
        passengers: Vec<i64>,
    },
    Despawn {
        id: i64,
    },
}

/// One Java metadata field.
#[derive(Debug, Deserialize)]
pub struct FieldConfig {
    pub index: u8,
    pub value: ReplayValue,
}

/// A Java metadata value, written as a one-key table such as `{ byte = 32 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayValue {
    Byte(u8),
    Int(i32),
    Float(f32),
    Boolean(bool),
    Text(String),
    /// Custom name as plain text; an empty string clears it.
    Name(String),
    /// `[pitch, yaw, roll]`.
    Rotation([f32; 3]),
}

#[derive(Debug, Deserialize)]
pub struct ItemConfig {
    pub slot: SlotConfig,
    /// Bedrock item runtime id; 0 is air.
    #[serde(default)]
    pub item: i32,
    #[serde(default = "default_count")]
    pub count: u16,
}

fn default_count() -> u16 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotConfig {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    MainHand,
    OffHand,
}

impl ReplayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ReplayError> {
        let config: Self = toml::from_str(contents)?;
        for kind in &config.entities.kinds {
            if !(kind.width > 0.0 && kind.height > 0.0) {
                return Err(ReplayError::InvalidKind {
                    identifier: kind.identifier.clone(),
                });
            }
        }
        Ok(config)
    }
}
