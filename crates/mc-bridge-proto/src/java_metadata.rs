//! Java edition entity metadata (the source side of the bridge).
//!
//! Wire layout is a list of `(u8 index, VarInt type, value)` entries closed
//! by an index of `0xFF`. Java numbers are big-endian and its `VarInt` is plain
//! LEB128, which is why this module reads through `VarUInt32`.

use bytes::Buf;

use crate::codec::{ensure_remaining, read_string, ProtoDecode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Index byte that terminates a metadata list.
pub const END_OF_METADATA: u8 = 0xFF;

/// Java metadata type ids (1.16 numbering).
pub mod type_id {
    pub const BYTE: u32 = 0;
    pub const VAR_INT: u32 = 1;
    pub const FLOAT: u32 = 2;
    pub const STRING: u32 = 3;
    pub const CHAT: u32 = 4;
    pub const OPT_CHAT: u32 = 5;
    pub const SLOT: u32 = 6;
    pub const BOOLEAN: u32 = 7;
    pub const ROTATION: u32 = 8;
    pub const POSITION: u32 = 9;
    pub const OPT_POSITION: u32 = 10;
    pub const DIRECTION: u32 = 11;
    pub const OPT_UUID: u32 = 12;
    pub const OPT_BLOCK_ID: u32 = 13;
    pub const NBT: u32 = 14;
    pub const PARTICLE: u32 = 15;
    pub const VILLAGER_DATA: u32 = 16;
    pub const OPT_VAR_INT: u32 = 17;
    pub const POSE: u32 = 18;
}

/// Euler rotation of one armor-stand joint, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotation {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

/// A decoded metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum JavaMetadataValue {
    Byte(u8),
    VarInt(i32),
    Float(f32),
    String(String),
    /// JSON text component.
    Chat(String),
    OptChat(Option<String>),
    Boolean(bool),
    Rotation(Rotation),
    /// Packed block position.
    Position(i64),
    OptPosition(Option<i64>),
    Direction(i32),
    OptUuid(Option<u128>),
    /// Block state id; 0 means absent.
    OptBlockId(i32),
    VillagerData { kind: i32, profession: i32, level: i32 },
    OptVarInt(Option<i32>),
    Pose(i32),
}

impl JavaMetadataValue {
    pub fn type_id(&self) -> u32 {
        match self {
            JavaMetadataValue::Byte(_) => type_id::BYTE,
            JavaMetadataValue::VarInt(_) => type_id::VAR_INT,
            JavaMetadataValue::Float(_) => type_id::FLOAT,
            JavaMetadataValue::String(_) => type_id::STRING,
            JavaMetadataValue::Chat(_) => type_id::CHAT,
            JavaMetadataValue::OptChat(_) => type_id::OPT_CHAT,
            JavaMetadataValue::Boolean(_) => type_id::BOOLEAN,
            JavaMetadataValue::Rotation(_) => type_id::ROTATION,
            JavaMetadataValue::Position(_) => type_id::POSITION,
            JavaMetadataValue::OptPosition(_) => type_id::OPT_POSITION,
            JavaMetadataValue::Direction(_) => type_id::DIRECTION,
            JavaMetadataValue::OptUuid(_) => type_id::OPT_UUID,
            JavaMetadataValue::OptBlockId(_) => type_id::OPT_BLOCK_ID,
            JavaMetadataValue::VillagerData { .. } => type_id::VILLAGER_DATA,
            JavaMetadataValue::OptVarInt(_) => type_id::OPT_VAR_INT,
            JavaMetadataValue::Pose(_) => type_id::POSE,
        }
    }
}

/// One metadata field update for a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaMetadata {
    pub id: u8,
    pub value: JavaMetadataValue,
}

impl JavaMetadata {
    pub fn new(id: u8, value: JavaMetadataValue) -> Self {
        Self { id, value }
    }
}

fn read_var_int(buf: &mut impl Buf) -> Result<i32, ProtoError> {
    Ok(VarUInt32::proto_decode(buf)?.0 as i32)
}

fn read_bool(buf: &mut impl Buf) -> Result<bool, ProtoError> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8() != 0)
}

fn read_f32(buf: &mut impl Buf) -> Result<f32, ProtoError> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_f32())
}

fn read_i64(buf: &mut impl Buf) -> Result<i64, ProtoError> {
    ensure_remaining(buf, 8)?;
    Ok(buf.get_i64())
}

fn read_value(buf: &mut impl Buf, index: u8, kind: u32) -> Result<JavaMetadataValue, ProtoError> {
    let value = match kind {
        type_id::BYTE => {
            ensure_remaining(buf, 1)?;
            JavaMetadataValue::Byte(buf.get_u8())
        }
        type_id::VAR_INT => JavaMetadataValue::VarInt(read_var_int(buf)?),
        type_id::FLOAT => JavaMetadataValue::Float(read_f32(buf)?),
        type_id::STRING => JavaMetadataValue::String(read_string(buf)?),
        type_id::CHAT => JavaMetadataValue::Chat(read_string(buf)?),
        type_id::OPT_CHAT => {
            let present = read_bool(buf)?;
            JavaMetadataValue::OptChat(if present { Some(read_string(buf)?) } else { None })
        }
        type_id::BOOLEAN => JavaMetadataValue::Boolean(read_bool(buf)?),
        type_id::ROTATION => JavaMetadataValue::Rotation(Rotation::new(
            read_f32(buf)?,
            read_f32(buf)?,
            read_f32(buf)?,
        )),
        type_id::POSITION => JavaMetadataValue::Position(read_i64(buf)?),
        type_id::OPT_POSITION => {
            let present = read_bool(buf)?;
            JavaMetadataValue::OptPosition(if present { Some(read_i64(buf)?) } else { None })
        }
        type_id::DIRECTION => JavaMetadataValue::Direction(read_var_int(buf)?),
        type_id::OPT_UUID => {
            let present = read_bool(buf)?;
            let uuid = if present {
                ensure_remaining(buf, 16)?;
                Some(buf.get_u128())
            } else {
                None
            };
            JavaMetadataValue::OptUuid(uuid)
        }
        type_id::OPT_BLOCK_ID => JavaMetadataValue::OptBlockId(read_var_int(buf)?),
        type_id::VILLAGER_DATA => JavaMetadataValue::VillagerData {
            kind: read_var_int(buf)?,
            profession: read_var_int(buf)?,
            level: read_var_int(buf)?,
        },
        type_id::OPT_VAR_INT => {
            // Stored as value + 1 so that 0 can mean absent.
            let raw = read_var_int(buf)?;
            JavaMetadataValue::OptVarInt(if raw == 0 { None } else { Some(raw - 1) })
        }
        type_id::POSE => JavaMetadataValue::Pose(read_var_int(buf)?),
        // Slot, NBT and particle payloads need their own codecs; without them
        // the entry length is unknown and the rest of the list is unreadable.
        _ => {
            return Err(ProtoError::UnsupportedMetadataType {
                index,
                type_id: kind,
            })
        }
    };
    Ok(value)
}

/// Decode a full metadata list from an entity-metadata packet body.
pub fn decode_entity_metadata(buf: &mut impl Buf) -> Result<Vec<JavaMetadata>, ProtoError> {
    let mut entries = Vec::new();
    loop {
        if !buf.has_remaining() {
            return Err(ProtoError::MissingTerminator);
        }
        let index = buf.get_u8();
        if index == END_OF_METADATA {
            return Ok(entries);
        }
        let kind = VarUInt32::proto_decode(buf)?.0;
        let value = read_value(buf, index, kind)?;
        entries.push(JavaMetadata::new(index, value));
    }
}
