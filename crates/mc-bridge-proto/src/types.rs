//! Base data types: variable-length integers and the `Vec3` primitive.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{ensure_remaining, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum VarIntError {
    #[error("buffer too short")]
    BufferTooShort,
    #[error("VarInt is too long (more than {max_bytes} bytes)")]
    TooManyBytes { max_bytes: usize },
}

// ---------------------------------------------------------------------------
// LEB128 core
// ---------------------------------------------------------------------------

fn put_leb128(buf: &mut impl BufMut, mut value: u64) {
    while value & !0x7F != 0 {
        buf.put_u8((value & 0x7F | 0x80) as u8);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn get_leb128(buf: &mut impl Buf, max_bytes: usize) -> Result<u64, VarIntError> {
    let mut result: u64 = 0;
    for i in 0..max_bytes {
        if !buf.has_remaining() {
            return Err(VarIntError::BufferTooShort);
        }
        let byte = buf.get_u8();
        result |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(VarIntError::TooManyBytes { max_bytes })
}

#[inline]
fn zigzag_encode_32(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

#[inline]
fn zigzag_decode_32(v: u32) -> i32 {
    (v >> 1) as i32 ^ -((v & 1) as i32)
}

#[inline]
fn zigzag_encode_64(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

#[inline]
fn zigzag_decode_64(v: u64) -> i64 {
    (v >> 1) as i64 ^ -((v & 1) as i64)
}

// ---------------------------------------------------------------------------
// Variable-length integer newtypes
// ---------------------------------------------------------------------------

/// Signed 32-bit, ZigZag + LEB128 (Bedrock `varint`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarInt(pub i32);

/// Signed 64-bit, ZigZag + LEB128. Used for entity unique ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarLong(pub i64);

/// Unsigned 32-bit, plain LEB128.
///
/// Bedrock uses it for lengths and ids. The Java edition's `VarInt` has the
/// same layout, so source-side decoding reads this and reinterprets as `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarUInt32(pub u32);

/// Unsigned 64-bit, plain LEB128. Used for entity runtime ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarUInt64(pub u64);

impl VarInt {
    pub const MAX_BYTES: usize = 5;
}

impl VarLong {
    pub const MAX_BYTES: usize = 10;
}

impl VarUInt32 {
    pub const MAX_BYTES: usize = 5;
}

impl VarUInt64 {
    pub const MAX_BYTES: usize = 10;
}

impl ProtoEncode for VarInt {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        put_leb128(buf, u64::from(zigzag_encode_32(self.0)));
    }
}

impl ProtoDecode for VarInt {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let raw = get_leb128(buf, Self::MAX_BYTES)?;
        Ok(VarInt(zigzag_decode_32(raw as u32)))
    }
}

impl ProtoEncode for VarLong {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        put_leb128(buf, zigzag_encode_64(self.0));
    }
}

impl ProtoDecode for VarLong {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let raw = get_leb128(buf, Self::MAX_BYTES)?;
        Ok(VarLong(zigzag_decode_64(raw)))
    }
}

impl ProtoEncode for VarUInt32 {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        put_leb128(buf, u64::from(self.0));
    }
}

impl ProtoDecode for VarUInt32 {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let raw = get_leb128(buf, Self::MAX_BYTES)?;
        Ok(VarUInt32(raw as u32))
    }
}

impl ProtoEncode for VarUInt64 {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        put_leb128(buf, self.0);
    }
}

impl ProtoDecode for VarUInt64 {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(VarUInt64(get_leb128(buf, Self::MAX_BYTES)?))
    }
}

// ---------------------------------------------------------------------------
// Vec3 (f32 x, y, z)
// ---------------------------------------------------------------------------

/// Three floats. Positions, motion, rotations and armor-stand joint angles
/// all use it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance; the pose matcher compares these directly.
    pub fn distance_squared(&self, other: &Vec3) -> f32 {
        let d = *self - *other;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    pub fn with_y_offset(self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy, self.z)
    }
}

impl ProtoEncode for Vec3 {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_f32_le(self.x);
        buf.put_f32_le(self.y);
        buf.put_f32_le(self.z);
    }
}

impl ProtoDecode for Vec3 {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 12)?;
        Ok(Self {
            x: buf.get_f32_le(),
            y: buf.get_f32_le(),
            z: buf.get_f32_le(),
        })
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn encoded(value: &impl ProtoEncode) -> BytesMut {
        let mut buf = BytesMut::new();
        value.proto_encode(&mut buf);
        buf
    }

    #[test]
    fn varint_zigzag_layout() {
        assert_eq!(&encoded(&VarInt(1))[..], &[0x02]);
        assert_eq!(&encoded(&VarInt(-1))[..], &[0x01]);
        assert_eq!(&encoded(&VarInt(64))[..], &[0x80, 0x01]);
    }

    #[test]
    fn varint_extremes_decode() {
        for value in [0, 1, -1, i32::MAX, i32::MIN] {
            let decoded = VarInt::proto_decode(&mut encoded(&VarInt(value)).freeze()).unwrap();
            assert_eq!(decoded.0, value);
        }
    }

    #[test]
    fn varlong_unique_id() {
        // 42 zigzags to 84 (0x54)
        assert_eq!(&encoded(&VarLong(42))[..], &[0x54]);
        let decoded = VarLong::proto_decode(&mut encoded(&VarLong(i64::MIN)).freeze()).unwrap();
        assert_eq!(decoded.0, i64::MIN);
    }

    #[test]
    fn varuint_not_zigzag() {
        assert_eq!(&encoded(&VarUInt32(1))[..], &[0x01]);
        assert_eq!(&encoded(&VarUInt64(300))[..], &[0xAC, 0x02]);
        let decoded = VarUInt64::proto_decode(&mut encoded(&VarUInt64(u64::MAX)).freeze()).unwrap();
        assert_eq!(decoded.0, u64::MAX);
    }

    #[test]
    fn varuint_truncated() {
        let mut buf = bytes::Bytes::from_static(&[0x80]);
        assert!(VarUInt32::proto_decode(&mut buf).is_err());
    }

    #[test]
    fn varuint_too_long() {
        let mut buf = bytes::Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert!(matches!(
            VarUInt32::proto_decode(&mut buf),
            Err(ProtoError::VarInt(VarIntError::TooManyBytes { max_bytes: 5 }))
        ));
    }

    #[test]
    fn vec3_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(a + b, Vec3::new(5.0, 8.0, 6.0));
        assert_eq!(b - a, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn vec3_distance_squared() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(b.distance_squared(&b), 0.0);
    }

    #[test]
    fn vec3_y_offset() {
        let p = Vec3::new(1.5, 64.0, -2.0);
        assert_eq!(p.with_y_offset(1.975), Vec3::new(1.5, 64.0 + 1.975, -2.0));
    }

    #[test]
    fn vec3_wire_layout() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        let buf = encoded(&v);
        assert_eq!(buf.len(), 12);
        assert_eq!(Vec3::proto_decode(&mut buf.freeze()).unwrap(), v);
    }
}
