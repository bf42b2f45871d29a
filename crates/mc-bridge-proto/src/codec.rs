//! Encoding/decoding traits and shared string helpers.

use bytes::{Buf, BufMut};

use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Fail with `BufferTooShort` unless `needed` bytes are left.
pub fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        return Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Write a length-prefixed string (VarUInt32 length + UTF-8).
///
/// Both editions share this layout for plain strings.
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarUInt32(s.len() as u32).proto_encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Read a length-prefixed string (VarUInt32 length + UTF-8).
pub fn read_string(buf: &mut impl Buf) -> Result<String, ProtoError> {
    let len = VarUInt32::proto_decode(buf)?.0 as usize;
    ensure_remaining(buf, len)?;
    let data = buf.copy_to_bytes(len);
    String::from_utf8(data.to_vec()).map_err(|_| ProtoError::InvalidUtf8)
}
