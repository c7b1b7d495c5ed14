//! Protocol encoding/decoding traits and helpers.
//!
//! All multi-byte integers on this path are fixed-width big-endian.

use bytes::{Buf, BufMut};

use crate::error::ProtoError;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Fail with `BufferTooShort` unless `needed` bytes remain.
pub fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        return Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Read a fixed-width signed 32-bit integer.
pub fn read_i32(buf: &mut impl Buf) -> Result<i32, ProtoError> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_i32())
}

/// Write a packet id byte followed by the packet body.
pub fn write_packet(buf: &mut impl BufMut, id: u8, packet: &impl ProtoEncode) {
    buf.put_u8(id);
    packet.proto_encode(buf);
}

/// Read the leading packet id byte.
pub fn read_packet_id(buf: &mut impl Buf) -> Result<u8, ProtoError> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8())
}
