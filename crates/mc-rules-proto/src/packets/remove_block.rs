//! RemoveBlock (0x9A).
//!
//! Announces that a player finished destroying the block at a position.

use bytes::{Buf, BufMut};

use crate::codec::{read_i32, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::TilePos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveBlock {
    pub entity_id: i32,
    pub position: TilePos,
}

impl ProtoEncode for RemoveBlock {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.entity_id);
        self.position.proto_encode(buf);
    }
}

impl ProtoDecode for RemoveBlock {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let entity_id = read_i32(buf)?;
        let position = TilePos::proto_decode(buf)?;
        Ok(Self {
            entity_id,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_remove_block() {
        let pkt = RemoveBlock {
            entity_id: 1,
            position: TilePos::new(0, 64, -1),
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[..4], &[0, 0, 0, 1]);
        assert_eq!(&buf[12..], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn decode_truncated_position() {
        let data: &[u8] = &[0, 0, 0, 1, 0, 0, 0, 0];
        assert!(RemoveBlock::proto_decode(&mut &data[..]).is_err());
    }
}
