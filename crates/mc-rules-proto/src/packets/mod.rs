//! Game packet definitions.

pub mod crafting;
pub mod remove_block;

pub use crafting::CraftingPacket;
pub use remove_block::RemoveBlock;

use bytes::Buf;

use crate::codec::{read_packet_id, ProtoDecode};
use crate::error::ProtoError;

/// Packet ID constants.
pub mod id {
    pub const REMOVE_BLOCK: u8 = 0x9A;
    pub const CRAFTING: u8 = 0xC0;
}

/// A decoded packet of any known kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamePacket {
    RemoveBlock(RemoveBlock),
    Crafting(CraftingPacket),
}

impl GamePacket {
    /// Read the id byte and decode the matching packet body.
    pub fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        match read_packet_id(buf)? {
            id::REMOVE_BLOCK => Ok(Self::RemoveBlock(RemoveBlock::proto_decode(buf)?)),
            id::CRAFTING => Ok(Self::Crafting(CraftingPacket::proto_decode(buf)?)),
            other => Err(ProtoError::UnknownPacketId(other as u32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::write_packet;
    use crate::types::TilePos;
    use bytes::BytesMut;

    #[test]
    fn dispatch_remove_block() {
        let pkt = RemoveBlock {
            entity_id: 7,
            position: TilePos::new(1, 2, 3),
        };
        let mut buf = BytesMut::new();
        write_packet(&mut buf, id::REMOVE_BLOCK, &pkt);
        let decoded = GamePacket::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, GamePacket::RemoveBlock(pkt));
    }

    #[test]
    fn dispatch_crafting() {
        let pkt = CraftingPacket::new(3, 1, 1, vec![17], 5, 4);
        let mut buf = BytesMut::new();
        write_packet(&mut buf, id::CRAFTING, &pkt);
        let decoded = GamePacket::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, GamePacket::Crafting(pkt));
    }

    #[test]
    fn unknown_id_rejected() {
        let data: &[u8] = &[0x01, 0, 0, 0, 0];
        let err = GamePacket::decode(&mut &data[..]).unwrap_err();
        assert!(matches!(err, ProtoError::UnknownPacketId(0x01)));
    }
}
