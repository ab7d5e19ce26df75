//! EMF map decoder.
//!
//! Map files carry terrain, warps, signs and chests, but only two pieces are
//! decoded here: the map's display name and the NPC spawn placements embedded
//! near the start of the file. Everything after the placement list is ignored.
//!
//! # File Format
//!
//! - `0x00` 3 bytes: Magic (`EMF`)
//! - `0x03` 4 bytes: Revision id
//! - `0x07` 24 bytes: Encoded name, `0xFF` padded
//! - `0x1F..0x2E`: Map flags (type, effect, music, size, relog point)
//! - `0x2E` 1 byte: Placement count
//! - `0x2F` 8 bytes per placement: x, y, npc id (2), spawn type, spawn time (2), amount
//!
//! # Example
//!
//! ```no_run
//! use almanac_map::MapFile;
//!
//! let bytes = std::fs::read("maps/00005.emf")?;
//! let map = MapFile::parse(&bytes)?;
//! for npc in &map.npcs {
//!     println!("{} x{} at ({}, {})", npc.npc_id, npc.amount, npc.x, npc.y);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

use almanac_common::codec::decode_number;
use almanac_common::{EoReader, EoWriter};
use zerocopy::{FromBytes, Immutable, KnownLayout};

pub use error::{Error, Result};

/// File signature.
pub const MAGIC: &[u8; 3] = b"EMF";

/// Offset of the encoded name.
pub const NAME_OFFSET: usize = 0x07;

/// Length of the encoded name field.
pub const NAME_LENGTH: usize = 24;

/// Offset of the NPC placement count.
pub const NPC_COUNT_OFFSET: usize = 0x2E;

/// Size of one placement record.
pub const NPC_RECORD_SIZE: usize = 8;

#[derive(FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct RawMapNpc {
    x: u8,
    y: u8,
    npc_id: [u8; 2],
    spawn_type: u8,
    spawn_time: [u8; 2],
    amount: u8,
}

const _: () = assert!(std::mem::size_of::<RawMapNpc>() == NPC_RECORD_SIZE);

/// One NPC spawn placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapNpc {
    /// Id in the NPC table.
    pub npc_id: u16,
    pub x: u8,
    pub y: u8,
    pub spawn_type: u8,
    /// Respawn interval in seconds.
    pub spawn_time: u16,
    pub amount: u8,
}

impl From<RawMapNpc> for MapNpc {
    fn from(raw: RawMapNpc) -> Self {
        let byte = |value: u8| decode_number(&[value]) as u8;
        Self {
            npc_id: decode_number(&raw.npc_id) as u16,
            x: byte(raw.x),
            y: byte(raw.y),
            spawn_type: byte(raw.spawn_type),
            spawn_time: decode_number(&raw.spawn_time) as u16,
            amount: byte(raw.amount),
        }
    }
}

/// The decoded parts of a map file.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapFile {
    pub name: String,
    pub npcs: Vec<MapNpc>,
}

impl MapFile {
    /// Check if data starts with the EMF signature.
    pub fn is_emf(data: &[u8]) -> bool {
        data.len() >= MAGIC.len() && &data[..MAGIC.len()] == MAGIC
    }

    /// Decode the name and NPC placements from map file bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if !Self::is_emf(data) {
            return Err(Error::InvalidMagic(data[..MAGIC.len().min(data.len())].to_vec()));
        }
        if data.len() <= NPC_COUNT_OFFSET {
            return Err(Error::TooShort(data.len()));
        }

        let mut reader = EoReader::new(data);
        reader.seek(NAME_OFFSET);
        let name = reader.read_fixed_encoded_string(NAME_LENGTH)?;

        reader.seek(NPC_COUNT_OFFSET);
        let count = reader.read_char()? as usize;

        let mut npcs = Vec::with_capacity(count);
        for _ in 0..count {
            npcs.push(MapNpc::from(reader.read_struct::<RawMapNpc>()?));
        }

        Ok(Self { name, npcs })
    }

    /// Encode a minimal map file holding only the decoded parts.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = EoWriter::new();
        writer.add_bytes(MAGIC);
        writer.add_int(0);
        writer.add_fixed_encoded_string(&self.name, NAME_LENGTH);
        while writer.len() < NPC_COUNT_OFFSET {
            writer.add_char(0);
        }

        writer.add_char(self.npcs.len() as u8);
        for npc in &self.npcs {
            writer.add_char(npc.x);
            writer.add_char(npc.y);
            writer.add_short(npc.npc_id);
            writer.add_char(npc.spawn_type);
            writer.add_short(npc.spawn_time);
            writer.add_char(npc.amount);
        }

        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MapFile {
        MapFile {
            name: "Wanderer Cave".into(),
            npcs: vec![
                MapNpc {
                    npc_id: 12,
                    x: 4,
                    y: 9,
                    spawn_type: 7,
                    spawn_time: 300,
                    amount: 2,
                },
                MapNpc {
                    npc_id: 400,
                    x: 20,
                    y: 1,
                    spawn_type: 0,
                    spawn_time: 45,
                    amount: 1,
                },
            ],
        }
    }

    #[test]
    fn test_parse_placements() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), NPC_COUNT_OFFSET + 1 + 2 * NPC_RECORD_SIZE);

        let map = MapFile::parse(&bytes).unwrap();
        assert_eq!(map, sample());
    }

    #[test]
    fn test_empty_map() {
        let bytes = MapFile {
            name: String::new(),
            npcs: Vec::new(),
        }
        .to_bytes();

        let map = MapFile::parse(&bytes).unwrap();
        assert!(map.name.is_empty());
        assert!(map.npcs.is_empty());
    }

    #[test]
    fn test_bad_signature() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';
        assert!(matches!(MapFile::parse(&bytes), Err(Error::InvalidMagic(_))));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(MapFile::parse(b"EMF\x01\x01"), Err(Error::TooShort(5))));
    }

    #[test]
    fn test_truncated_placements() {
        let mut bytes = sample().to_bytes();
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(MapFile::parse(&bytes), Err(Error::Common(_))));
    }
}
