use tracing::{debug, warn};

use super::cursor::ByteCursor;
use super::hex::decode_hex;
use super::map_types::{MapDocument, MapHeader, MapObject, NpcRecord, TileGrid};
use super::section::SECTION_SENTINEL;
use crate::error::{Error, Result};

/// Longest plausible map name. Anything above this is binary data misread
/// as a length prefix.
pub const MAX_NAME_LEN: usize = 200;
/// Valid NPC name lengths fall strictly inside `(0, MAX_NPC_NAME_LEN)`.
pub const MAX_NPC_NAME_LEN: usize = 100;
/// Record caps: a corrupt count must not drive an unbounded read. Records
/// beyond the cap stay in the document's remainder.
pub const MAX_OBJECT_RECORDS: usize = 50;
pub const MAX_NPC_RECORDS: usize = 20;

const OBJECT_RECORD_LEN: usize = 6;
const NPC_PREFIX_LEN: usize = 7;

/// Decode the fixed-layout header: 4-byte big-endian map id, then a
/// length-prefixed UTF-8 name.
///
/// A suspicious name length (> [`MAX_NAME_LEN`]) is treated as "no name":
/// the name comes back empty and the cursor stays just past the length
/// field. Only a buffer too short for the mandatory prefix is fatal.
pub fn parse_header(cursor: &mut ByteCursor) -> Result<MapHeader> {
    let start = cursor.position();
    let map_id = match cursor.read_u32_be() {
        Ok(id) => id,
        Err(Error::OutOfBounds { offset, .. }) => {
            return Err(Error::MalformedHeader { offset })
        }
        Err(e) => return Err(e),
    };
    let map_name = match cursor.read_length_prefixed_utf8(MAX_NAME_LEN) {
        Ok(name) => name,
        Err(Error::StringTooLong { len, .. }) => {
            warn!(offset = start, len, "implausible map name length, treating name as absent");
            String::new()
        }
        Err(Error::OutOfBounds { offset, .. }) => {
            return Err(Error::MalformedHeader { offset })
        }
        Err(e) => return Err(e),
    };
    Ok(MapHeader { map_id, map_name })
}

/// Decode a row-major tile grid of exactly `width * height` cells.
///
/// Cells the buffer cannot supply are zero-filled without advancing the
/// cursor, so the grid is always fully populated and this never fails.
pub fn parse_tile_grid(cursor: &mut ByteCursor, width: u8, height: u8) -> TileGrid {
    let cells = width as usize * height as usize;
    let available = cells.min(cursor.remaining());
    let mut tiles = cursor.read_bytes(available).unwrap_or_default().to_vec();
    if tiles.len() < cells {
        debug!(
            width,
            height,
            missing = cells - tiles.len(),
            "tile data ends early, zero-filling grid"
        );
        tiles.resize(cells, 0);
    }
    TileGrid {
        width,
        height,
        tiles,
    }
}

/// Decode the count-prefixed object table: `min(count, max_count)` records
/// of 6 bytes each (kind, x, y as big-endian u16).
///
/// A truncated table yields fewer records than declared, without error.
/// Fails only when the 2-byte count itself cannot be read.
pub fn parse_objects(cursor: &mut ByteCursor, max_count: usize) -> Result<Vec<MapObject>> {
    let declared = cursor.read_u16_be()? as usize;
    let capped = declared.min(max_count);
    if capped < declared {
        warn!(declared, cap = max_count, "object count above cap, decoding first records only");
    }
    let mut objects = Vec::with_capacity(capped);
    for _ in 0..capped {
        if cursor.remaining() < OBJECT_RECORD_LEN {
            warn!(decoded = objects.len(), declared, "object table truncated");
            break;
        }
        objects.push(MapObject {
            kind: cursor.read_u16_be()?,
            x: cursor.read_u16_be()?,
            y: cursor.read_u16_be()?,
        });
    }
    Ok(objects)
}

/// Decode the count-prefixed NPC table: `min(count, max_count)` records of
/// a 7-byte fixed prefix (id, x, y as big-endian u16, kind as u8) plus an
/// optional validated inline name.
///
/// Malformed names never fail; a truncated table yields fewer records than
/// declared. Fails only when the 2-byte count itself cannot be read.
pub fn parse_npcs(cursor: &mut ByteCursor, max_count: usize) -> Result<Vec<NpcRecord>> {
    let declared = cursor.read_u16_be()? as usize;
    let capped = declared.min(max_count);
    if capped < declared {
        warn!(declared, cap = max_count, "npc count above cap, decoding first records only");
    }
    let mut npcs = Vec::with_capacity(capped);
    for _ in 0..capped {
        if cursor.remaining() < NPC_PREFIX_LEN {
            warn!(decoded = npcs.len(), declared, "npc table truncated");
            break;
        }
        let id = cursor.read_u16_be()?;
        let x = cursor.read_u16_be()?;
        let y = cursor.read_u16_be()?;
        let kind = cursor.read_u8()?;
        let name = read_npc_name(cursor, id)?;
        npcs.push(NpcRecord { id, x, y, kind, name });
    }
    Ok(npcs)
}

/// Probe for an inline NPC name.
///
/// The 2 length bytes are either consumed as a genuine prefix or rewound
/// untouched, so whatever follows (the next record, or the next section)
/// starts at the correct offset. This probe is the only caller of
/// [`ByteCursor::rewind`].
fn read_npc_name(cursor: &mut ByteCursor, id: u16) -> Result<String> {
    if cursor.remaining() < 2 {
        return Ok(placeholder_name(id));
    }
    let len = cursor.read_u16_be()? as usize;
    if len > 0 && len < MAX_NPC_NAME_LEN && cursor.remaining() >= len {
        let bytes = cursor.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    } else {
        cursor.rewind(2);
        debug!(id, len, "no valid inline npc name, synthesizing placeholder");
        Ok(placeholder_name(id))
    }
}

fn placeholder_name(id: u16) -> String {
    format!("NPC_{id}")
}

impl MapDocument {
    /// Decode a complete map buffer.
    ///
    /// Only an unreadable header prefix is fatal. Every later problem
    /// degrades deterministically: missing info bytes become 0, a short
    /// tile payload is zero-filled, an unreadable table count becomes an
    /// empty table, and whatever is left unconsumed lands verbatim in
    /// `remainder`. Each decoder advances the shared cursor only over
    /// bytes it validated itself.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let header = parse_header(&mut cursor)?;
        debug!(map_id = header.map_id, name = %header.map_name, "parsed map header");

        let map_type = cursor.read_u8().unwrap_or(0);
        let width = cursor.read_u8().unwrap_or(0);
        let height = cursor.read_u8().unwrap_or(0);

        let tile_grid = parse_tile_grid(&mut cursor, width, height);

        // Tile payloads may run past the declared grid; everything up to
        // the sentinel still belongs to the tile section.
        let (objects, npcs) = if skip_past_sentinel(&mut cursor) {
            (
                parse_objects(&mut cursor, MAX_OBJECT_RECORDS).unwrap_or_default(),
                parse_npcs(&mut cursor, MAX_NPC_RECORDS).unwrap_or_default(),
            )
        } else {
            debug!("no section sentinel, object and npc tables absent");
            (Vec::new(), Vec::new())
        };

        let remainder_offset = cursor.position();
        let remainder = cursor.read_remaining().to_vec();
        if !remainder.is_empty() {
            debug!(
                offset = remainder_offset,
                len = remainder.len(),
                "retaining undecoded remainder"
            );
        }

        Ok(MapDocument {
            header,
            map_type,
            tile_grid,
            objects,
            npcs,
            remainder_offset,
            remainder,
        })
    }
}

/// Decode a map from its textual hex form (see
/// [`decode_hex`](super::hex::decode_hex) for the accepted shape).
pub fn parse_map_hex(text: &str) -> Result<MapDocument> {
    MapDocument::parse(&decode_hex(text)?)
}

/// Advance the cursor just past the next sentinel byte. Returns `false`
/// without moving when no sentinel remains, leaving the tail for the
/// remainder.
fn skip_past_sentinel(cursor: &mut ByteCursor) -> bool {
    let from = cursor.position();
    match cursor
        .remaining_slice()
        .iter()
        .position(|&b| b == SECTION_SENTINEL)
    {
        Some(i) => {
            if i > 0 {
                debug!(skipped = i, "skipping unclaimed bytes before sentinel");
            }
            cursor.set_position(from + i + 1);
            true
        }
        None => false,
    }
}
