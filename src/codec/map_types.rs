use serde::Serialize;

/// Fixed-layout prefix of every map file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapHeader {
    pub map_id: u32,
    /// Empty when the file carries no plausible name (see
    /// [`parse_header`](super::map_file::parse_header)).
    pub map_name: String,
}

/// Row-major tile matrix.
///
/// `tiles.len()` is always exactly `width * height`; cells the buffer could
/// not supply are zero-filled at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    pub width: u8,
    pub height: u8,
    pub tiles: Vec<u8>,
}

impl TileGrid {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Tile at `(x, y)`, or `None` outside the grid.
    pub fn tile(&self, x: u8, y: u8) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.tiles[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Row `y` as a slice, or `None` outside the grid.
    pub fn row(&self, y: u8) -> Option<&[u8]> {
        if y < self.height {
            let start = y as usize * self.width as usize;
            Some(&self.tiles[start..start + self.width as usize])
        } else {
            None
        }
    }
}

/// Fixed-size placement record (6 bytes on the wire), in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapObject {
    pub kind: u16,
    pub x: u16,
    pub y: u16,
}

/// NPC placement record with an optional inline display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpcRecord {
    pub id: u16,
    pub x: u16,
    pub y: u16,
    pub kind: u8,
    /// The inline name when the record carries a valid one, otherwise the
    /// synthesized `NPC_{id}` placeholder.
    pub name: String,
}

/// Everything recovered from one map buffer. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapDocument {
    pub header: MapHeader,
    /// Info byte between the header and the grid dimensions. Its meaning is
    /// unverified; kept opaque.
    pub map_type: u8,
    pub tile_grid: TileGrid,
    pub objects: Vec<MapObject>,
    pub npcs: Vec<NpcRecord>,
    /// Offset of the first undecoded byte.
    pub remainder_offset: usize,
    /// Undecoded tail, preserved verbatim for external diagnostics.
    pub remainder: Vec<u8>,
}
