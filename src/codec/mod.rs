pub mod cursor;
pub mod hex;
pub mod map_file;
pub mod map_types;
pub mod section;

pub use cursor::ByteCursor;
pub use hex::decode_hex;
pub use map_file::{
    parse_header, parse_map_hex, parse_npcs, parse_objects, parse_tile_grid, MAX_NAME_LEN,
    MAX_NPC_NAME_LEN, MAX_NPC_RECORDS, MAX_OBJECT_RECORDS,
};
pub use map_types::{MapDocument, MapHeader, MapObject, NpcRecord, TileGrid};
pub use section::{split_sections, Section, SECTION_SENTINEL};
