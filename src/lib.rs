//! Decoder for HSO client map files.
//!
//! The format is proprietary and undocumented; field boundaries and
//! section semantics were inferred from byte patterns: fixed-width
//! big-endian integers, length-prefixed UTF-8 strings, a `0xFF` sentinel
//! delimiting sections, and fixed- and variable-length record tables.
//!
//! Decoding is strictly sequential over an in-memory buffer and follows
//! deterministic recovery policies rather than failing on damage: a short
//! tile payload is zero-filled, implausible string lengths are rejected
//! without derailing the stream, truncated tables yield fewer records
//! than declared, and every byte the decoder cannot claim is preserved in
//! the document's `remainder` for downstream diagnostics. Only a buffer
//! too short for the mandatory header prefix fails outright.
//!
//! Entry points: [`MapDocument::parse`] for raw bytes, [`parse_map_hex`]
//! for the whitespace-separated hex form map dumps circulate in. The
//! lower-level pieces ([`ByteCursor`], [`split_sections`], the
//! per-section parsers in [`codec::map_file`]) are public for callers
//! that need to drive decoding themselves.

pub mod analysis;
pub mod codec;
pub mod error;

pub use codec::{
    decode_hex, parse_map_hex, split_sections, ByteCursor, MapDocument, MapHeader, MapObject,
    NpcRecord, Section, TileGrid, SECTION_SENTINEL,
};
pub use error::{Error, Result};
