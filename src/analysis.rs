//! Exploratory scans for probing undeciphered regions of a map buffer.
//!
//! Nothing here is part of the decode contract. These helpers guide
//! reverse engineering of the fields the decoder leaves in a document's
//! remainder; expect false positives. Rendering their output is the
//! reporting side's job.

use std::ops::RangeInclusive;

use serde::Serialize;

/// Observed maps are between 20 and 100 tiles per side.
const DIMENSION_RANGE: RangeInclusive<u8> = 20..=100;
/// Tile ids seen in real maps all sit at or below this value.
const TILE_ID_BOUND: u8 = 0x3F;
/// No observed map coordinate exceeds this.
const COORD_BOUND: u16 = 1000;

/// A byte pair that could plausibly be a width/height declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionGuess {
    pub offset: usize,
    pub width: u8,
    pub height: u8,
}

/// Scan for adjacent byte pairs that look like map dimensions.
pub fn guess_dimensions(data: &[u8]) -> Vec<DimensionGuess> {
    data.windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            DIMENSION_RANGE.contains(&pair[0]) && DIMENSION_RANGE.contains(&pair[1])
        })
        .map(|(offset, pair)| DimensionGuess {
            offset,
            width: pair[0],
            height: pair[1],
        })
        .collect()
}

/// Fraction of bytes in `window` that look like tile ids.
///
/// Windows scoring above roughly 0.7 usually hold tile payload.
pub fn tile_likeness(window: &[u8]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let hits = window.iter().filter(|&&b| b <= TILE_ID_BOUND).count();
    hits as f64 / window.len() as f64
}

/// Consecutive big-endian u16 pairs that could be map coordinates.
///
/// Useful against the undeciphered trailing table, which appears to be
/// coordinate-pair shaped. Trailing bytes short of a full pair are
/// ignored.
pub fn scan_coordinate_pairs(data: &[u8]) -> Vec<(u16, u16)> {
    data.chunks_exact(4)
        .filter_map(|chunk| {
            let x = u16::from_be_bytes([chunk[0], chunk[1]]);
            let y = u16::from_be_bytes([chunk[2], chunk[3]]);
            (x <= COORD_BOUND && y <= COORD_BOUND).then_some((x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_dimensions_finds_plausible_pairs() {
        let data = [5, 30, 40, 101, 20];
        assert_eq!(
            guess_dimensions(&data),
            vec![DimensionGuess {
                offset: 1,
                width: 30,
                height: 40
            }]
        );
    }

    #[test]
    fn test_guess_dimensions_range_bounds() {
        assert!(guess_dimensions(&[19, 20]).is_empty());
        assert_eq!(guess_dimensions(&[20, 100]).len(), 1);
        assert!(guess_dimensions(&[100, 101]).is_empty());
    }

    #[test]
    fn test_tile_likeness() {
        assert_eq!(tile_likeness(&[]), 0.0);
        assert_eq!(tile_likeness(&[0x01, 0x3F, 0x00, 0x2A]), 1.0);
        assert_eq!(tile_likeness(&[0x01, 0x40, 0xFF, 0x02]), 0.5);
    }

    #[test]
    fn test_scan_coordinate_pairs() {
        let data = [
            0x00, 0x01, 0x00, 0x02, // (1, 2)
            0xFF, 0xFF, 0x00, 0x00, // x out of range
            0x00, 0x03, 0x03, 0xE8, // (3, 1000)
            0x00, // trailing fragment ignored
        ];
        assert_eq!(scan_coordinate_pairs(&data), vec![(1, 2), (3, 1000)]);
    }
}
