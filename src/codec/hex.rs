use crate::error::{Error, Result};

/// Decode hex text into bytes.
///
/// Map dumps circulate as whitespace-separated hex: every two hex digits
/// form one byte, high nibble first, with ASCII whitespace allowed anywhere
/// between digits. Rejects non-hex characters (with their byte position)
/// and an odd number of digits.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() / 2);
    let mut high: Option<u8> = None;
    for (pos, ch) in text.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let nibble = ch
            .to_digit(16)
            .ok_or(Error::InvalidHexDigit { pos, ch })? as u8;
        high = match high {
            None => Some(nibble),
            Some(h) => {
                out.push(h << 4 | nibble);
                None
            }
        };
    }
    if high.is_some() {
        return Err(Error::OddHexLength);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_interleaved_whitespace() {
        assert_eq!(
            decode_hex("00 0A\n0b\t Ff").unwrap(),
            vec![0x00, 0x0A, 0x0B, 0xFF]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_hex("  \n ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_odd_digit_count() {
        assert_eq!(decode_hex("00 0").unwrap_err(), Error::OddHexLength);
    }

    #[test]
    fn test_invalid_digit_reports_position() {
        assert_eq!(
            decode_hex("0G").unwrap_err(),
            Error::InvalidHexDigit { pos: 1, ch: 'G' }
        );
    }

    #[test]
    fn test_formats_round_trip() {
        let bytes = [0x00, 0x11, 0xAB, 0xFF, 0x7E];
        let text = bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(decode_hex(&text).unwrap(), bytes);
    }
}
