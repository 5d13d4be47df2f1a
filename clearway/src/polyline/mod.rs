//! Encoded-path codec for route geometry.
//!
//! The upstream directions provider returns route geometry as a compact
//! delta-encoded string: each coordinate component is scaled by 1e5,
//! delta-encoded against the previous point, zigzag-signed, then split
//! into 5-bit groups with a continuation bit (0x20) and offset into
//! printable ASCII. See [Google's polyline
//! algorithm](https://developers.google.com/maps/documentation/utilities/polylinealgorithm).
//!
//! Decoding and encoding happen at API boundaries only; everything else
//! in the crate works on decoded [`Coordinate`] sequences.

use crate::coord::Coordinate;
use thiserror::Error;

/// Scale factor between degrees and the integer wire representation.
const PRECISION: f64 = 1e5;

/// Offset applied to every encoded byte to land in printable ASCII.
const ASCII_OFFSET: u8 = 63;

/// Errors produced while decoding an encoded path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string ended in the middle of a 5-bit group sequence
    #[error("encoded path truncated at byte {index}")]
    Truncated { index: usize },

    /// A byte below the encoding alphabet was encountered
    #[error("invalid byte {byte:#04x} in encoded path at offset {index}")]
    InvalidByte { byte: u8, index: usize },
}

/// Decode an encoded path string into an ordered coordinate sequence.
///
/// Pure and restartable: the decoder carries no state across calls.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] if the input ends mid-group and
/// [`DecodeError::InvalidByte`] for bytes outside the encoding alphabet.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut coordinates = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        lon += next_delta(bytes, &mut index)?;
        coordinates.push(Coordinate::new(
            lat as f64 / PRECISION,
            lon as f64 / PRECISION,
        ));
    }

    Ok(coordinates)
}

/// Encode a coordinate sequence into the compact path representation.
///
/// Inverse of [`decode`] up to the 1e-5 degree quantization.
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in path {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lon = (point.longitude * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Read one zigzag-encoded signed delta starting at `*index`.
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut shift = 0u32;
    let mut accumulator: u64 = 0;

    loop {
        let byte = match bytes.get(*index) {
            Some(byte) => *byte,
            None => return Err(DecodeError::Truncated { index: *index }),
        };
        if byte < ASCII_OFFSET {
            return Err(DecodeError::InvalidByte {
                byte,
                index: *index,
            });
        }
        *index += 1;

        let group = u64::from(byte - ASCII_OFFSET);
        accumulator |= (group & 0x1f) << shift;
        shift += 5;

        if group & 0x20 == 0 {
            break;
        }
    }

    // Undo the zigzag transform: LSB carries the sign.
    let magnitude = (accumulator >> 1) as i64;
    if accumulator & 1 == 1 {
        Ok(!magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Append one zigzag-encoded signed delta to `out`.
fn encode_value(value: i64, out: &mut String) {
    let mut v = ((value << 1) ^ (value >> 63)) as u64;
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + ASCII_OFFSET) as char);
        v >>= 5;
    }
    out.push((v as u8 + ASCII_OFFSET) as char);
}
