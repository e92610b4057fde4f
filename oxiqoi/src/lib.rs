//! # OxiQOI: Pure Rust QOI (Quite OK Image) codec
//!
//! This crate provides encoding and decoding of the [QOI image format],
//! a lossless RGB/RGBA format built from six chunk types and a 64-slot
//! running color hash.
//!
//! ## Features
//!
//! - **Pure Rust**: no C dependencies, `#![forbid(unsafe_code)]`
//! - **Bit-exact**: output matches the reference implementation byte for
//!   byte
//! - **Streaming**: the decoder is a lazy pixel iterator over any
//!   [`std::io::Read`] and holds constant memory; the encoder writes
//!   chunks straight into any [`std::io::Write`]
//!
//! ## Example
//!
//! ```rust
//! use oxiqoi::{Channels, Colorspace, Header, Rgba, SlicePixels};
//!
//! let pixels = vec![Rgba::new(0x2E, 0xB6, 0xAA, 255); 4];
//! let header = Header::new(2, 2, Channels::Rgba, Colorspace::Srgb);
//!
//! let bytes = oxiqoi::encode_to_vec(&header, SlicePixels::new(&pixels)).unwrap();
//! assert_eq!(bytes.len(), 27); // header + RGB chunk + run chunk + end marker
//!
//! let (decoded_header, decoded) = oxiqoi::decode_to_vec(bytes.as_slice()).unwrap();
//! assert_eq!(decoded_header, header);
//! assert_eq!(decoded, pixels);
//! ```
//!
//! For one-pixel-at-a-time processing use [`Encoder`] and [`Decoder`]
//! directly.
//!
//! [QOI image format]: https://qoiformat.org/qoi-specification.pdf

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod bits;
mod decoder;
mod encoder;
mod error;
mod header;
mod ops;
mod pixel;
mod table;

pub use crate::decoder::{Decoder, decode};
pub use crate::encoder::{Encoder, encode};
pub use crate::error::{QoiError, Result};
pub use crate::header::{Channels, Colorspace, HEADER_LEN, Header, QOI_MAGIC};
pub use crate::pixel::{IterPixels, PixelFormat, PixelSource, RawPixels, Rgba, SlicePixels};
pub use crate::table::ColorTable;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

/// Encode a pixel stream into an in-memory byte vector.
///
/// # Example
///
/// ```rust
/// use oxiqoi::{Channels, Colorspace, Header, PixelFormat, RawPixels};
///
/// let raw = [10u8, 20, 30, 40, 50, 60]; // two RGB pixels
/// let header = Header::new(2, 1, Channels::Rgb, Colorspace::Srgb);
/// let bytes =
///     oxiqoi::encode_to_vec(&header, RawPixels::new(&raw, PixelFormat::Rgb)).unwrap();
/// assert_eq!(&bytes[0..4], b"qoif");
/// ```
pub fn encode_to_vec<S: PixelSource>(header: &Header, source: S) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(header, source, &mut out)?;
    Ok(out)
}

/// Encode a pixel stream into a file, creating or truncating it.
///
/// The path may be absolute or relative to the working directory.
pub fn encode_file<S: PixelSource, P: AsRef<Path>>(
    header: &Header,
    source: S,
    path: P,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode(header, source, &mut writer)?;
    Ok(())
}

/// Decode a whole QOI stream into memory.
///
/// This is the non-streaming convenience; for constant-memory decoding
/// iterate a [`Decoder`] instead.
pub fn decode_to_vec<R: Read>(reader: R) -> Result<(Header, Vec<Rgba>)> {
    let mut decoder = Decoder::new(reader)?;
    let pixels = decoder.collect_pixels()?;
    Ok((*decoder.header(), pixels))
}

/// Decode a QOI file into memory.
///
/// The path may be absolute or relative to the working directory.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<(Header, Vec<Rgba>)> {
    let file = File::open(path)?;
    decode_to_vec(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_simple() {
        let pixels = vec![
            Rgba::new(1, 2, 3, 255),
            Rgba::new(1, 2, 3, 255),
            Rgba::new(200, 100, 50, 255),
            Rgba::new(200, 100, 50, 128),
        ];
        let header = Header::new(2, 2, Channels::Rgba, Colorspace::Srgb);

        let bytes = encode_to_vec(&header, SlicePixels::new(&pixels)).unwrap();
        let (decoded_header, decoded) = decode_to_vec(bytes.as_slice()).unwrap();

        assert_eq!(decoded_header, header);
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn test_roundtrip_empty() {
        let header = Header::new(0, 0, Channels::Rgba, Colorspace::Linear);
        let bytes = encode_to_vec(&header, SlicePixels::new(&[])).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 8);

        let (decoded_header, decoded) = decode_to_vec(bytes.as_slice()).unwrap();
        assert_eq!(decoded_header, header);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_streaming_decode_matches_collect() {
        let pixels: Vec<Rgba> = (0u8..=255)
            .map(|v| Rgba::new(v, v.wrapping_add(17), v.wrapping_mul(3), 255))
            .collect();
        let header = Header::new(16, 16, Channels::Rgb, Colorspace::Srgb);
        let bytes = encode_to_vec(&header, SlicePixels::new(&pixels)).unwrap();

        let streamed: Vec<Rgba> = decode(bytes.as_slice())
            .unwrap()
            .map(|px| px.unwrap())
            .collect();
        assert_eq!(streamed, pixels);
    }

    #[test]
    fn test_file_roundtrip() {
        let pixels = vec![Rgba::new(9, 8, 7, 6); 10];
        let header = Header::new(10, 1, Channels::Rgba, Colorspace::Srgb);

        let path = std::env::temp_dir().join("oxiqoi_lib_file_roundtrip.qoi");
        encode_file(&header, SlicePixels::new(&pixels), &path).unwrap();

        let (decoded_header, decoded) = decode_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded_header, header);
        assert_eq!(decoded, pixels);
    }
}
