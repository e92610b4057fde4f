//! QOI header parsing and writing.

use crate::error::{QoiError, Result};
use std::io::{self, Read, Write};

/// QOI magic bytes, `"qoif"`.
pub const QOI_MAGIC: [u8; 4] = *b"qoif";

/// Size of the serialized header in bytes.
pub const HEADER_LEN: usize = 14;

/// Number of channels stored in the header.
///
/// The codec pipeline is always RGBA internally; this field only records
/// what the source image carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channels {
    /// Three channels, RGB.
    Rgb = 3,
    /// Four channels, RGBA.
    Rgba = 4,
}

/// Colorspace tag stored in the header.
///
/// Purely informational; no conversion is ever performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Colorspace {
    /// sRGB with linear alpha.
    Srgb = 0,
    /// All channels linear.
    Linear = 1,
}

/// QOI file header.
///
/// Serialized as 14 bytes, big-endian:
/// `"qoif"` magic, width, height, channels, colorspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel count of the source image.
    pub channels: Channels,
    /// Colorspace tag.
    pub colorspace: Colorspace,
}

impl Header {
    /// Create a header with the given fields.
    pub fn new(width: u32, height: u32, channels: Channels, colorspace: Colorspace) -> Self {
        Self {
            width,
            height,
            channels,
            colorspace,
        }
    }

    /// The pixel count the dimensions imply, `width * height`.
    ///
    /// Decoding does not enforce this against the chunk stream; see
    /// [`Decoder::check_pixel_count`](crate::Decoder::check_pixel_count).
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Write the 14-byte header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&QOI_MAGIC)?;
        writer.write_all(&self.width.to_be_bytes())?;
        writer.write_all(&self.height.to_be_bytes())?;
        writer.write_all(&[self.channels as u8, self.colorspace as u8])?;
        Ok(())
    }

    /// Read and validate a header from a reader.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_LEN];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                QoiError::invalid_format("stream ends inside the 14-byte header")
            } else {
                QoiError::from(e)
            }
        })?;

        if buf[0..4] != QOI_MAGIC {
            return Err(QoiError::invalid_magic([buf[0], buf[1], buf[2], buf[3]]));
        }

        let width = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let height = u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);

        let channels = match buf[12] {
            3 => Channels::Rgb,
            4 => Channels::Rgba,
            other => {
                return Err(QoiError::invalid_format(format!(
                    "unsupported channel count {other} (must be 3 or 4)"
                )));
            }
        };

        let colorspace = match buf[13] {
            0 => Colorspace::Srgb,
            1 => Colorspace::Linear,
            other => return Err(QoiError::invalid_colorspace(other)),
        };

        Ok(Self {
            width,
            height,
            channels,
            colorspace,
        })
    }
}
