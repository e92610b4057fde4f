//! QOI encoder.
//!
//! The encoder consumes pixels one at a time and writes chunks directly
//! into the sink; no intermediate chunk buffers are materialized. For
//! identical input pixel sequences the output is byte-identical, matching
//! the reference implementation chunk for chunk.

use std::io::Write;

use crate::bits::{add_bias, fits_in_signed};
use crate::error::Result;
use crate::header::Header;
use crate::ops::{END_MARKER, MAX_RUN, OP_DIFF, OP_INDEX, OP_LUMA, OP_RGB, OP_RGBA, OP_RUN};
use crate::pixel::{PixelSource, Rgba};
use crate::table::ColorTable;

/// Streaming QOI encoder writing into any [`Write`] sink.
///
/// [`Encoder::new`] writes the 14-byte header immediately;
/// [`push`](Encoder::push) consumes one pixel at a time;
/// [`finish`](Encoder::finish) flushes any pending run, writes the 8-byte
/// end marker and hands the sink back.
///
/// # Example
///
/// ```rust
/// use oxiqoi::{Channels, Colorspace, Encoder, Header, Rgba};
///
/// let header = Header::new(1, 1, Channels::Rgba, Colorspace::Srgb);
/// let mut encoder = Encoder::new(&header, Vec::new()).unwrap();
/// encoder.push(Rgba::new(0x2E, 0xB6, 0xAA, 255)).unwrap();
/// let bytes = encoder.finish().unwrap();
///
/// // Header, one full RGB chunk, end marker.
/// assert_eq!(bytes.len(), 14 + 4 + 8);
/// ```
pub struct Encoder<W: Write> {
    sink: W,
    prev: Rgba,
    run: u8,
    table: ColorTable,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder and write the header to `sink`.
    pub fn new(header: &Header, mut sink: W) -> Result<Self> {
        header.write(&mut sink)?;
        Ok(Self {
            sink,
            prev: Rgba::START,
            run: 0,
            table: ColorTable::new(),
        })
    }

    /// Encode one pixel.
    ///
    /// Per pixel the smallest legal chunk is chosen, in the fixed priority
    /// order: extend the run, flush the run, color-table hit, two-bit
    /// diff, luma diff, full RGB; a changed alpha always forces a full
    /// RGBA chunk.
    pub fn push(&mut self, pixel: Rgba) -> Result<()> {
        if pixel == self.prev {
            self.run += 1;
            if self.run == MAX_RUN {
                self.flush_run()?;
            }
            // A run neither advances the previous pixel nor touches the table.
            return Ok(());
        }

        self.flush_run()?;

        if let Some(idx) = self.table.match_put(pixel) {
            self.sink.write_all(&[OP_INDEX | idx])?;
        } else if pixel.a == self.prev.a {
            let dr = pixel.r.wrapping_sub(self.prev.r) as i8;
            let dg = pixel.g.wrapping_sub(self.prev.g) as i8;
            let db = pixel.b.wrapping_sub(self.prev.b) as i8;

            if fits_in_signed(2, dr) && fits_in_signed(2, dg) && fits_in_signed(2, db) {
                self.sink.write_all(&[OP_DIFF
                    | (add_bias(dr, 2) << 4)
                    | (add_bias(dg, 2) << 2)
                    | add_bias(db, 2)])?;
            } else {
                let dr_dg = dr.wrapping_sub(dg);
                let db_dg = db.wrapping_sub(dg);

                if fits_in_signed(6, dg) && fits_in_signed(4, dr_dg) && fits_in_signed(4, db_dg) {
                    self.sink.write_all(&[
                        OP_LUMA | add_bias(dg, 32),
                        (add_bias(dr_dg, 8) << 4) | add_bias(db_dg, 8),
                    ])?;
                } else {
                    self.sink
                        .write_all(&[OP_RGB, pixel.r, pixel.g, pixel.b])?;
                }
            }
        } else {
            self.sink
                .write_all(&[OP_RGBA, pixel.r, pixel.g, pixel.b, pixel.a])?;
        }

        self.prev = pixel;
        Ok(())
    }

    /// Flush any pending run, write the end marker and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush_run()?;
        self.sink.write_all(&END_MARKER)?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn flush_run(&mut self) -> Result<()> {
        if self.run > 0 {
            self.sink.write_all(&[OP_RUN | (self.run - 1)])?;
            self.run = 0;
        }
        Ok(())
    }
}

/// Encode a pixel stream into `sink`, header to end marker.
pub fn encode<S, W>(header: &Header, mut source: S, sink: &mut W) -> Result<()>
where
    S: PixelSource,
    W: Write,
{
    let mut encoder = Encoder::new(header, sink)?;
    while let Some(pixel) = source.next_pixel() {
        encoder.push(pixel)?;
    }
    encoder.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{Channels, Colorspace};
    use crate::pixel::SlicePixels;

    fn encode_pixels(pixels: &[Rgba]) -> Vec<u8> {
        let header = Header::new(pixels.len() as u32, 1, Channels::Rgba, Colorspace::Srgb);
        let mut out = Vec::new();
        encode(&header, SlicePixels::new(pixels), &mut out).unwrap();
        out
    }

    /// Chunk bytes without the 14-byte header and 8-byte end marker.
    fn chunk_bytes(encoded: &[u8]) -> &[u8] {
        &encoded[14..encoded.len() - 8]
    }

    #[test]
    fn test_solid_image_is_rgb_then_run() {
        let pixels = [Rgba::new(0x2E, 0xB6, 0xAA, 255); 4];
        let header = Header::new(2, 2, Channels::Rgba, Colorspace::Srgb);
        let mut out = Vec::new();
        encode(&header, SlicePixels::new(&pixels), &mut out).unwrap();

        let mut expected = vec![0x71, 0x6F, 0x69, 0x66, 0, 0, 0, 2, 0, 0, 0, 2, 4, 0];
        expected.extend_from_slice(&[0xFE, 0x2E, 0xB6, 0xAA]); // full RGB
        expected.push(0xC2); // run of 3
        expected.extend_from_slice(&END_MARKER);
        assert_eq!(out, expected);
        assert_eq!(out.len(), 27);
    }

    #[test]
    fn test_table_hit_becomes_index_chunk() {
        let a = Rgba::new(10, 0, 0, 255);
        let b = Rgba::new(0, 10, 0, 255);
        let out = encode_pixels(&[a, b, a]);

        // Both colors need full RGB chunks, the revisit hits the table.
        // (3*10 + 11*255) mod 64 = 19.
        assert_eq!(
            chunk_bytes(&out),
            [0xFE, 10, 0, 0, 0xFE, 0, 10, 0, OP_INDEX | 19]
        );
    }

    #[test]
    fn test_small_deltas_become_diff_chunk() {
        let a = Rgba::new(10, 20, 30, 255);
        let b = Rgba::new(11, 18, 31, 255); // +1, -2, +1
        let out = encode_pixels(&[a, b]);

        let expected_diff = OP_DIFF | (3 << 4) | (0 << 2) | 3;
        assert_eq!(chunk_bytes(&out), [0xFE, 10, 20, 30, expected_diff]);
    }

    #[test]
    fn test_green_relative_deltas_become_luma_chunk() {
        let a = Rgba::new(10, 20, 30, 255);
        let b = Rgba::new(42, 50, 57, 255); // dg = 30, dr - dg = 2, db - dg = -3
        let out = encode_pixels(&[a, b]);

        let expected = [OP_LUMA | (30 + 32), ((2 + 8) << 4) | (8 - 3)];
        assert_eq!(chunk_bytes(&out), [0xFE, 10, 20, 30, expected[0], expected[1]]);
    }

    #[test]
    fn test_alpha_change_forces_rgba_chunk() {
        let a = Rgba::new(10, 20, 30, 255);
        let b = Rgba::new(10, 20, 30, 128);
        let out = encode_pixels(&[a, b]);

        assert_eq!(
            chunk_bytes(&out),
            [0xFE, 10, 20, 30, 0xFF, 10, 20, 30, 128]
        );
    }

    #[test]
    fn test_long_run_splits_at_62() {
        // 100 default-colored pixels continue the implicit previous pixel,
        // so the whole image is runs: 62 + 38.
        let pixels = [Rgba::new(0, 0, 0, 255); 100];
        let out = encode_pixels(&pixels);

        assert_eq!(chunk_bytes(&out), [0xFD, 0xE5]);
    }

    #[test]
    fn test_run_of_exactly_62_emits_single_chunk() {
        let pixels = [Rgba::new(0, 0, 0, 255); 62];
        let out = encode_pixels(&pixels);
        assert_eq!(chunk_bytes(&out), [0xFD]);
    }

    #[test]
    fn test_pending_run_flushes_before_next_chunk() {
        let mut pixels = vec![Rgba::new(0, 0, 0, 255); 3];
        pixels.push(Rgba::new(9, 9, 9, 9));
        let out = encode_pixels(&pixels);

        assert_eq!(chunk_bytes(&out), [0xC2, 0xFF, 9, 9, 9, 9]);
    }

    #[test]
    fn test_empty_stream_is_header_and_marker_only() {
        let out = encode_pixels(&[]);
        assert_eq!(out.len(), 14 + 8);
        assert_eq!(&out[14..], END_MARKER);
    }

    #[test]
    fn test_run_at_end_is_flushed_by_finish() {
        let pixels = [Rgba::new(0, 0, 0, 255); 5];
        let out = encode_pixels(&pixels);
        assert_eq!(chunk_bytes(&out), [OP_RUN | 4]);
    }
}
