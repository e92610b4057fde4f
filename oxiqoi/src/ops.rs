//! Chunk tags and stream framing constants, per QOI v1.0.

/// 2-bit tag `00`: index into the running color table.
pub(crate) const OP_INDEX: u8 = 0x00;
/// 2-bit tag `01`: small per-channel difference to the previous pixel.
pub(crate) const OP_DIFF: u8 = 0x40;
/// 2-bit tag `10`: green-relative difference to the previous pixel.
pub(crate) const OP_LUMA: u8 = 0x80;
/// 2-bit tag `11`: run of the previous pixel.
pub(crate) const OP_RUN: u8 = 0xC0;
/// 8-bit tag: full RGB triple, alpha carried over from the previous pixel.
pub(crate) const OP_RGB: u8 = 0xFE;
/// 8-bit tag: full RGBA quadruple.
pub(crate) const OP_RGBA: u8 = 0xFF;

/// Mask selecting the two tag bits.
pub(crate) const TAG_MASK_2: u8 = 0xC0;

/// Longest run a single `OP_RUN` chunk may carry.
///
/// Lengths 63 and 64 would collide with the `OP_RGB`/`OP_RGBA` tags.
pub(crate) const MAX_RUN: u8 = 62;

/// The 8-byte trailer that terminates every stream.
pub(crate) const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
