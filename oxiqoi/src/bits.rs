//! Bit-level helpers for chunk field packing.
//!
//! QOI packs small signed channel differences into unsigned bit fields by
//! adding a fixed bias. These helpers keep the signed/unsigned conversions
//! in one place and make the wrapping behaviour explicit.

/// Returns true iff `n` is representable in a signed field of `width_bits` bits.
///
/// The encoder uses widths 2 (diff), 4 (luma red/blue) and 6 (luma green).
pub(crate) fn fits_in_signed(width_bits: u32, n: i8) -> bool {
    let half = 1i16 << (width_bits - 1);
    (-half..half).contains(&i16::from(n))
}

/// Pack a signed difference into an unsigned bit field by adding `bias`.
pub(crate) fn add_bias(n: i8, bias: i8) -> u8 {
    n.wrapping_add(bias) as u8
}

/// Recover a signed difference from a biased unsigned field.
///
/// Inverse of [`add_bias`] for every `i8` input.
pub(crate) fn sub_bias(n: u8, bias: i8) -> i8 {
    (n as i8).wrapping_sub(bias)
}
