//! Shifts and bit-indexed access.
//!
//! Bit indices count from the most significant bit: index `0` is the top bit
//! of the word, index `width - 1` is the units bit. An index outside the word
//! is an error. Shift amounts saturate at the width instead, so shifting a
//! 256-bit word by 300 is simply zero.

use crate::codec::canonical_binary;
use crate::error::{CodecError, Result};
use crate::int::{mask, FixedWidthInteger};
use num_bigint::BigUint;
use num_traits::One;

pub fn shift_left(value: &FixedWidthInteger, bits: u32) -> FixedWidthInteger {
    let width = value.width();
    let bits = bits.min(width);
    let shifted = (value.to_unsigned() << bits) & mask(width);
    FixedWidthInteger::from_magnitude(width, shifted)
}

pub fn shift_right(value: &FixedWidthInteger, bits: u32) -> FixedWidthInteger {
    let width = value.width();
    let bits = bits.min(width);
    FixedWidthInteger::from_magnitude(width, value.to_unsigned() >> bits)
}

/// Position of an MSB-first index counted from the units bit.
fn position(width: u32, index: u32) -> Result<u64> {
    if index >= width {
        return Err(CodecError::BitIndexOutOfRange { index, width });
    }
    Ok(u64::from(width - 1 - index))
}

/// `2^(width - 1 - index)`
pub fn bit_weight(width: u32, index: u32) -> Result<BigUint> {
    Ok(BigUint::one() << position(width, index)?)
}

pub fn get_bit(value: &FixedWidthInteger, index: u32) -> Result<bool> {
    let position = position(value.width(), index)?;
    Ok(value.to_unsigned().bit(position))
}

pub fn toggle_bit(value: &FixedWidthInteger, index: u32) -> Result<FixedWidthInteger> {
    let weight = bit_weight(value.width(), index)?;
    Ok(FixedWidthInteger::from_magnitude(
        value.width(),
        value.to_unsigned() ^ weight,
    ))
}

/// Parses an inclusive MSB-first slice of a binary string as an unsigned
/// integer as wide as the slice. Accepts canonical digits as well as the
/// `0b`-prefixed, byte-grouped form; endpoints may come in either order.
pub fn select_range(bits: &str, from: u32, to: u32) -> Result<FixedWidthInteger> {
    let digits: String = bits
        .trim()
        .trim_start_matches("0b")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if let Some(digit) = digits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(CodecError::InvalidDigit {
            radix: "binary",
            digit,
        });
    }

    let (lo, hi) = (from.min(to), from.max(to));
    let len = digits.len() as u32;
    if hi >= len {
        return Err(CodecError::BitIndexOutOfRange {
            index: hi,
            width: len,
        });
    }
    let slice = &digits[lo as usize..=hi as usize];
    let magnitude = BigUint::parse_bytes(slice.as_bytes(), 2).ok_or(CodecError::MissingDigits)?;
    Ok(FixedWidthInteger::from_magnitude(hi - lo + 1, magnitude))
}

/// [`select_range`] over the canonical binary form of `value`.
pub fn select_value_range(value: &FixedWidthInteger, from: u32, to: u32) -> Result<FixedWidthInteger> {
    select_range(&canonical_binary(value), from, to)
}
