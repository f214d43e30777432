use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// An integer tied to a bit width.
///
/// The magnitude is kept exactly as constructed: parsers preserve the raw
/// value of a literal even when it does not fit, and `mask_to_width` is what
/// enforces `0 <= magnitude < 2^width`. Every formatter and bit operation
/// masks before it reads, so an oversized magnitude never leaks into output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedWidthInteger {
    width: u32,
    magnitude: BigUint,
}

impl FixedWidthInteger {
    pub fn zero(width: u32) -> Self {
        Self {
            width,
            magnitude: BigUint::zero(),
        }
    }

    /// Wraps `magnitude` without masking it.
    pub fn from_magnitude(width: u32, magnitude: BigUint) -> Self {
        Self { width, magnitude }
    }

    /// Two's complement encoding of `value` in `width` bits.
    pub fn from_signed(width: u32, value: &BigInt) -> Self {
        Self {
            width,
            magnitude: as_unsigned(value, width),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn magnitude(&self) -> &BigUint {
        &self.magnitude
    }

    pub fn is_normalized(&self) -> bool {
        self.magnitude.bits() <= u64::from(self.width)
    }

    pub fn mask_to_width(&self) -> Self {
        Self {
            width: self.width,
            magnitude: &self.magnitude & mask(self.width),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mask_to_width().magnitude.is_zero()
    }

    /// Whether the most significant bit is set.
    pub fn is_negative(&self) -> bool {
        self.width > 0 && self.magnitude.bit(u64::from(self.width - 1))
    }

    pub fn to_signed(&self) -> BigInt {
        as_signed(&self.magnitude, self.width)
    }

    pub fn to_unsigned(&self) -> BigUint {
        &self.magnitude & mask(self.width)
    }

    /// Big-endian bytes, `ceil(width / 8)` long.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let len = self.width.div_ceil(8) as usize;
        let digits = self.to_unsigned().to_bytes_be();
        let mut out = vec![0u8; len];
        if !self.to_unsigned().is_zero() {
            out[len - digits.len()..].copy_from_slice(&digits);
        }
        out
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = self.to_be_bytes();
        bytes.reverse();
        bytes
    }
}

impl Display for FixedWidthInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_unsigned())
    }
}

/// `2^width`
pub fn modulus(width: u32) -> BigUint {
    BigUint::one() << width
}

/// All-ones mask of `width` bits.
pub fn mask(width: u32) -> BigUint {
    modulus(width) - BigUint::one()
}

/// Reads the low `width` bits of `raw` as a two's complement number.
pub fn as_signed(raw: &BigUint, width: u32) -> BigInt {
    if width == 0 {
        return BigInt::zero();
    }
    let masked = raw & mask(width);
    if masked.bit(u64::from(width - 1)) {
        BigInt::from(masked) - BigInt::from(modulus(width))
    } else {
        BigInt::from(masked)
    }
}

/// `value mod 2^width`, always non-negative.
pub fn as_unsigned(value: &BigInt, width: u32) -> BigUint {
    let (sign, abs) = value.clone().into_parts();
    let low = abs & mask(width);
    match sign {
        Sign::Minus if !low.is_zero() => modulus(width) - low,
        _ => low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_reading_follows_top_bit() {
        assert_eq!(as_signed(&BigUint::from(0xffu32), 8), BigInt::from(-1));
        assert_eq!(as_signed(&BigUint::from(0x7fu32), 8), BigInt::from(127));
        assert_eq!(as_signed(&BigUint::from(0x80u32), 8), BigInt::from(-128));
        assert_eq!(as_signed(&BigUint::from(0xffu32), 256), BigInt::from(255));
    }

    #[test]
    fn negative_values_wrap_into_width() {
        assert_eq!(as_unsigned(&BigInt::from(-1), 8), BigUint::from(0xffu32));
        assert_eq!(as_unsigned(&BigInt::from(-256), 8), BigUint::zero());
        assert_eq!(as_unsigned(&BigInt::from(300), 8), BigUint::from(44u32));
        let minus_one = FixedWidthInteger::from_signed(256, &BigInt::from(-1));
        assert_eq!(minus_one.magnitude(), &mask(256));
        assert!(minus_one.is_negative());
    }

    #[test]
    fn masking_restores_the_width_invariant() {
        let raw = FixedWidthInteger::from_magnitude(8, BigUint::from(0x1ffu32));
        assert!(!raw.is_normalized());
        let masked = raw.mask_to_width();
        assert!(masked.is_normalized());
        assert_eq!(masked.magnitude(), &BigUint::from(0xffu32));
    }

    #[test]
    fn bytes_are_padded_to_width() {
        let value = FixedWidthInteger::from_magnitude(16, BigUint::from(0x1234u32));
        assert_eq!(value.to_be_bytes(), vec![0x12, 0x34]);
        assert_eq!(value.to_le_bytes(), vec![0x34, 0x12]);
        assert_eq!(FixedWidthInteger::zero(64).to_be_bytes(), vec![0u8; 8]);
        let narrow = FixedWidthInteger::from_magnitude(12, BigUint::from(0xabcu32));
        assert_eq!(narrow.to_be_bytes(), vec![0x0a, 0xbc]);
    }
}
