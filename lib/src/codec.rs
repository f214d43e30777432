//! Text codec for fixed-width integers.
//!
//! A [`Codec`] is built from an explicit [`CodecConfig`]. The config carries
//! the two policies a caller has to choose:
//!
//! - [`SignWidth`] decides how many bits a hex or binary literal is read over
//!   when asking for its signed value. Under `Fixed` the literal is always a
//!   `width`-bit word, so `0xff` is `255`. Under `Minimal` the literal is read
//!   over the bits it spells out (`4 * significant hex digits`, or the number of
//!   binary digits typed), so `0xff` is `-1` and `0x0ff` is still `-1`.
//! - [`Sanitize`] decides whether stray characters are dropped or rejected.
//!
//! Parsing never truncates: the parsed magnitude is the literal's value, and
//! formatting masks to the width. Malformed text is an `Err`, never a panic.

use crate::error::{CodecError, Result};
use crate::int::{as_signed, FixedWidthInteger};
use crate::sanitize::{Radix, Sanitize, Sanitized, Sanitizer};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignWidth {
    Fixed,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub width: u32,
    pub sign_width: SignWidth,
    pub sanitize: Sanitize,
}

/// A parsed literal and the width its signed reading uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub value: FixedWidthInteger,
    pub sign_width: u32,
    negative: bool,
}

impl Parsed {
    /// Signed reading of the literal over `sign_width` bits. A literal written
    /// with a leading `-` is already stored as a two's complement word and is
    /// read back over the full width.
    pub fn signed(&self) -> BigInt {
        if self.negative {
            self.value.to_signed()
        } else {
            as_signed(self.value.magnitude(), self.sign_width)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Codec {
    config: CodecConfig,
    sanitizer: Sanitizer,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Result<Self> {
        if config.width == 0 {
            return Err(CodecError::ZeroWidth);
        }
        Ok(Self {
            config,
            sanitizer: Sanitizer::new(config.sanitize),
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn parse_hex(&self, text: &str) -> Result<Parsed> {
        let sanitized = self.sanitizer.sanitize(text, Radix::Hexadecimal)?;
        let sign_width = match self.config.sign_width {
            SignWidth::Fixed => self.config.width,
            SignWidth::Minimal => (sanitized.significant().len() as u32 * 4).max(1),
        };
        self.finish(&sanitized, Radix::Hexadecimal, sign_width)
    }

    pub fn parse_binary(&self, text: &str) -> Result<Parsed> {
        let sanitized = self.sanitizer.sanitize(text, Radix::Binary)?;
        let sign_width = match self.config.sign_width {
            SignWidth::Fixed => self.config.width,
            SignWidth::Minimal => (sanitized.digits.len() as u32).max(1),
        };
        self.finish(&sanitized, Radix::Binary, sign_width)
    }

    /// Non-negative decimal literal, kept untruncated.
    pub fn parse_unsigned(&self, text: &str) -> Result<FixedWidthInteger> {
        let sanitized = self.sanitizer.sanitize(text, Radix::Decimal)?;
        if sanitized.negative {
            return Err(CodecError::NegativeUnsigned);
        }
        let magnitude = digits_to_biguint(&sanitized.digits, Radix::Decimal)?;
        Ok(FixedWidthInteger::from_magnitude(self.config.width, magnitude))
    }

    /// Signed decimal literal, normalized to two's complement.
    pub fn parse_signed(&self, text: &str) -> Result<FixedWidthInteger> {
        let sanitized = self.sanitizer.sanitize(text, Radix::Decimal)?;
        let literal = signed_literal(&sanitized, Radix::Decimal)?;
        Ok(FixedWidthInteger::from_signed(self.config.width, &literal))
    }

    fn finish(&self, sanitized: &Sanitized, radix: Radix, sign_width: u32) -> Result<Parsed> {
        let literal = signed_literal(sanitized, radix)?;
        let value = if sanitized.negative {
            FixedWidthInteger::from_signed(self.config.width, &literal)
        } else {
            FixedWidthInteger::from_magnitude(self.config.width, literal.magnitude().clone())
        };
        Ok(Parsed {
            value,
            sign_width,
            negative: sanitized.negative,
        })
    }
}

fn digits_to_biguint(digits: &str, radix: Radix) -> Result<BigUint> {
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), radix.base()).ok_or(CodecError::MissingDigits)
}

fn signed_literal(sanitized: &Sanitized, radix: Radix) -> Result<BigInt> {
    let magnitude = BigInt::from(digits_to_biguint(&sanitized.digits, radix)?);
    Ok(if sanitized.negative { -magnitude } else { magnitude })
}

/// Hex text of the masked value. Padded output is `0x` followed by exactly
/// `ceil(width / 4)` digits; unpadded output is the bare minimal digits.
pub fn format_hex(value: &FixedWidthInteger, padded: bool) -> String {
    let digits = value.to_unsigned().to_str_radix(16);
    if padded {
        let len = value.width().div_ceil(4) as usize;
        format!("0x{:0>len$}", digits)
    } else {
        digits
    }
}

/// `0b` followed by `width` digits in space-separated groups of eight,
/// counted from the most significant end.
pub fn format_binary(value: &FixedWidthInteger) -> String {
    let digits = canonical_binary(value);
    let groups: Vec<&str> = digits
        .as_bytes()
        .chunks(8)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();
    format!("0b{}", groups.join(" "))
}

/// Exactly `width` binary digits, MSB first, with no prefix or grouping.
pub fn canonical_binary(value: &FixedWidthInteger) -> String {
    let len = value.width() as usize;
    format!("{:0>len$}", value.to_unsigned().to_str_radix(2))
}

pub fn format_signed(value: &FixedWidthInteger) -> String {
    value.to_signed().to_string()
}

pub fn format_unsigned(value: &FixedWidthInteger) -> String {
    value.to_unsigned().to_string()
}
