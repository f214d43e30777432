//! Input clean-up that runs before digits are interpreted.
//!
//! The sanitizer splits a literal into its sign and digit string. Whitespace
//! anywhere in the literal is always dropped. What happens to characters
//! outside the radix alphabet is decided by [`Sanitize`]: the lenient policy
//! drops them silently (so `0xdead_beef` and `de:ad:be:ef` both read as
//! `deadbeef`), the strict policy rejects the literal. Decimal literals never
//! tolerate stray characters.

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sanitize {
    Lenient,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Radix::Binary => "binary",
            Radix::Decimal => "decimal",
            Radix::Hexadecimal => "hexadecimal",
        }
    }

    fn prefixes(self) -> &'static [&'static str] {
        match self {
            Radix::Binary => &["0b", "0B"],
            Radix::Decimal => &[],
            Radix::Hexadecimal => &["0x", "0X"],
        }
    }

    fn signed(self) -> bool {
        !matches!(self, Radix::Binary)
    }
}

/// A literal reduced to its sign and bare digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub negative: bool,
    pub digits: String,
}

impl Sanitized {
    /// Digits with leading zeros removed.
    pub fn significant(&self) -> &str {
        self.digits.trim_start_matches('0')
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    policy: Sanitize,
}

impl Sanitizer {
    pub fn new(policy: Sanitize) -> Self {
        Self { policy }
    }

    pub fn sanitize(&self, text: &str, radix: Radix) -> Result<Sanitized> {
        let mut rest = text.trim();
        let mut negative = false;
        if radix.signed() {
            if let Some(stripped) = rest.strip_prefix('-') {
                negative = true;
                rest = stripped.trim_start();
            }
        }
        for prefix in radix.prefixes() {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped;
                break;
            }
        }

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            if c.is_whitespace() {
                continue;
            }
            if c.is_digit(radix.base()) {
                digits.push(c.to_ascii_lowercase());
                continue;
            }
            if self.policy == Sanitize::Strict || radix == Radix::Decimal {
                return Err(CodecError::InvalidDigit {
                    radix: radix.name(),
                    digit: c,
                });
            }
        }

        if negative && digits.is_empty() {
            return Err(CodecError::MissingDigits);
        }
        Ok(Sanitized { negative, digits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_hex_drops_noise() {
        let sanitizer = Sanitizer::new(Sanitize::Lenient);
        let out = sanitizer
            .sanitize("  0xDE ad_be:EF ", Radix::Hexadecimal)
            .unwrap();
        assert_eq!(out.digits, "deadbeef");
        assert!(!out.negative);
    }

    #[test]
    fn strict_hex_rejects_noise() {
        let sanitizer = Sanitizer::new(Sanitize::Strict);
        assert_eq!(
            sanitizer.sanitize("0xde_ad", Radix::Hexadecimal),
            Err(CodecError::InvalidDigit {
                radix: "hexadecimal",
                digit: '_'
            })
        );
        assert_eq!(
            sanitizer.sanitize("0x de ad", Radix::Hexadecimal).unwrap().digits,
            "dead"
        );
    }

    #[test]
    fn negative_hex_prefix() {
        let sanitizer = Sanitizer::new(Sanitize::Strict);
        let out = sanitizer.sanitize("-0xff", Radix::Hexadecimal).unwrap();
        assert!(out.negative);
        assert_eq!(out.digits, "ff");
        assert_eq!(
            sanitizer.sanitize("-", Radix::Decimal),
            Err(CodecError::MissingDigits)
        );
    }

    #[test]
    fn binary_has_no_sign() {
        let lenient = Sanitizer::new(Sanitize::Lenient);
        let out = lenient.sanitize("-0b1010 0101", Radix::Binary).unwrap();
        assert!(!out.negative);
        assert_eq!(out.digits, "010100101");
        let strict = Sanitizer::new(Sanitize::Strict);
        assert!(strict.sanitize("0b1021", Radix::Binary).is_err());
    }

    #[test]
    fn decimal_is_never_lenient() {
        let lenient = Sanitizer::new(Sanitize::Lenient);
        assert!(lenient.sanitize("12a", Radix::Decimal).is_err());
        assert_eq!(lenient.sanitize(" 1 000 ", Radix::Decimal).unwrap().digits, "1000");
        assert_eq!(lenient.sanitize("", Radix::Decimal).unwrap().digits, "");
    }

    #[test]
    fn significant_digits_skip_leading_zeros() {
        let out = Sanitizer::new(Sanitize::Strict)
            .sanitize("0x00ff", Radix::Hexadecimal)
            .unwrap();
        assert_eq!(out.significant(), "ff");
    }
}
