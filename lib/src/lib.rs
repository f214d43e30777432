use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use uint::construct_uint;

construct_uint! {
    #[derive(Serialize, Deserialize)]
    pub struct U256(4);
}
pub mod bits;
pub mod codec;
pub mod error;
pub mod expr;
pub mod int;
pub mod pattern;
pub mod sanitize;
pub mod widgets;

pub use codec::{Codec, CodecConfig, Parsed, SignWidth};
pub use error::{CodecError, WidgetError};
pub use int::FixedWidthInteger;
pub use sanitize::Sanitize;

/// Bit width of an EVM word.
pub const WORD_BITS: u32 = 256;

impl U256 {
    /// Big-endian bytes, the inverse of `From<[u8; 32]>`.
    pub fn to_word_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.to_big_endian(&mut bytes);
        bytes
    }
}

impl From<U256> for FixedWidthInteger {
    fn from(value: U256) -> Self {
        let bytes = value.to_word_bytes();
        FixedWidthInteger::from_magnitude(WORD_BITS, BigUint::from_bytes_be(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_bytes_are_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x2a;
        bytes[0] = 0x80;
        let word = U256::from(bytes);
        assert_eq!(word.low_u64(), 0x2a);
        assert!(word.bit(255));
        assert_eq!(word.to_word_bytes(), bytes);
    }

    #[test]
    fn word_converts_to_fixed_width() {
        let word = U256::from(1024u64);
        let value = FixedWidthInteger::from(word);
        assert_eq!(value.width(), WORD_BITS);
        assert_eq!(value.magnitude(), &BigUint::from(1024u32));
    }
}
