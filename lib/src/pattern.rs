//! Short power-of-two spellings of integers.
//!
//! [`describe_as_power_expression`] tries each recognizer in [`RECOGNIZERS`]
//! in order and returns the first match, falling back to plain decimal.
//! The output is for reading, it is not meant to be parsed back exactly
//! (though the bit grid's expression input does accept it).

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Maximum number of terms the sparse sum recognizer spells out.
pub const MAX_SUM_TERMS: usize = 4;

pub trait PatternRecognizer {
    fn recognize(&self, value: &BigUint) -> Option<String>;
}

/// `0`
pub struct ZeroPattern;

/// `2^k`
pub struct PowerOfTwo;

/// `2^k - 1`
pub struct AllOnes;

/// `2^a + 2^b + ...` with at most [`MAX_SUM_TERMS`] terms.
pub struct SparseSum;

/// `2^hi - 2^lo` for a single run of ones.
pub struct ContiguousRun;

pub static RECOGNIZERS: [&(dyn PatternRecognizer + Sync); 5] =
    [&ZeroPattern, &PowerOfTwo, &AllOnes, &SparseSum, &ContiguousRun];

/// Exponent `k` when `value == 2^k`.
fn log2_exact(value: &BigUint) -> Option<u64> {
    if value.is_zero() || value.count_ones() != 1 {
        return None;
    }
    value.trailing_zeros()
}

impl PatternRecognizer for ZeroPattern {
    fn recognize(&self, value: &BigUint) -> Option<String> {
        value.is_zero().then(|| "0".to_string())
    }
}

impl PatternRecognizer for PowerOfTwo {
    fn recognize(&self, value: &BigUint) -> Option<String> {
        log2_exact(value).map(|k| format!("2^{k}"))
    }
}

impl PatternRecognizer for AllOnes {
    fn recognize(&self, value: &BigUint) -> Option<String> {
        log2_exact(&(value + BigUint::one())).map(|k| format!("2^{k} - 1"))
    }
}

impl PatternRecognizer for SparseSum {
    fn recognize(&self, value: &BigUint) -> Option<String> {
        if value.is_zero() || value.count_ones() > MAX_SUM_TERMS as u64 {
            return None;
        }
        let terms: Vec<String> = (0..value.bits())
            .rev()
            .filter(|bit| value.bit(*bit))
            .map(|bit| format!("2^{bit}"))
            .collect();
        Some(terms.join(" + "))
    }
}

impl PatternRecognizer for ContiguousRun {
    fn recognize(&self, value: &BigUint) -> Option<String> {
        let lo = value.trailing_zeros()?;
        let run = value >> lo;
        log2_exact(&(run + BigUint::one())).map(|len| format!("2^{} - 2^{}", lo + len, lo))
    }
}

pub fn describe_as_power_expression(value: &BigUint) -> String {
    RECOGNIZERS
        .iter()
        .find_map(|recognizer| recognizer.recognize(value))
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(n: u64) -> String {
        describe_as_power_expression(&BigUint::from(n))
    }

    #[test]
    fn simple_patterns() {
        assert_eq!(describe(0), "0");
        assert_eq!(describe(1), "2^0");
        assert_eq!(describe(1024), "2^10");
        assert_eq!(describe(1023), "2^10 - 1");
        assert_eq!(describe(3), "2^2 - 1");
    }

    #[test]
    fn sparse_sums_list_high_bits_first() {
        assert_eq!(describe(17), "2^4 + 2^0");
        assert_eq!(describe(0b1010_1010), "2^7 + 2^5 + 2^3 + 2^1");
    }

    #[test]
    fn contiguous_runs() {
        assert_eq!(describe(0b1111_1000), "2^8 - 2^3");
        assert_eq!(describe(0b1111_1110), "2^8 - 2^1");
    }

    #[test]
    fn falls_back_to_decimal() {
        assert_eq!(describe(0b1011_1011), "187");
    }

    #[test]
    fn handles_full_words() {
        let max = (BigUint::one() << 256u32) - BigUint::one();
        assert_eq!(describe_as_power_expression(&max), "2^256 - 1");
        let high = (BigUint::one() << 255u32) + BigUint::one();
        assert_eq!(describe_as_power_expression(&high), "2^255 + 2^0");
    }
}
