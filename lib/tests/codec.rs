use bitlib::bits::{select_range, select_value_range, shift_left, shift_right, toggle_bit};
use bitlib::codec::{canonical_binary, format_binary, format_hex, format_signed};
use bitlib::pattern::describe_as_power_expression;
use bitlib::{Codec, CodecConfig, FixedWidthInteger, Sanitize, SignWidth};
use num_bigint::{BigInt, BigUint};
use num_traits::One;

fn codec(sign_width: SignWidth) -> Codec {
    Codec::new(CodecConfig {
        width: 256,
        sign_width,
        sanitize: Sanitize::Lenient,
    })
    .unwrap()
}

fn samples() -> Vec<FixedWidthInteger> {
    let top = BigUint::one() << 255u32;
    [
        BigUint::from(0u32),
        BigUint::from(1u32),
        BigUint::from(0xdead_beef_u64),
        top.clone(),
        top.clone() - BigUint::one(),
        (top << 1u32) - BigUint::one(),
        BigUint::parse_bytes(b"123456789abcdef0fedcba987654321", 16).unwrap(),
    ]
    .into_iter()
    .map(|n| FixedWidthInteger::from_magnitude(256, n))
    .collect()
}

#[test]
fn hex_round_trip_ignores_prefix_case_and_spacing() {
    let codec = codec(SignWidth::Fixed);
    let canonical = format!("0x{}deadbeef", "0".repeat(56));
    for input in ["0xdeadbeef", "DEADBEEF", "0xDE AD BE EF", "  dead\tbeef  "] {
        let parsed = codec.parse_hex(input).unwrap();
        assert_eq!(format_hex(&parsed.value, true), canonical, "input {input:?}");
    }
}

#[test]
fn binary_round_trip() {
    let codec = codec(SignWidth::Fixed);
    for value in samples() {
        let text = format_binary(&value);
        assert_eq!(codec.parse_binary(&text).unwrap().value, value);
    }
}

#[test]
fn signed_symmetry() {
    let codec = codec(SignWidth::Fixed);
    for value in samples() {
        let text = format_signed(&value);
        assert_eq!(text.starts_with('-'), value.is_negative());
        let back = codec.parse_signed(&text).unwrap().mask_to_width();
        assert_eq!(back, value);
    }
}

#[test]
fn oversized_shifts_clear_the_word() {
    for value in samples() {
        assert!(shift_left(&value, 300).is_zero());
        assert!(shift_right(&value, 300).is_zero());
    }
}

#[test]
fn toggle_is_an_involution() {
    for value in samples() {
        for index in [0, 1, 127, 254, 255] {
            let twice = toggle_bit(&toggle_bit(&value, index).unwrap(), index).unwrap();
            assert_eq!(twice, value);
        }
    }
}

#[test]
fn power_expressions() {
    let describe = |n: u32| describe_as_power_expression(&BigUint::from(n));
    assert_eq!(describe(1024), "2^10");
    assert_eq!(describe(1023), "2^10 - 1");
    assert_eq!(describe(0), "0");
    assert_eq!(describe(17), "2^4 + 2^0");
}

#[test]
fn ff_under_minimal_policy_is_minus_one() {
    let parsed = codec(SignWidth::Minimal).parse_hex("0xff").unwrap();
    assert_eq!(parsed.signed(), BigInt::from(-1));
}

#[test]
fn ff_under_fixed_policy_is_255() {
    let parsed = codec(SignWidth::Fixed).parse_hex("0xff").unwrap();
    assert_eq!(parsed.signed(), BigInt::from(255));
}

#[test]
fn select_low_bits_of_five() {
    let five = codec(SignWidth::Fixed).parse_unsigned("5").unwrap();
    let bits = canonical_binary(&five);
    assert!(bits.ends_with("0000000101"));

    let low3 = select_range(&bits, 253, 255).unwrap();
    assert_eq!(low3.width(), 3);
    assert_eq!(low3.magnitude(), &BigUint::from(5u32));

    let low4 = select_value_range(&five, 252, 255).unwrap();
    assert_eq!(low4.width(), 4);
    assert_eq!(low4.magnitude(), &BigUint::from(5u32));
}
