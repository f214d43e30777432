//! Anchor-style instruction data and PDA seed encoding.
//!
//! Instruction data is an 8-byte discriminator, the first bytes of
//! `sha256("global:<name>")`, followed by the Borsh encoding of each
//! argument in declaration order.

use super::Result;
use crate::error::WidgetError;
use crate::int::FixedWidthInteger;
use crate::sanitize::{Radix, Sanitize, Sanitizer};
use base58::{FromBase58, ToBase58};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use std::collections::HashMap;

pub const DISCRIMINATOR_LEN: usize = 8;
pub const PUBLIC_KEY_LEN: usize = 32;
pub const MAX_SEED_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serialized {
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    pub args: Vec<u8>,
}

impl Serialized {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.discriminator.to_vec();
        out.extend_from_slice(&self.args);
        out
    }
}

/// Reads the function name and non-`Context` arguments from Rust source such
/// as `pub fn create_offer(ctx: Context<CreateOffer>, id: u64) -> Result<()>`.
pub fn parse_signature(source: &str) -> Result<Instruction> {
    let source: String = source
        .lines()
        .map(|line| line.split("//").next().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");

    let (name, rest) = find_function(&source).ok_or(WidgetError::MissingFunctionName)?;
    let inner = rest
        .strip_prefix('(')
        .and_then(|rest| matching_close(rest).map(|end| &rest[..end]))
        .ok_or(WidgetError::MissingArguments)?;

    let args = split_top_level(inner)
        .into_iter()
        .filter_map(|arg| {
            let (name, ty) = arg.split_once(':')?;
            let name = name.trim().trim_start_matches("mut ").trim();
            let ty = ty.trim();
            if name.is_empty() || ty.is_empty() || ty.starts_with("Context") {
                return None;
            }
            Some(Argument {
                name: name.to_string(),
                ty: ty.to_string(),
            })
        })
        .collect();

    Ok(Instruction {
        name: name.to_string(),
        args,
    })
}

/// Name after the first `fn` keyword and the text from its `(` onwards.
fn find_function(source: &str) -> Option<(&str, &str)> {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    let mut offset = 0;
    while let Some(found) = source[offset..].find("fn") {
        let at = offset + found;
        offset = at + 2;
        let before_ok = source[..at].chars().next_back().map_or(true, |c| !is_ident(c));
        let after = &source[at + 2..];
        if !before_ok || !after.starts_with(char::is_whitespace) {
            continue;
        }
        let after = after.trim_start();
        let end = after.find(|c: char| !is_ident(c)).unwrap_or(after.len());
        if end == 0 {
            continue;
        }
        let rest = after[end..].trim_start();
        if rest.starts_with('(') {
            return Some((&after[..end], rest));
        }
    }
    None
}

/// Byte offset of the `)` closing a group whose `(` was just consumed.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' | '[' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' | '>' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

pub fn discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("global:{name}");
    let digest = hex::decode(sha256::digest(preimage)).unwrap_or_default();
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Encodes `values` (keyed by argument name) for `instruction`.
pub fn serialize(instruction: &Instruction, values: &HashMap<String, String>) -> Result<Serialized> {
    let mut args = Vec::new();
    for arg in &instruction.args {
        let value = values
            .get(&arg.name)
            .ok_or_else(|| WidgetError::MissingValue(arg.name.clone()))?;
        args.extend(encode_argument(&arg.ty, value)?);
    }
    Ok(Serialized {
        discriminator: discriminator(&instruction.name),
        args,
    })
}

fn encode_argument(ty: &str, value: &str) -> Result<Vec<u8>> {
    let invalid = || WidgetError::InvalidValue {
        ty: ty.to_string(),
        value: value.to_string(),
    };
    match ty {
        "u8" | "u16" | "u32" | "u64" | "u128" => {
            let bits: u32 = ty[1..].parse().map_err(|_| invalid())?;
            encode_integer(value, bits, false).ok_or_else(invalid)
        }
        "i8" | "i16" | "i32" | "i64" | "i128" => {
            let bits: u32 = ty[1..].parse().map_err(|_| invalid())?;
            encode_integer(value, bits, true).ok_or_else(invalid)
        }
        "bool" => match value.trim() {
            "true" | "1" => Ok(vec![1]),
            "false" | "0" | "" => Ok(vec![0]),
            _ => Err(invalid()),
        },
        "String" | "&str" => {
            let len = u32::try_from(value.len()).map_err(|_| invalid())?;
            let mut out = len.to_le_bytes().to_vec();
            out.extend_from_slice(value.as_bytes());
            Ok(out)
        }
        "Pubkey" | "PublicKey" => Ok(decode_public_key(value)?.to_vec()),
        other => Err(WidgetError::UnsupportedType(other.to_string())),
    }
}

/// Little-endian two's complement of a decimal or `0x` literal, or `None`
/// when it does not fit the integer type.
fn encode_integer(text: &str, bits: u32, signed: bool) -> Option<Vec<u8>> {
    let value = parse_integer(text)?;
    let (min, max) = if signed {
        let half = BigInt::one() << (bits - 1);
        (-half.clone(), half - BigInt::one())
    } else {
        (BigInt::zero(), (BigInt::one() << bits) - BigInt::one())
    };
    if value < min || value > max {
        return None;
    }
    Some(FixedWidthInteger::from_signed(bits, &value).to_le_bytes())
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let sanitizer = Sanitizer::new(Sanitize::Strict);
    let trimmed = text.trim().trim_start_matches('-');
    let radix = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        Radix::Hexadecimal
    } else {
        Radix::Decimal
    };
    let sanitized = sanitizer.sanitize(text, radix).ok()?;
    if sanitized.digits.is_empty() {
        return None;
    }
    let magnitude = BigInt::from(BigUint::parse_bytes(sanitized.digits.as_bytes(), radix.base())?);
    Some(if sanitized.negative { -magnitude } else { magnitude })
}

/// Base58 or `0x` hex text of a 32-byte public key.
pub fn decode_public_key(text: &str) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let text = text.trim();
    let bytes = match text.strip_prefix("0x") {
        Some(digits) => hex::decode(digits).map_err(|_| WidgetError::InvalidPublicKey)?,
        None => text.from_base58().map_err(|_| WidgetError::InvalidPublicKey)?,
    };
    bytes.try_into().map_err(|_| WidgetError::InvalidPublicKey)
}

pub fn encode_base58(bytes: &[u8]) -> String {
    bytes.to_base58()
}

/// A PDA seed as entered: a kind and its text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    String(String),
    U8(String),
    U64(String),
    PublicKey(String),
}

impl Seed {
    /// Parses `kind:value`, e.g. `u64:42` or `string:offer`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (kind, value) = spec
            .split_once(':')
            .ok_or_else(|| WidgetError::UnsupportedType(spec.to_string()))?;
        let value = value.to_string();
        match kind.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Seed::String(value)),
            "u8" => Ok(Seed::U8(value)),
            "u64" => Ok(Seed::U64(value)),
            "publickey" | "pubkey" => Ok(Seed::PublicKey(value)),
            other => Err(WidgetError::UnsupportedType(other.to_string())),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Seed::String(s) => s.as_bytes().to_vec(),
            Seed::U8(v) => encode_argument("u8", v)?,
            Seed::U64(v) => encode_argument("u64", v)?,
            Seed::PublicKey(v) => decode_public_key(v)?.to_vec(),
        };
        if bytes.len() > MAX_SEED_LEN {
            return Err(WidgetError::SeedTooLong { max: MAX_SEED_LEN });
        }
        Ok(bytes)
    }
}
