//! Storage slot keys and decoding of raw storage words.

use super::Result;
use crate::codec::format_signed;
use crate::error::WidgetError;
use crate::int::FixedWidthInteger;
use crate::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

pub const ADDRESS_BYTES: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Decimal or `0x` hex slot index.
    #[default]
    Number,
    /// A 32-byte hash such as a mapping key's slot.
    Bytes32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Uint256,
    Int256,
    Address,
    Bool,
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSlot(pub U256);

impl StorageSlot {
    pub fn parse(kind: SlotKind, text: &str) -> Result<Self> {
        let text = text.trim();
        let word = match kind {
            SlotKind::Number => match text.strip_prefix("0x") {
                Some(digits) => U256::from_str_radix(digits, 16).map_err(|_| WidgetError::InvalidSlot)?,
                None => U256::from_dec_str(text).map_err(|_| WidgetError::InvalidSlot)?,
            },
            SlotKind::Bytes32 => {
                let digits = text.strip_prefix("0x").ok_or(WidgetError::InvalidSlot)?;
                if digits.len() != 64 {
                    return Err(WidgetError::InvalidSlot);
                }
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(digits, &mut bytes)?;
                U256::from(bytes)
            }
        };
        Ok(Self(word))
    }

    /// The slot as the 32-byte `0x` quantity `eth_getStorageAt` takes.
    pub fn key(&self) -> String {
        format!("0x{}", hex::encode(self.0.to_word_bytes()))
    }
}

impl Display for StorageSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn parse_address(text: &str) -> Result<[u8; ADDRESS_BYTES]> {
    let digits = text.trim().strip_prefix("0x").ok_or(WidgetError::InvalidAddress)?;
    let mut address = [0u8; ADDRESS_BYTES];
    hex::decode_to_slice(digits, &mut address).map_err(|_| WidgetError::InvalidAddress)?;
    Ok(address)
}

/// Parameters of an `eth_getStorageAt` call for one slot at the latest block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageQuery {
    pub address: String,
    pub slot: String,
    pub block: String,
}

impl StorageQuery {
    pub fn new(address: &str, slot: StorageSlot) -> Result<Self> {
        let address = parse_address(address)?;
        Ok(Self {
            address: format!("0x{}", hex::encode(address)),
            slot: slot.key(),
            block: "latest".to_string(),
        })
    }
}

/// A raw storage word as returned by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageValue([u8; 32]);

impl StorageValue {
    /// Accepts up to 32 bytes of `0x` hex; shorter values are left-padded.
    pub fn from_hex(text: &str) -> Result<Self> {
        let text = text.trim();
        let bytes = hex::decode(text.strip_prefix("0x").unwrap_or(text))?;
        if bytes.len() > 32 {
            return Err(WidgetError::StorageValueTooLong);
        }
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self(word))
    }

    pub fn render(&self, ty: ValueType) -> String {
        match ty {
            ValueType::Uint256 => U256::from(self.0).to_string(),
            ValueType::Int256 => format_signed(&FixedWidthInteger::from(U256::from(self.0))),
            ValueType::Address => format!("0x{}", hex::encode(&self.0[32 - ADDRESS_BYTES..])),
            ValueType::Bool => match self.0[31] & 1 {
                1 => "TRUE".to_string(),
                _ => "FALSE".to_string(),
            },
            ValueType::Raw => format!("0x{}", hex::encode(self.0)),
        }
    }
}

/// Renders an optional value, `N/A` when nothing has been fetched.
pub fn render_value(value: Option<&StorageValue>, ty: ValueType) -> String {
    value.map_or_else(|| "N/A".to_string(), |value| value.render(ty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_numbers_become_padded_keys() {
        let slot = StorageSlot::parse(SlotKind::Number, "5").unwrap();
        assert_eq!(slot.key(), format!("0x{}05", "0".repeat(62)));
        let hex = StorageSlot::parse(SlotKind::Number, "0x0a").unwrap();
        assert_eq!(hex.0, U256::from(10u64));
        assert!(StorageSlot::parse(SlotKind::Number, "five").is_err());
    }

    #[test]
    fn bytes32_slots_need_full_hash() {
        let hash = format!("0x{}", "ab".repeat(32));
        let slot = StorageSlot::parse(SlotKind::Bytes32, &hash).unwrap();
        assert_eq!(slot.key(), hash);
        assert!(StorageSlot::parse(SlotKind::Bytes32, "0xabcd").is_err());
        assert!(StorageSlot::parse(SlotKind::Bytes32, &"ab".repeat(32)).is_err());
    }

    #[test]
    fn renders_storage_words() {
        let mut raw = format!("0x{}", "00".repeat(12));
        raw.push_str(&"11".repeat(19));
        raw.push_str("01");
        let value = StorageValue::from_hex(&raw).unwrap();
        assert_eq!(
            value.render(ValueType::Address),
            format!("0x{}01", "11".repeat(19))
        );
        assert_eq!(value.render(ValueType::Bool), "TRUE");
        assert_eq!(value.render(ValueType::Raw), raw);
    }

    #[test]
    fn renders_numbers() {
        let value = StorageValue::from_hex("0x2a").unwrap();
        assert_eq!(value.render(ValueType::Uint256), "42");
        assert_eq!(value.render(ValueType::Bool), "FALSE");
        let minus_one = StorageValue::from_hex(&format!("0x{}", "ff".repeat(32))).unwrap();
        assert_eq!(minus_one.render(ValueType::Int256), "-1");
        assert_eq!(render_value(None, ValueType::Uint256), "N/A");
        assert!(StorageValue::from_hex(&"00".repeat(33)).is_err());
    }

    #[test]
    fn storage_query_params() {
        let slot = StorageSlot::parse(SlotKind::Number, "0").unwrap();
        let query = StorageQuery::new(&format!("0x{}", "Ab".repeat(20)), slot).unwrap();
        assert_eq!(query.address, format!("0x{}", "ab".repeat(20)));
        assert_eq!(query.block, "latest");
        assert!(StorageQuery::new("0x1234", slot).is_err());
    }
}
