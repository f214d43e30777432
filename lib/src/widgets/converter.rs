use crate::codec::{format_binary, format_hex, format_signed, format_unsigned, Codec};
use crate::int::FixedWidthInteger;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Uint,
    Int,
    Hex,
    Binary,
}

/// The four linked text fields of the converter. The field being edited keeps
/// the user's text verbatim; the other three are recomputed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterFields {
    pub uint: String,
    pub int: String,
    pub hex: String,
    pub binary: String,
}

impl ConverterFields {
    pub fn reduce(self, codec: &Codec, field: Field, raw: &str) -> Self {
        debug!(?field, raw, "converter edit");
        match field {
            Field::Hex => match codec.parse_hex(raw) {
                Ok(parsed) => Self {
                    uint: format_unsigned(&parsed.value),
                    int: parsed.signed().to_string(),
                    hex: raw.to_string(),
                    binary: format_binary(&parsed.value),
                },
                Err(_) => Self {
                    hex: raw.to_string(),
                    ..self
                },
            },
            Field::Binary => match codec.parse_binary(raw) {
                Ok(parsed) => Self {
                    uint: format_unsigned(&parsed.value),
                    int: parsed.signed().to_string(),
                    hex: format_hex(&parsed.value, false),
                    binary: raw.to_string(),
                },
                Err(_) => Self {
                    binary: raw.to_string(),
                    ..self
                },
            },
            Field::Uint => {
                if raw.trim_start().starts_with('-') {
                    return self;
                }
                match codec.parse_unsigned(raw) {
                    Ok(value) => Self::from_decimal(&value, Field::Uint, raw),
                    Err(_) => Self {
                        uint: raw.to_string(),
                        ..self
                    },
                }
            }
            Field::Int => match codec.parse_signed(raw) {
                Ok(value) => Self::from_decimal(&value, Field::Int, raw),
                Err(_) => Self {
                    int: raw.to_string(),
                    ..self
                },
            },
        }
    }

    fn from_decimal(value: &FixedWidthInteger, field: Field, raw: &str) -> Self {
        let (uint, int) = match field {
            Field::Uint => (raw.to_string(), format_signed(value)),
            _ => (format_unsigned(value), raw.to_string()),
        };
        Self {
            uint,
            int,
            hex: format_hex(value, false),
            binary: format_binary(value),
        }
    }

    /// Full-width hex of whatever the hex field currently holds.
    pub fn padded_hex(&self, codec: &Codec) -> Option<String> {
        if self.hex.is_empty() {
            return None;
        }
        codec
            .parse_hex(&self.hex)
            .ok()
            .map(|parsed| format_hex(&parsed.value, true))
    }
}
