use crate::bits::{select_value_range, toggle_bit};
use crate::codec::canonical_binary;
use crate::error::WidgetError;
use crate::expr::evaluate;
use crate::int::FixedWidthInteger;
use crate::pattern::describe_as_power_expression;
use crate::sanitize::{Radix, Sanitize, Sanitizer};
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Arithmetic expression, see [`crate::expr`].
    #[default]
    Decimal,
    Hexadecimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitGridAction {
    SetInput(String),
    SetFormat(InputFormat),
    SelectStart(u32),
    SelectEnd(u32),
    Toggle(u32),
}

/// A word shown as a grid of bits with an inclusive, MSB-first selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGridState {
    pub width: u32,
    pub input: String,
    pub format: InputFormat,
    pub start: u32,
    pub end: u32,
}

impl BitGridState {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            input: String::new(),
            format: InputFormat::default(),
            start: 0,
            end: width.saturating_sub(1),
        }
    }

    pub fn reduce(self, action: BitGridAction) -> Self {
        debug!(?action, "bit grid action");
        let last = self.width.saturating_sub(1);
        match action {
            BitGridAction::SetInput(input) => Self { input, ..self },
            BitGridAction::SetFormat(format) => Self { format, ..self },
            BitGridAction::SelectStart(index) => Self {
                start: index.min(self.end).min(last),
                ..self
            },
            BitGridAction::SelectEnd(index) => Self {
                end: index.max(self.start).min(last),
                ..self
            },
            BitGridAction::Toggle(index) => self.toggle(index),
        }
    }

    fn toggle(self, index: u32) -> Self {
        if index < self.start || index > self.end {
            return self;
        }
        let Ok(toggled) = toggle_bit(&self.word(), index) else {
            return self;
        };
        let input = render_input(&toggled.to_signed(), self.format);
        Self { input, ..self }
    }

    /// The input's value before it is fitted to the width.
    pub fn value(&self) -> Result<BigInt, WidgetError> {
        match self.format {
            InputFormat::Decimal => Ok(evaluate(&self.input)?),
            InputFormat::Hexadecimal => {
                let sanitized = Sanitizer::new(Sanitize::Strict).sanitize(&self.input, Radix::Hexadecimal)?;
                if sanitized.digits.is_empty() {
                    return Err(WidgetError::InvalidHex);
                }
                let magnitude = BigUint::parse_bytes(sanitized.digits.as_bytes(), 16)
                    .ok_or(WidgetError::InvalidHex)?;
                let value = BigInt::from(magnitude);
                Ok(if sanitized.negative { -value } else { value })
            }
        }
    }

    /// The value fitted to the width; zero when the input does not evaluate.
    pub fn word(&self) -> FixedWidthInteger {
        match self.value() {
            Ok(value) => FixedWidthInteger::from_signed(self.width, &value),
            Err(_) => FixedWidthInteger::zero(self.width),
        }
    }

    pub fn bits(&self) -> String {
        canonical_binary(&self.word())
    }

    /// Bits grouped into bytes, most significant byte first.
    pub fn rows(&self) -> Vec<String> {
        self.bits()
            .as_bytes()
            .chunks(8)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect()
    }

    pub fn selected_bits(&self) -> String {
        self.bits()[self.start as usize..=self.end as usize].to_string()
    }

    pub fn selected_value(&self) -> FixedWidthInteger {
        select_value_range(&self.word(), self.start, self.end)
            .unwrap_or_else(|_| FixedWidthInteger::zero(self.end - self.start + 1))
    }

    pub fn expression(&self) -> String {
        describe_as_power_expression(&self.selected_value().to_unsigned())
    }
}

fn render_input(value: &BigInt, format: InputFormat) -> String {
    match format {
        InputFormat::Decimal => value.to_string(),
        InputFormat::Hexadecimal if value.sign() == num_bigint::Sign::Minus => {
            format!("-0x{:X}", value.magnitude())
        }
        InputFormat::Hexadecimal => format!("0x{:X}", value.magnitude()),
    }
}
