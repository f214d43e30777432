use crate::bits::{shift_left, shift_right};
use crate::codec::format_hex;
use crate::error::WidgetError;
use crate::int::FixedWidthInteger;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// Hex digits in the trailing 20 bytes of a word, where an address sits.
pub const ADDRESS_HEX_DIGITS: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" | "<<" => Ok(Direction::Left),
            "right" | "r" | ">>" => Ok(Direction::Right),
            other => Err(format!("unknown shift direction {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShifterAction {
    SetInput(String),
    SetAmount(u32),
    SetDirection(Direction),
    Calculate,
    Reset,
}

/// Repeated shifts of one word. Each `Calculate` shifts the previous result
/// (or the input, on the first step) and appends a line to `history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShifterState {
    pub width: u32,
    pub input: String,
    pub amount: u32,
    pub direction: Direction,
    pub error: Option<String>,
    pub current: Option<FixedWidthInteger>,
    pub history: Vec<String>,
}

impl ShifterState {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            input: String::new(),
            amount: 0,
            direction: Direction::default(),
            error: None,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn reduce(self, action: ShifterAction) -> Self {
        debug!(?action, "shifter action");
        match action {
            ShifterAction::SetInput(input) => Self {
                input,
                current: None,
                ..self
            },
            ShifterAction::SetAmount(amount) => Self { amount, ..self },
            ShifterAction::SetDirection(direction) => Self { direction, ..self },
            ShifterAction::Reset => Self::new(self.width),
            ShifterAction::Calculate => match parse_prefixed_hex(&self.input, self.width) {
                Ok(input) => self.shift(input),
                Err(e) => Self {
                    error: Some(e.to_string()),
                    ..self
                },
            },
        }
    }

    fn shift(mut self, input: FixedWidthInteger) -> Self {
        let base = self.current.take().unwrap_or(input);
        let shifted = match self.direction {
            Direction::Left => shift_left(&base, self.amount),
            Direction::Right => shift_right(&base, self.amount),
        };
        self.history.push(format!(
            "Shift {} bits to the {}, resulting in {}",
            self.amount,
            self.direction,
            format_hex(&shifted, true)
        ));
        self.current = Some(shifted);
        self.error = None;
        self
    }

    /// Padded hex of the input, if it is well formed.
    pub fn original_padded(&self) -> Option<String> {
        parse_prefixed_hex(&self.input, self.width)
            .ok()
            .map(|value| format_hex(&value, true))
    }

    pub fn current_padded(&self) -> Option<String> {
        self.current.as_ref().map(|value| format_hex(value, true))
    }
}

/// Accepts exactly `0x` followed by one or more hex digits.
fn parse_prefixed_hex(text: &str, width: u32) -> Result<FixedWidthInteger, WidgetError> {
    let digits = text.strip_prefix("0x").ok_or(WidgetError::InvalidHex)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WidgetError::InvalidHex);
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or(WidgetError::InvalidHex)?;
    Ok(FixedWidthInteger::from_magnitude(width, magnitude))
}

/// Splits a hex word into its head and its trailing 20 bytes, leaving any
/// `0x` prefix on the head.
pub fn split_address_tail(hex: &str) -> (&str, &str) {
    let at = hex.len().saturating_sub(ADDRESS_HEX_DIGITS);
    hex.split_at(at)
}
