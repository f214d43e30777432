use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Bit width must be at least 1")]
    ZeroWidth,

    #[error("Invalid {radix} digit {digit:?}")]
    InvalidDigit { radix: &'static str, digit: char },

    #[error("Missing digits")]
    MissingDigits,

    #[error("Unsigned value cannot be negative")]
    NegativeUnsigned,

    #[error("Bit index {index} out of range for {width}-bit value")]
    BitIndexOutOfRange { index: u32, width: u32 },
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Expression(#[from] crate::expr::ExprError),

    #[error("Invalid hexadecimal number")]
    InvalidHex,

    #[error("Invalid hex bytes: {0}")]
    HexBytes(#[from] hex::FromHexError),

    #[error("Invalid contract address")]
    InvalidAddress,

    #[error("Invalid storage slot")]
    InvalidSlot,

    #[error("Storage value longer than 32 bytes")]
    StorageValueTooLong,

    #[error("Could not find function name")]
    MissingFunctionName,

    #[error("Could not find arguments")]
    MissingArguments,

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Missing value for argument {0}")]
    MissingValue(String),

    #[error("Invalid value for {ty}: {value:?}")]
    InvalidValue { ty: String, value: String },

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Seed longer than {max} bytes")]
    SeedTooLong { max: usize },
}
