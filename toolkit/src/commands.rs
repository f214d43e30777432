use crate::core::Core;
use anyhow::{anyhow, Context, Result};
use bitlib::codec::{format_binary, format_hex, format_signed, format_unsigned};
use bitlib::expr::evaluate;
use bitlib::int::FixedWidthInteger;
use bitlib::pattern::describe_as_power_expression;
use bitlib::widgets::anchor::{encode_base58, parse_signature, serialize, Seed};
use bitlib::widgets::bitgrid::{BitGridAction, BitGridState, InputFormat};
use bitlib::widgets::bytes::ByteView;
use bitlib::widgets::converter::{ConverterFields, Field};
use bitlib::widgets::shifter::{split_address_tail, Direction, ShifterAction, ShifterState};
use bitlib::widgets::slot::{render_value, SlotKind, StorageQuery, StorageSlot, StorageValue, ValueType};
use clap::ValueEnum;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BaseArg {
    Hex,
    Binary,
    Uint,
    Int,
}

impl From<BaseArg> for Field {
    fn from(base: BaseArg) -> Self {
        match base {
            BaseArg::Hex => Field::Hex,
            BaseArg::Binary => Field::Binary,
            BaseArg::Uint => Field::Uint,
            BaseArg::Int => Field::Int,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ValueTypeArg {
    Uint256,
    Int256,
    Address,
    Bool,
    Raw,
}

impl From<ValueTypeArg> for ValueType {
    fn from(ty: ValueTypeArg) -> Self {
        match ty {
            ValueTypeArg::Uint256 => ValueType::Uint256,
            ValueTypeArg::Int256 => ValueType::Int256,
            ValueTypeArg::Address => ValueType::Address,
            ValueTypeArg::Bool => ValueType::Bool,
            ValueTypeArg::Raw => ValueType::Raw,
        }
    }
}

/// `left:8` or `right:4`.
#[derive(Clone, Copy, Debug)]
pub struct ShiftStep {
    pub direction: Direction,
    pub bits: u32,
}

impl FromStr for ShiftStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, bits) = s
            .split_once(':')
            .ok_or_else(|| format!("expected DIR:BITS, got {s:?}"))?;
        Ok(ShiftStep {
            direction: direction.parse()?,
            bits: bits
                .trim()
                .parse()
                .map_err(|_| format!("invalid shift amount {bits:?}"))?,
        })
    }
}

pub fn convert(core: &Core, value: &str, from: BaseArg) -> Result<()> {
    let field = Field::from(from);
    let codec = &core.codec;
    match field {
        Field::Hex => codec.parse_hex(value).map(drop),
        Field::Binary => codec.parse_binary(value).map(drop),
        Field::Uint => codec.parse_unsigned(value).map(drop),
        Field::Int => codec.parse_signed(value).map(drop),
    }
    .with_context(|| format!("Could not read {value:?} as {from:?}"))?;
    let fields = ConverterFields::default().reduce(codec, field, value);
    println!("uint   {}", fields.uint);
    println!("int    {}", fields.int);
    println!("hex    {}", fields.hex);
    if let Some(padded) = fields.padded_hex(&core.codec) {
        println!("       {}", padded);
    }
    println!("binary {}", fields.binary);
    Ok(())
}

pub fn shift(core: &Core, value: &str, steps: &[ShiftStep]) -> Result<()> {
    let mut state = ShifterState::new(core.codec.width()).reduce(ShifterAction::SetInput(value.to_string()));
    for step in steps {
        debug!("Applying shift step {:?}", step);
        state = state
            .reduce(ShifterAction::SetDirection(step.direction))
            .reduce(ShifterAction::SetAmount(step.bits))
            .reduce(ShifterAction::Calculate);
        if let Some(error) = &state.error {
            return Err(anyhow!("{error}"));
        }
    }
    if let Some(original) = state.original_padded() {
        let (head, tail) = split_address_tail(&original);
        println!("original {head} {tail}");
    }
    for line in &state.history {
        println!("  {line}");
    }
    if let Some(current) = state.current_padded() {
        let (head, tail) = split_address_tail(&current);
        println!("result   {head} {tail}");
    }
    Ok(())
}

pub fn bits(
    core: &Core,
    value: String,
    hex: bool,
    start: Option<u32>,
    end: Option<u32>,
    toggles: &[u32],
) -> Result<()> {
    let format = if hex {
        InputFormat::Hexadecimal
    } else {
        InputFormat::Decimal
    };
    let mut state = BitGridState::new(core.codec.width())
        .reduce(BitGridAction::SetFormat(format))
        .reduce(BitGridAction::SetInput(value));
    state.value().context("Could not evaluate input")?;
    if let Some(end) = end {
        state = state.reduce(BitGridAction::SelectEnd(end));
    }
    if let Some(start) = start {
        state = state.reduce(BitGridAction::SelectStart(start));
    }
    for index in toggles {
        state = state.reduce(BitGridAction::Toggle(*index));
    }

    for (i, row) in state.rows().chunks(8).enumerate() {
        println!("{:>4}  {}", i * 64, row.join(" "));
    }
    println!("input     {}", state.input);
    println!("selection {}..={}", state.start, state.end);
    println!("bits      {}", state.selected_bits());
    println!("value     {}", state.selected_value());
    println!("pattern   {}", state.expression());
    Ok(())
}

pub fn bytes(hex: &str) -> Result<()> {
    let view = ByteView::parse(hex);
    println!("Total Bytes: {}", view.byte_count());
    for line in view.lines() {
        println!("{line}");
    }
    Ok(())
}

pub fn describe(core: &Core, value: &str) -> Result<()> {
    let value = evaluate(value).context("Could not evaluate input")?;
    let word = FixedWidthInteger::from_signed(core.codec.width(), &value);
    println!("{}", describe_as_power_expression(&word.to_unsigned()));
    println!("uint {}", format_unsigned(&word));
    println!("int  {}", format_signed(&word));
    println!("hex  {}", format_hex(&word, true));
    println!("bin  {}", format_binary(&word));
    Ok(())
}

pub fn slot(
    key: &str,
    bytes32: bool,
    address: Option<&str>,
    value: Option<&str>,
    as_type: ValueTypeArg,
) -> Result<()> {
    let kind = if bytes32 {
        SlotKind::Bytes32
    } else {
        SlotKind::Number
    };
    let slot = StorageSlot::parse(kind, key).context("Invalid slot")?;
    println!("slot  {}", slot);
    println!("key   {}", slot.key());
    if let Some(address) = address {
        let query = StorageQuery::new(address, slot)?;
        info!("Prepared eth_getStorageAt for {}", query.address);
        println!(
            "eth_getStorageAt [\"{}\", \"{}\", \"{}\"]",
            query.address, query.slot, query.block
        );
    }
    let value = value.map(StorageValue::from_hex).transpose()?;
    println!("value {}", render_value(value.as_ref(), as_type.into()));
    Ok(())
}

pub fn anchor(signature: &str, args: &[String]) -> Result<()> {
    let instruction = parse_signature(signature)?;
    info!(
        "Parsed instruction {} with {} arguments",
        instruction.name,
        instruction.args.len()
    );
    let values: HashMap<String, String> = args
        .iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.trim().to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("expected NAME=VALUE, got {arg:?}"))
        })
        .collect::<Result<_>>()?;
    for arg in &instruction.args {
        println!("arg {}: {}", arg.name, arg.ty);
    }
    let serialized = serialize(&instruction, &values)?;
    println!("discriminator {:?}", serialized.discriminator);
    println!("args          {:?}", serialized.args);
    println!("data hex      0x{}", hex::encode(serialized.to_bytes()));
    println!("data base58   {}", encode_base58(&serialized.to_bytes()));
    Ok(())
}

pub fn seed(seeds: &[String]) -> Result<()> {
    for spec in seeds {
        let bytes = Seed::parse(spec)?.to_bytes()?;
        println!("{spec} -> {:?}", bytes);
    }
    Ok(())
}
