mod commands;
mod core;
mod ui;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{BaseArg, ShiftStep, ValueTypeArg};
use crate::core::{Config, Core};
use std::path::PathBuf;
use tracing::{debug, info};
use utils::{generate_dummy_config, setup_panic_hook, setup_tracing};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, value_name = "FILE", default_value_os_t = PathBuf::from("bitbench.toml"))]
    config: PathBuf,

    #[arg(short, long, value_name = "BITS")]
    width: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a value as uint, int, hex and binary
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long, value_enum, default_value_t = BaseArg::Hex)]
        from: BaseArg,
    },
    /// Apply a sequence of shifts to a 0x-prefixed word
    Shift {
        value: String,
        #[arg(short, long = "step", value_name = "DIR:BITS", required = true)]
        steps: Vec<ShiftStep>,
    },
    /// Show a word's bit grid, optionally toggling bits and selecting a range
    Bits {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long)]
        hex: bool,
        #[arg(long)]
        start: Option<u32>,
        #[arg(long)]
        end: Option<u32>,
        #[arg(short, long)]
        toggle: Vec<u32>,
    },
    /// Dump hex as rows of 32 bytes
    Bytes { hex: String },
    /// Spell an expression's value as powers of two
    Describe {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Build a storage slot key and decode a raw storage word
    Slot {
        #[arg(short, long)]
        key: String,
        #[arg(long)]
        bytes32: bool,
        #[arg(short, long, value_name = "CONTRACT")]
        address: Option<String>,
        #[arg(long, value_name = "RAW")]
        value: Option<String>,
        #[arg(long = "as", value_enum, default_value_t = ValueTypeArg::Uint256)]
        as_type: ValueTypeArg,
    },
    /// Serialize Anchor instruction data from a Rust function signature
    Anchor {
        #[arg(short, long)]
        signature: String,
        #[arg(short, long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },
    /// Encode PDA seeds given as KIND:VALUE
    Seed {
        #[arg(required = true)]
        seeds: Vec<String>,
    },
    /// Interactive converter and shifter
    Tui,
    /// Write an example config file
    GenerateConfig {
        #[arg(short, long, value_name = "FILE", default_value_os_t = PathBuf::from("bitbench.toml"))]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(Commands::GenerateConfig { output }) = &cli.command {
        return generate_dummy_config(output);
    }

    let loaded = Config::load(&cli.config)?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_else(Config::example);
    let _guard = setup_tracing(&config.log)?;
    setup_panic_hook();
    info!("Starting bitbench");
    if found {
        info!("Loaded config from: {:?}", cli.config);
    } else {
        info!("No config at {:?}, using example values", cli.config);
    }
    if let Some(width) = cli.width {
        info!("Overriding codec width with: {}", width);
        config.codec.width = width;
    }
    let core = Core::new(config)?;
    debug!("Codec config: {:?}", core.codec.config());

    match cli.command {
        Some(Commands::Convert { value, from }) => commands::convert(&core, &value, from),
        Some(Commands::Shift { value, steps }) => commands::shift(&core, &value, &steps),
        Some(Commands::Bits {
            value,
            hex,
            start,
            end,
            toggle,
        }) => commands::bits(&core, value, hex, start, end, &toggle),
        Some(Commands::Bytes { hex }) => commands::bytes(&hex),
        Some(Commands::Describe { value }) => commands::describe(&core, &value),
        Some(Commands::Slot {
            key,
            bytes32,
            address,
            value,
            as_type,
        }) => commands::slot(&key, bytes32, address.as_deref(), value.as_deref(), as_type),
        Some(Commands::Anchor { signature, args }) => commands::anchor(&signature, &args),
        Some(Commands::Seed { seeds }) => commands::seed(&seeds),
        Some(Commands::Tui) | None => ui::run_ui(core),
        Some(Commands::GenerateConfig { .. }) => Ok(()),
    }?;
    info!("Application Shutdown!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["bitbench"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command.unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_takes_negative_values() {
        match parse(&["convert", "-1", "--from", "int"]) {
            Commands::Convert { value, from } => {
                assert_eq!(value, "-1");
                assert!(matches!(from, BaseArg::Int));
            }
            _ => panic!("expected convert"),
        }
        match parse(&["convert", "0xff"]) {
            Commands::Convert { value, from } => {
                assert_eq!(value, "0xff");
                assert!(matches!(from, BaseArg::Hex));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn bits_takes_negative_hex() {
        match parse(&["bits", "-0x2", "--hex", "--toggle", "255"]) {
            Commands::Bits { value, hex, toggle, .. } => {
                assert_eq!(value, "-0x2");
                assert!(hex);
                assert_eq!(toggle, vec![255]);
            }
            _ => panic!("expected bits"),
        }
    }

    #[test]
    fn describe_takes_negative_expression() {
        match parse(&["describe", "-2^8"]) {
            Commands::Describe { value } => assert_eq!(value, "-2^8"),
            _ => panic!("expected describe"),
        }
    }

    #[test]
    fn shift_collects_steps() {
        match parse(&["shift", "0x1", "--step", "left:8", "--step", ">>:4"]) {
            Commands::Shift { value, steps } => {
                assert_eq!(value, "0x1");
                assert_eq!(steps.len(), 2);
                assert_eq!(steps[1].bits, 4);
            }
            _ => panic!("expected shift"),
        }
        let missing = Cli::try_parse_from(["bitbench", "shift", "0x1"]);
        assert!(missing.is_err());
    }

    #[test]
    fn slot_anchor_and_seed_values() {
        match parse(&["slot", "--key", "5", "--as", "bool"]) {
            Commands::Slot { key, as_type, .. } => {
                assert_eq!(key, "5");
                assert!(matches!(as_type, ValueTypeArg::Bool));
            }
            _ => panic!("expected slot"),
        }
        match parse(&["anchor", "-s", "fn go(a: u8)", "--arg", "a=1"]) {
            Commands::Anchor { signature, args } => {
                assert_eq!(signature, "fn go(a: u8)");
                assert_eq!(args, vec!["a=1"]);
            }
            _ => panic!("expected anchor"),
        }
        match parse(&["seed", "string:offer", "u64:1"]) {
            Commands::Seed { seeds } => assert_eq!(seeds, vec!["string:offer", "u64:1"]),
            _ => panic!("expected seed"),
        }
        match parse(&["bytes", "0x00ff"]) {
            Commands::Bytes { hex } => assert_eq!(hex, "0x00ff"),
            _ => panic!("expected bytes"),
        }
    }

    #[test]
    fn no_subcommand_starts_the_ui() {
        let cli = Cli::try_parse_from(["bitbench", "--width", "64"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.width, Some(64));
    }
}
