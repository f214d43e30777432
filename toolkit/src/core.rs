use anyhow::{Context, Result};
use bitlib::{Codec, CodecConfig, Sanitize, SignWidth, WORD_BITS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    pub codec: CodecConfig,
    pub log: LogConfig,
}

impl Config {
    /// The values `generate-config` writes and the fallback when no file exists.
    pub fn example() -> Self {
        Config {
            codec: CodecConfig {
                width: WORD_BITS,
                sign_width: SignWidth::Minimal,
                sanitize: Sanitize::Lenient,
            },
            log: LogConfig {
                directory: PathBuf::from("logs"),
                file_prefix: "bitbench.log".to_string(),
            },
        }
    }

    /// Reads `path`, returning `None` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(Some(config))
    }
}

#[derive(Clone, Debug)]
pub struct Core {
    pub codec: Codec,
}

impl Core {
    pub fn new(config: Config) -> Result<Self> {
        let codec = Codec::new(config.codec).context("Invalid codec configuration")?;
        Ok(Core { codec })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::example()).unwrap();
        assert!(text.contains("sign_width = \"minimal\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.codec, Config::example().codec);
    }

    #[test]
    fn zero_width_is_a_config_error() {
        let mut config = Config::example();
        config.codec.width = 0;
        assert!(Core::new(config).is_err());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(Config::load(Path::new("does/not/exist.toml")).unwrap().is_none());
    }
}
