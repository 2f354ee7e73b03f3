use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub link: LinkConfig,
    pub chain: ChainConfig,
    pub font: FontConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")?;
        Ok(PathBuf::from(home).join(".config/lcd-chain/config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Serial device the chain is attached to
    pub port: Option<String>,
    /// Baud rate of the link
    pub baud: u32,
    /// Milliseconds to wait after opening the port; the controller resets
    /// when the line comes up and drops anything sent before it settles
    pub settle_ms: u64,
    /// Per-read timeout on the port in milliseconds
    pub read_timeout_ms: u64,
    /// Milliseconds a blit waits for the echoed frame before giving up
    pub drain_timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: 115_200,
            settle_ms: 2000,
            read_timeout_ms: 50,
            drain_timeout_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Number of daisy-chained panels on the link
    pub panels: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { panels: 1 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Firmware dump to pull the glyph table from
    pub firmware: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = Config::default();
        config.link.port = Some("/dev/ttyUSB0".to_string());
        config.chain.panels = 3;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.link.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(parsed.link.baud, 115_200);
        assert_eq!(parsed.chain.panels, 3);
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let parsed: Config = toml::from_str("[chain]\npanels = 2\n").unwrap();
        assert_eq!(parsed.chain.panels, 2);
        assert_eq!(parsed.link.settle_ms, 2000);
        assert!(parsed.font.firmware.is_none());
    }
}
