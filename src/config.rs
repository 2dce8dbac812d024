use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Serial line settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    /// How long one read waits for a byte before reporting "no data".
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 10,
        }
    }
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Columns for headless rendering. Terminal width when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    pub frame_interval_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: None,
            frame_interval_ms: 50,
        }
    }
}

impl DisplayConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub display: DisplayConfig,
}

/// Narrowest display the standings box fits in.
pub const MIN_DISPLAY_WIDTH: u16 = 10;

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("Config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::Validation(
                "serial.port must not be empty".into(),
            ));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::Validation(
                "serial.baud_rate must be > 0".into(),
            ));
        }
        if self.serial.read_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "serial.read_timeout_ms must be > 0".into(),
            ));
        }
        if self.display.frame_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "display.frame_interval_ms must be > 0".into(),
            ));
        }
        if let Some(width) = self.display.width {
            if width < MIN_DISPLAY_WIDTH {
                return Err(ConfigError::Validation(format!(
                    "display.width must be >= {MIN_DISPLAY_WIDTH}"
                )));
            }
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
