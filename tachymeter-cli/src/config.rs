//! Configuration loading from tachymeter.toml
//!
//! Configuration is optional. When a `tachymeter.toml` exists in the current
//! directory or one of its ancestors it is loaded; every section and key falls
//! back to its default when omitted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tachymeter_report::OutputFormat;
use thiserror::Error;

/// File name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "tachymeter.toml";

/// Errors loading or interpreting configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file (or current directory) could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A duration string could not be parsed
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),
    /// `output.format` names no known format
    #[error("{0}")]
    UnknownFormat(String),
}

/// Tachymeter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TachymeterConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Budget applied to every job instead of its registered one (e.g. "10ms")
    #[serde(default)]
    pub min_time: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "csv", "json" or "human"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory receiving one report file per job
    #[serde(default)]
    pub directory: Option<String>,
    /// Also write reports to stdout
    #[serde(default = "default_echo")]
    pub echo: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: None,
            echo: default_echo(),
        }
    }
}

fn default_format() -> String {
    "csv".to_string()
}
fn default_echo() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level for tachymeter targets when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl TachymeterConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover configuration by walking up from the current directory
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let dir = std::env::current_dir()?;
        Self::discover_from(&dir)
    }

    /// Discover configuration by walking up from `start`.
    ///
    /// A file that exists but fails to load is an error, not a miss.
    pub fn discover_from(start: &Path) -> Result<Option<Self>, ConfigError> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Tachymeter Configuration

[runner]
# Run every job with this budget instead of its registered one (uncomment to enable)
# min_time = "10ms"

[output]
# Output format: csv, json, human
format = "csv"
# Directory receiving one report file per job (uncomment to enable)
# directory = "target/tachymeter"
# Also write reports to stdout
echo = true

[log]
# Level for tachymeter targets when RUST_LOG is unset
level = "info"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
        let s = s.trim();
        let invalid = || ConfigError::InvalidDuration(s.to_string());
        if s.is_empty() {
            return Err(invalid());
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(invalid()),
        };

        Ok(Duration::from_nanos((value * multiplier as f64) as u64))
    }

    /// The configured budget override, parsed
    pub fn min_time_override(&self) -> Result<Option<Duration>, ConfigError> {
        self.runner
            .min_time
            .as_deref()
            .map(Self::parse_duration)
            .transpose()
    }

    /// The configured output format, parsed
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.output
            .format
            .parse()
            .map_err(ConfigError::UnknownFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TachymeterConfig::default();
        assert!(config.runner.min_time.is_none());
        assert_eq!(config.output.format, "csv");
        assert!(config.output.echo);
        assert!(config.output.directory.is_none());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.min_time_override().unwrap(), None);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_parse_duration() {
        let ms = Duration::from_millis;
        assert_eq!(TachymeterConfig::parse_duration("3s").unwrap(), ms(3_000));
        assert_eq!(TachymeterConfig::parse_duration("500ms").unwrap(), ms(500));
        assert_eq!(TachymeterConfig::parse_duration("100us").unwrap(), Duration::from_micros(100));
        assert_eq!(TachymeterConfig::parse_duration("100µs").unwrap(), Duration::from_micros(100));
        assert_eq!(TachymeterConfig::parse_duration("1000ns").unwrap(), Duration::from_nanos(1000));
        assert_eq!(TachymeterConfig::parse_duration("2m").unwrap(), ms(120_000));
        assert_eq!(TachymeterConfig::parse_duration("1.5s").unwrap(), ms(1_500));
        assert_eq!(TachymeterConfig::parse_duration(" 10 ms ").unwrap(), ms(10));
        assert_eq!(TachymeterConfig::parse_duration("2").unwrap(), ms(2_000));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for bad in ["", "fast", "10 parsecs", "-1s", "ms"] {
            assert!(
                matches!(
                    TachymeterConfig::parse_duration(bad),
                    Err(ConfigError::InvalidDuration(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            min_time = "5ms"

            [output]
            format = "json"
        "#;

        let config: TachymeterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.min_time_override().unwrap(), Some(Duration::from_millis(5)));
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        // Defaults should still apply
        assert!(config.output.echo);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_unknown_format() {
        let mut config = TachymeterConfig::default();
        config.output.format = "html".to_string();
        assert!(matches!(
            config.output_format(),
            Err(ConfigError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_default_toml_round_trips() {
        let config: TachymeterConfig = toml::from_str(&TachymeterConfig::default_toml()).unwrap();
        assert_eq!(config.output.format, "csv");
        assert!(config.runner.min_time.is_none());
    }

    #[test]
    fn test_discover_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[output]\nformat = \"human\"\necho = false\n",
        )
        .unwrap();

        let config = TachymeterConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Human);
        assert!(!config.output.echo);
    }

    #[test]
    fn test_discover_reports_malformed_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "[output\n").unwrap();

        assert!(matches!(
            TachymeterConfig::discover_from(root.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
