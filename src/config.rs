//! Configuration file for the `hori` CLI
//!
//! Optional TOML file, by default `~/.config/hori/config.toml`. Every key
//! may be omitted; command-line flags override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hori_transport::protocol::timing;
use hori_transport::Timing;
use serde::{Deserialize, Serialize};

/// Persistent CLI defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoriConfig {
    /// Device index used when `-d` is not given
    pub device: usize,
    /// Deadline for a matching reply (ms)
    pub reply_timeout_ms: u64,
    /// Timeout of each USB read while waiting (ms)
    pub read_timeout_ms: u64,
}

impl Default for HoriConfig {
    fn default() -> Self {
        Self {
            device: 0,
            reply_timeout_ms: timing::REPLY_DEADLINE_MS,
            read_timeout_ms: timing::READ_TIMEOUT_MS,
        }
    }
}

impl HoriConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hori")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: HoriConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Reply wait timing for the session
    pub fn timing(&self) -> Timing {
        Timing {
            reply_deadline: Duration::from_millis(self.reply_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_protocol_timing() {
        let config = HoriConfig::default();
        assert_eq!(config.device, 0);
        assert_eq!(config.timing(), Timing::default());
    }

    #[test]
    fn test_partial_file() {
        let config: HoriConfig = toml::from_str("device = 2\n").unwrap();
        assert_eq!(config.device, 2);
        assert_eq!(config.reply_timeout_ms, 100);
        assert_eq!(config.read_timeout_ms, 100);
    }

    #[test]
    fn test_roundtrip() {
        let config = HoriConfig {
            device: 1,
            reply_timeout_ms: 250,
            read_timeout_ms: 50,
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("reply_timeout_ms = 250"));
        let parsed: HoriConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.timing().read_timeout, Duration::from_millis(50));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("hori-config-test-does-not-exist.toml");
        assert_eq!(HoriConfig::load(&path).unwrap(), HoriConfig::default());
    }

    #[test]
    fn test_unknown_type_is_error() {
        assert!(toml::from_str::<HoriConfig>("device = \"first\"\n").is_err());
    }
}
