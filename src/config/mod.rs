pub mod hardware;
pub mod output;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub use hardware::HardwareConfig;
pub use output::{OutputConfig, OutputFormat};

/// Main configuration, read from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hardware: HardwareConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn to_dict(&self) -> anyhow::Result<HashMap<String, serde_json::Value>> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    pub fn from_dict(data: HashMap<String, serde_json::Value>) -> anyhow::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"output": {"annotate": true}}"#).unwrap();
        assert!(config.output.annotate);
        assert_eq!(config.output.format, OutputFormat::AlterSystem);
        assert_eq!(config.hardware, HardwareConfig::default());
    }

    #[test]
    fn test_format_names() {
        let config: Config = serde_json::from_str(r#"{"output": {"format": "conf"}}"#).unwrap();
        assert_eq!(config.output.format, OutputFormat::Conf);
    }

    #[test]
    fn test_dict_round_trip() {
        let mut config = Config::default();
        config.hardware.cores = Some(12);
        let dict = config.to_dict().unwrap();
        assert!(dict.contains_key("hardware"));
        assert!(dict.contains_key("output"));
        assert_eq!(Config::from_dict(dict).unwrap(), config);
    }
}
