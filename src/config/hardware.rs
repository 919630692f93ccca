use crate::hardware::{detect_hardware, get_preset, HardwareProfile};
use crate::utils::units::GB;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Where hardware facts come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Named reference machine, see `HARDWARE_PRESETS`
    pub preset: Option<String>,
    pub memory_gb: Option<u64>,
    pub cores: Option<u64>,
}

impl HardwareConfig {
    /// Fields set in `overrides` win over fields set here
    pub fn merged_with(&self, overrides: &HardwareConfig) -> HardwareConfig {
        HardwareConfig {
            preset: overrides.preset.clone().or_else(|| self.preset.clone()),
            memory_gb: overrides.memory_gb.or(self.memory_gb),
            cores: overrides.cores.or(self.cores),
        }
    }

    /// Build a profile: explicit memory/cores override the preset, and the
    /// running machine is probed only for facts still missing.
    pub fn resolve(&self) -> anyhow::Result<HardwareProfile> {
        let mut profile = match (&self.preset, self.memory_gb, self.cores) {
            (Some(name), _, _) => get_preset(name)?,
            (None, Some(_), Some(_)) => HardwareProfile::default(),
            (None, _, _) => detect_hardware()
                .context("Could not detect hardware. Use --memory-gb and --cores")?,
        };

        if let Some(gb) = self.memory_gb {
            profile.total_memory_bytes = gb.saturating_mul(GB);
        }
        if let Some(cores) = self.cores {
            profile.core_count = cores;
        }

        info!(
            memory_gb = profile.memory_gb(),
            cores = profile.core_count,
            "using hardware profile"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_skip_detection() {
        let config = HardwareConfig {
            preset: None,
            memory_gb: Some(64),
            cores: Some(16),
        };
        assert_eq!(config.resolve().unwrap(), HardwareProfile::from_gb(64, 16));
    }

    #[test]
    fn test_flags_override_preset() {
        let config = HardwareConfig {
            preset: Some("guide-256gb".to_string()),
            memory_gb: None,
            cores: Some(24),
        };
        let hw = config.resolve().unwrap();
        assert_eq!(hw.total_memory_bytes, 256 * GB);
        assert_eq!(hw.core_count, 24);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = HardwareConfig {
            preset: Some("small-16gb".to_string()),
            memory_gb: Some(16),
            cores: Some(4),
        };
        let flags = HardwareConfig {
            preset: None,
            memory_gb: None,
            cores: Some(8),
        };
        let merged = file.merged_with(&flags);
        assert_eq!(merged.preset.as_deref(), Some("small-16gb"));
        assert_eq!(merged.memory_gb, Some(16));
        assert_eq!(merged.cores, Some(8));
    }

    #[test]
    fn test_unknown_preset() {
        let config = HardwareConfig {
            preset: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(config.resolve().is_err());
    }
}
