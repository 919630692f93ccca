//! Hardware profiles and reference machines

use crate::error::TuningError;
use crate::utils::units::GB;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Memory and core-count facts that drive every recommendation rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub total_memory_bytes: u64,
    pub core_count: u64,
}

impl HardwareProfile {
    pub fn new(total_memory_bytes: u64, core_count: u64) -> Self {
        Self {
            total_memory_bytes,
            core_count,
        }
    }

    pub fn from_gb(memory_gb: u64, core_count: u64) -> Self {
        Self::new(memory_gb.saturating_mul(GB), core_count)
    }

    /// Both facts must be positive before any rule is evaluated
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.total_memory_bytes == 0 || self.core_count == 0 {
            return Err(TuningError::InvalidHardware {
                total_memory_bytes: self.total_memory_bytes,
                core_count: self.core_count,
            });
        }
        Ok(())
    }

    pub fn memory_gb(&self) -> f64 {
        self.total_memory_bytes as f64 / GB as f64
    }
}

/// Reference machines, indexed by preset name
pub static HARDWARE_PRESETS: Lazy<BTreeMap<&'static str, HardwareProfile>> = Lazy::new(|| {
    let mut presets = BTreeMap::new();

    // The dedicated database host the tuning guide is written against
    presets.insert("guide-256gb", HardwareProfile::from_gb(256, 48));

    presets.insert("large-128gb", HardwareProfile::from_gb(128, 32));
    presets.insert("medium-64gb", HardwareProfile::from_gb(64, 16));
    presets.insert("small-16gb", HardwareProfile::from_gb(16, 4));
    presets.insert("dev-4gb", HardwareProfile::from_gb(4, 2));

    presets
});

pub fn get_preset(name: &str) -> anyhow::Result<HardwareProfile> {
    HARDWARE_PRESETS.get(name).copied().ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown hardware preset: {}. Available: {:?}",
            name,
            HARDWARE_PRESETS.keys().collect::<Vec<_>>()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_cores() {
        let hw = HardwareProfile::from_gb(16, 0);
        assert!(matches!(
            hw.validate(),
            Err(TuningError::InvalidHardware { core_count: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_memory() {
        let hw = HardwareProfile::new(0, 8);
        assert!(hw.validate().is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        for (name, hw) in HARDWARE_PRESETS.iter() {
            assert!(hw.validate().is_ok(), "preset {} is invalid", name);
        }
    }

    #[test]
    fn test_get_preset() {
        let hw = get_preset("guide-256gb").unwrap();
        assert_eq!(hw.core_count, 48);
        assert_eq!(hw.memory_gb(), 256.0);

        let err = get_preset("mainframe").unwrap_err();
        assert!(err.to_string().contains("Unknown hardware preset"));
    }
}
