//! Hardware detection for the machine the tool runs on

use crate::hardware::profiles::HardwareProfile;
use crate::utils::units::{format_bytes, KB};
use std::io;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("failed to read system memory: {0}")]
    Memory(#[from] io::Error),

    #[error("could not parse system memory from {source_name}: {raw:?}")]
    Parse { source_name: &'static str, raw: String },

    #[error("memory detection not supported on this platform")]
    UnsupportedPlatform,

    #[error("detected a non-positive value ({total_memory_bytes} bytes, {core_count} cores)")]
    NonPositive {
        total_memory_bytes: u64,
        core_count: u64,
    },
}

/// Detect total memory and physical core count.
///
/// Returns an error rather than a zero-valued profile when either fact is
/// unavailable.
pub fn detect_hardware() -> Result<HardwareProfile, DetectionError> {
    let total_memory_bytes = get_total_memory_bytes()?;
    let core_count = get_core_count();

    if total_memory_bytes == 0 || core_count == 0 {
        return Err(DetectionError::NonPositive {
            total_memory_bytes,
            core_count,
        });
    }

    info!(
        memory = %format_bytes(total_memory_bytes),
        cores = core_count,
        "detected hardware"
    );

    Ok(HardwareProfile::new(total_memory_bytes, core_count))
}

/// Physical cores, falling back to logical cores when the topology is unknown
pub fn get_core_count() -> u64 {
    let physical = num_cpus::get_physical();
    if physical > 0 {
        return physical as u64;
    }
    warn!("physical core count unavailable, using logical cores");
    num_cpus::get() as u64
}

pub fn get_total_memory_bytes() -> Result<u64, DetectionError> {
    #[cfg(target_os = "linux")]
    {
        let meminfo = std::fs::read_to_string("/proc/meminfo")?;
        parse_meminfo_total(&meminfo)
    }

    #[cfg(target_os = "macos")]
    {
        let output = std::process::Command::new("sysctl")
            .arg("-n")
            .arg("hw.memsize")
            .output()?;
        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        raw.parse().map_err(|_| DetectionError::Parse {
            source_name: "sysctl hw.memsize",
            raw,
        })
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        Err(DetectionError::UnsupportedPlatform)
    }
}

/// Extract `MemTotal` (reported in kB) from /proc/meminfo contents
pub fn parse_meminfo_total(meminfo: &str) -> Result<u64, DetectionError> {
    let line = meminfo
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .ok_or_else(|| DetectionError::Parse {
            source_name: "/proc/meminfo",
            raw: "missing MemTotal".to_string(),
        })?;

    let total_kb: u64 = line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DetectionError::Parse {
            source_name: "/proc/meminfo",
            raw: line.to_string(),
        })?;

    Ok(total_kb * KB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meminfo_total() {
        let meminfo = "MemTotal:       16318480 kB\nMemFree:         1165620 kB\n";
        assert_eq!(parse_meminfo_total(meminfo).unwrap(), 16318480 * 1024);
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        let err = parse_meminfo_total("MemFree: 12 kB\n").unwrap_err();
        assert!(err.to_string().contains("missing MemTotal"));
    }

    #[test]
    fn test_parse_meminfo_garbage_value() {
        assert!(parse_meminfo_total("MemTotal: lots kB\n").is_err());
    }

    #[test]
    fn test_core_count_positive() {
        assert!(get_core_count() > 0);
    }
}
