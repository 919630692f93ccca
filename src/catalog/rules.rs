//! Recommendation formulas
//!
//! Ratios follow the tuning guide. Every rule reads only the hardware
//! profile; when one rule needs a quantity another rule also produces (e.g.
//! `work_mem` divides by the connection count) it recomputes it here.

use crate::catalog::parameters::ParameterValue;
use crate::hardware::HardwareProfile;
use crate::utils::units::{floor_to_mb, GB, MB};

/// Connections allowed per core, times the headroom factor for poolers
const CONNECTIONS_PER_CORE: u64 = 3;
const CONNECTION_HEADROOM: u64 = 2;

const SUPERUSER_RESERVED: u64 = 3;
const IDLE_IN_TRANSACTION_TIMEOUT_MS: u64 = 60_000;

// JIT pays off only for long analytical queries; raise the thresholds fivefold
const JIT_ABOVE_COST: u64 = 500_000;
const JIT_INLINE_ABOVE_COST: u64 = 2_500_000;
const JIT_OPTIMIZE_ABOVE_COST: u64 = 2_500_000;

/// `num/den` of total memory, rounded down to a whole MB, never below 1MB
fn memory_fraction(hw: &HardwareProfile, num: u64, den: u64) -> u64 {
    let share = (hw.total_memory_bytes as u128 * num as u128 / den as u128) as u64;
    floor_to_mb(share).max(MB)
}

pub fn connection_limit(hw: &HardwareProfile) -> u64 {
    hw.core_count
        .saturating_mul(CONNECTIONS_PER_CORE)
        .saturating_mul(CONNECTION_HEADROOM)
}

pub fn parallel_worker_limit(hw: &HardwareProfile) -> u64 {
    // round(0.75 * cores), half rounding up
    (hw.core_count.saturating_mul(3).saturating_add(2) / 4).max(1)
}

pub fn shared_buffers(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Bytes(memory_fraction(hw, 25, 100))
}

pub fn effective_cache_size(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Bytes(memory_fraction(hw, 75, 100))
}

pub fn work_mem(hw: &HardwareProfile) -> ParameterValue {
    // A quarter of RAM shared across every allowed connection
    let pool = hw.total_memory_bytes / 4;
    let per_session = pool / connection_limit(hw).max(1);
    ParameterValue::Bytes(floor_to_mb(per_session).max(4 * MB))
}

pub fn maintenance_work_mem(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Bytes(memory_fraction(hw, 5, 100).clamp(64 * MB, 2 * GB))
}

pub fn max_worker_processes(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(hw.core_count.max(8))
}

pub fn max_parallel_workers(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(parallel_worker_limit(hw))
}

pub fn max_parallel_workers_per_gather(hw: &HardwareProfile) -> ParameterValue {
    let per_gather = (hw.core_count / 4).clamp(1, 8);
    ParameterValue::Count(per_gather.min(parallel_worker_limit(hw)))
}

pub fn max_parallel_maintenance_workers(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count((hw.core_count / 4).clamp(1, 4))
}

pub fn jit_above_cost(_hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(JIT_ABOVE_COST)
}

pub fn jit_inline_above_cost(_hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(JIT_INLINE_ABOVE_COST)
}

pub fn jit_optimize_above_cost(_hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(JIT_OPTIMIZE_ABOVE_COST)
}

pub fn max_connections(hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(connection_limit(hw))
}

pub fn superuser_reserved_connections(_hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Count(SUPERUSER_RESERVED)
}

pub fn idle_in_transaction_session_timeout(_hw: &HardwareProfile) -> ParameterValue {
    ParameterValue::Milliseconds(IDLE_IN_TRANSACTION_TIMEOUT_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide_host() -> HardwareProfile {
        HardwareProfile::from_gb(256, 48)
    }

    #[test]
    fn test_guide_host_values() {
        let hw = guide_host();
        assert_eq!(max_connections(&hw), ParameterValue::Count(288));
        assert_eq!(max_parallel_workers(&hw), ParameterValue::Count(36));
        assert_eq!(shared_buffers(&hw), ParameterValue::Bytes(64 * GB));
        assert_eq!(effective_cache_size(&hw), ParameterValue::Bytes(192 * GB));
        assert_eq!(work_mem(&hw), ParameterValue::Bytes(227 * MB));
        assert_eq!(maintenance_work_mem(&hw), ParameterValue::Bytes(2 * GB));
        assert_eq!(max_worker_processes(&hw), ParameterValue::Count(48));
        assert_eq!(max_parallel_workers_per_gather(&hw), ParameterValue::Count(8));
        assert_eq!(max_parallel_maintenance_workers(&hw), ParameterValue::Count(4));
    }

    #[test]
    fn test_parallel_worker_rounding() {
        assert_eq!(parallel_worker_limit(&HardwareProfile::from_gb(8, 1)), 1);
        assert_eq!(parallel_worker_limit(&HardwareProfile::from_gb(8, 2)), 2);
        assert_eq!(parallel_worker_limit(&HardwareProfile::from_gb(8, 3)), 2);
        assert_eq!(parallel_worker_limit(&HardwareProfile::from_gb(8, 6)), 5);
    }

    #[test]
    fn test_small_host_floors() {
        let hw = HardwareProfile::from_gb(1, 1);
        assert_eq!(work_mem(&hw), ParameterValue::Bytes(42 * MB));
        assert_eq!(maintenance_work_mem(&hw), ParameterValue::Bytes(64 * MB));
        assert_eq!(max_worker_processes(&hw), ParameterValue::Count(8));
        assert_eq!(max_parallel_workers_per_gather(&hw), ParameterValue::Count(1));
    }

    #[test]
    fn test_tiny_memory_never_zero() {
        let hw = HardwareProfile::new(1024, 1);
        assert_eq!(shared_buffers(&hw), ParameterValue::Bytes(MB));
        assert_eq!(work_mem(&hw), ParameterValue::Bytes(4 * MB));
    }
}
