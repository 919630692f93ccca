//! Errors raised by the tuning core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error(
        "hardware profile must have positive memory and core count, got {total_memory_bytes} bytes and {core_count} cores"
    )]
    InvalidHardware {
        total_memory_bytes: u64,
        core_count: u64,
    },
}
