pub mod detection;
pub mod profiles;

pub use detection::{detect_hardware, get_core_count, get_total_memory_bytes, DetectionError};
pub use profiles::{get_preset, HardwareProfile, HARDWARE_PRESETS};
