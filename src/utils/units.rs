//! Byte and duration formatting

pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * KB;
pub const GB: u64 = 1024 * MB;
pub const TB: u64 = 1024 * GB;

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Render a byte count the way postgresql.conf expects it.
///
/// Uses the largest unit that divides the value exactly. PostgreSQL has no
/// plain-byte suffix for memory settings, so anything below 1kB (or not a
/// multiple of it) is rounded down to whole kilobytes.
pub fn format_pg_memory(bytes: u64) -> String {
    const UNITS: &[(u64, &str)] = &[(TB, "TB"), (GB, "GB"), (MB, "MB"), (KB, "kB")];

    for &(size, suffix) in UNITS {
        if bytes >= size && bytes % size == 0 {
            return format!("{}{}", bytes / size, suffix);
        }
    }

    format!("{}kB", bytes / KB)
}

/// Render milliseconds with the largest exact PostgreSQL time unit.
pub fn format_pg_duration_ms(ms: u64) -> String {
    const MINUTE: u64 = 60_000;
    const SECOND: u64 = 1_000;

    if ms == 0 {
        "0".to_string()
    } else if ms % MINUTE == 0 {
        format!("{}min", ms / MINUTE)
    } else if ms % SECOND == 0 {
        format!("{}s", ms / SECOND)
    } else {
        format!("{}ms", ms)
    }
}

/// Round down to a whole number of megabytes.
pub fn floor_to_mb(bytes: u64) -> u64 {
    bytes - bytes % MB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
    }

    #[test]
    fn test_format_pg_memory_picks_largest_exact_unit() {
        assert_eq!(format_pg_memory(128 * MB), "128MB");
        assert_eq!(format_pg_memory(64 * GB), "64GB");
        assert_eq!(format_pg_memory(1536 * MB), "1536MB");
        assert_eq!(format_pg_memory(2 * TB), "2TB");
        assert_eq!(format_pg_memory(8 * KB), "8kB");
    }

    #[test]
    fn test_format_pg_memory_rounds_partial_kilobytes_down() {
        assert_eq!(format_pg_memory(1500), "1kB");
        assert_eq!(format_pg_memory(100), "0kB");
    }

    #[test]
    fn test_format_pg_duration() {
        assert_eq!(format_pg_duration_ms(0), "0");
        assert_eq!(format_pg_duration_ms(60_000), "1min");
        assert_eq!(format_pg_duration_ms(5_000), "5s");
        assert_eq!(format_pg_duration_ms(250), "250ms");
    }

    #[test]
    fn test_floor_to_mb() {
        assert_eq!(floor_to_mb(3 * MB + 17), 3 * MB);
        assert_eq!(floor_to_mb(MB - 1), 0);
    }
}
