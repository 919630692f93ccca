pub mod units;

pub use units::{format_bytes, format_pg_duration_ms, format_pg_memory};
