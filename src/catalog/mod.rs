//! Parameter catalog
//!
//! The fixed table of tunable PostgreSQL settings, built once on first use.
//! Declaration order here is the order recommendations are computed and
//! emitted in.

pub mod parameters;
pub mod rules;

use crate::error::TuningError;
use crate::utils::units::{GB, MB};
use once_cell::sync::Lazy;

pub use parameters::{Context, Domain, ParameterSpec, ParameterValue, RecommendationRule, Unit};

pub static PARAMETER_CATALOG: Lazy<ParameterCatalog> = Lazy::new(ParameterCatalog::builtin);

/// Immutable list of parameter specs
#[derive(Debug)]
pub struct ParameterCatalog {
    entries: Vec<ParameterSpec>,
}

impl ParameterCatalog {
    /// Shared catalog instance
    pub fn global() -> &'static ParameterCatalog {
        &PARAMETER_CATALOG
    }

    fn builtin() -> Self {
        use parameters::Context::{Reload, Restart};
        use parameters::Domain::{Connections, Jit, Memory, Parallelism};
        use parameters::ParameterValue::{Bytes, Count, Milliseconds};

        let entries = vec![
            // Memory
            ParameterSpec {
                name: "shared_buffers",
                description: "Memory dedicated to the shared page cache",
                domain: Memory,
                unit: Unit::Bytes,
                context: Restart,
                default: Bytes(128 * MB),
                rule: rules::shared_buffers,
            },
            ParameterSpec {
                name: "effective_cache_size",
                description: "Planner estimate of memory available for disk caching",
                domain: Memory,
                unit: Unit::Bytes,
                context: Reload,
                default: Bytes(4 * GB),
                rule: rules::effective_cache_size,
            },
            ParameterSpec {
                name: "work_mem",
                description: "Memory per sort or hash operation before spilling to disk",
                domain: Memory,
                unit: Unit::Bytes,
                context: Reload,
                default: Bytes(4 * MB),
                rule: rules::work_mem,
            },
            ParameterSpec {
                name: "maintenance_work_mem",
                description: "Memory for VACUUM, CREATE INDEX and similar maintenance",
                domain: Memory,
                unit: Unit::Bytes,
                context: Reload,
                default: Bytes(64 * MB),
                rule: rules::maintenance_work_mem,
            },
            // Parallelism
            ParameterSpec {
                name: "max_worker_processes",
                description: "Background worker processes the server can run",
                domain: Parallelism,
                unit: Unit::Count,
                context: Restart,
                default: Count(8),
                rule: rules::max_worker_processes,
            },
            ParameterSpec {
                name: "max_parallel_workers",
                description: "Workers available to parallel operations across the server",
                domain: Parallelism,
                unit: Unit::Count,
                context: Reload,
                default: Count(8),
                rule: rules::max_parallel_workers,
            },
            ParameterSpec {
                name: "max_parallel_workers_per_gather",
                description: "Workers a single Gather node may start",
                domain: Parallelism,
                unit: Unit::Count,
                context: Reload,
                default: Count(2),
                rule: rules::max_parallel_workers_per_gather,
            },
            ParameterSpec {
                name: "max_parallel_maintenance_workers",
                description: "Workers a single utility command may start",
                domain: Parallelism,
                unit: Unit::Count,
                context: Reload,
                default: Count(2),
                rule: rules::max_parallel_maintenance_workers,
            },
            // JIT
            ParameterSpec {
                name: "jit_above_cost",
                description: "Query cost above which JIT compilation is used",
                domain: Jit,
                unit: Unit::Count,
                context: Reload,
                default: Count(100_000),
                rule: rules::jit_above_cost,
            },
            ParameterSpec {
                name: "jit_inline_above_cost",
                description: "Query cost above which JIT inlines functions",
                domain: Jit,
                unit: Unit::Count,
                context: Reload,
                default: Count(500_000),
                rule: rules::jit_inline_above_cost,
            },
            ParameterSpec {
                name: "jit_optimize_above_cost",
                description: "Query cost above which JIT applies expensive optimizations",
                domain: Jit,
                unit: Unit::Count,
                context: Reload,
                default: Count(500_000),
                rule: rules::jit_optimize_above_cost,
            },
            // Connections
            ParameterSpec {
                name: "max_connections",
                description: "Maximum concurrent client connections",
                domain: Connections,
                unit: Unit::Count,
                context: Restart,
                default: Count(100),
                rule: rules::max_connections,
            },
            ParameterSpec {
                name: "superuser_reserved_connections",
                description: "Connection slots kept for superusers",
                domain: Connections,
                unit: Unit::Count,
                context: Restart,
                default: Count(3),
                rule: rules::superuser_reserved_connections,
            },
            ParameterSpec {
                name: "idle_in_transaction_session_timeout",
                description: "Terminate sessions idle inside an open transaction",
                domain: Connections,
                unit: Unit::Milliseconds,
                context: Reload,
                default: Milliseconds(0),
                rule: rules::idle_in_transaction_session_timeout,
            },
        ];

        Self { entries }
    }

    /// Find a spec by name; case-insensitive, surrounding whitespace ignored
    pub fn lookup(&self, name: &str) -> Result<&ParameterSpec, TuningError> {
        let wanted = name.trim();
        self.entries
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TuningError::UnknownParameter(wanted.to_string()))
    }

    /// All specs in declaration order
    pub fn entries(&self) -> &[ParameterSpec] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|spec| spec.name).collect()
    }

    pub fn by_domain(&self, domain: Domain) -> impl Iterator<Item = &ParameterSpec> {
        self.entries.iter().filter(move |spec| spec.domain == domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
