//! Parameter specifications and typed values

use crate::hardware::HardwareProfile;
use crate::utils::units::{format_pg_duration_ms, format_pg_memory};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Bytes,
    Milliseconds,
    /// Dimensionless integers: connection counts, worker counts, planner costs
    Count,
}

/// Tuning area a parameter belongs to. Rules in different domains never
/// read each other's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Memory,
    Parallelism,
    Jit,
    Connections,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Memory,
        Domain::Parallelism,
        Domain::Jit,
        Domain::Connections,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Memory => "memory",
            Domain::Parallelism => "parallelism",
            Domain::Jit => "jit",
            Domain::Connections => "connections",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the server needs before a new value takes effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    Restart,
    Reload,
}

/// A value tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum ParameterValue {
    Bytes(u64),
    Milliseconds(u64),
    Count(u64),
}

impl ParameterValue {
    pub fn unit(&self) -> Unit {
        match self {
            ParameterValue::Bytes(_) => Unit::Bytes,
            ParameterValue::Milliseconds(_) => Unit::Milliseconds,
            ParameterValue::Count(_) => Unit::Count,
        }
    }

    pub fn raw(&self) -> u64 {
        match *self {
            ParameterValue::Bytes(v) | ParameterValue::Milliseconds(v) | ParameterValue::Count(v) => v,
        }
    }
}

/// Renders in postgresql.conf syntax: `64GB`, `1min`, `288`
impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParameterValue::Bytes(b) => f.write_str(&format_pg_memory(b)),
            ParameterValue::Milliseconds(ms) => f.write_str(&format_pg_duration_ms(ms)),
            ParameterValue::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Recommendation rule: a pure function of the hardware facts
pub type RecommendationRule = fn(&HardwareProfile) -> ParameterValue;

/// One tunable server setting and how to size it
#[derive(Clone, Copy)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub domain: Domain,
    pub unit: Unit,
    pub context: Context,
    pub default: ParameterValue,
    pub rule: RecommendationRule,
}

impl ParameterSpec {
    pub fn recommend(&self, hardware: &HardwareProfile) -> ParameterValue {
        (self.rule)(hardware)
    }

    pub fn requires_restart(&self) -> bool {
        self.context == Context::Restart
    }
}

impl fmt::Debug for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSpec")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("unit", &self.unit)
            .field("context", &self.context)
            .field("default", &self.default)
            .finish()
    }
}

impl PartialEq for ParameterSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ParameterSpec {}
