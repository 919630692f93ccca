//! Recommendation engine
//!
//! Evaluates every catalog rule against a hardware profile. The engine holds
//! only a shared reference to the immutable catalog, so one instance can be
//! used from any number of threads.

use crate::catalog::{ParameterCatalog, ParameterSpec, ParameterValue};
use crate::error::TuningError;
use crate::hardware::HardwareProfile;
use serde::Serialize;
use tracing::debug;

/// A computed value paired with the spec that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub parameter: &'static ParameterSpec,
    pub value: ParameterValue,
}

impl Recommendation {
    pub fn name(&self) -> &'static str {
        self.parameter.name
    }

    /// Whether the recommended value differs from the server default
    pub fn changed(&self) -> bool {
        self.value != self.parameter.default
    }

    pub fn report(&self) -> RecommendationReport {
        RecommendationReport {
            name: self.parameter.name,
            domain: self.parameter.domain.as_str(),
            value: self.value.to_string(),
            raw: self.value,
            default: self.parameter.default.to_string(),
            requires_restart: self.parameter.requires_restart(),
        }
    }
}

/// Serializable view of a recommendation
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub name: &'static str,
    pub domain: &'static str,
    pub value: String,
    pub raw: ParameterValue,
    pub default: String,
    pub requires_restart: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    catalog: &'static ParameterCatalog,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ParameterCatalog::global())
    }
}

impl RecommendationEngine {
    pub fn new(catalog: &'static ParameterCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'static ParameterCatalog {
        self.catalog
    }

    /// One recommendation per catalog entry, in catalog order.
    ///
    /// The profile is validated before any rule runs, so an error never
    /// comes with partial output.
    pub fn compute(&self, hardware: &HardwareProfile) -> Result<Vec<Recommendation>, TuningError> {
        hardware.validate()?;

        Ok(self
            .catalog
            .entries()
            .iter()
            .map(|spec| evaluate(spec, hardware))
            .collect())
    }

    /// Evaluate a single parameter by name
    pub fn compute_one(
        &self,
        name: &str,
        hardware: &HardwareProfile,
    ) -> Result<Recommendation, TuningError> {
        let spec = self.catalog.lookup(name)?;
        hardware.validate()?;
        Ok(evaluate(spec, hardware))
    }
}

fn evaluate(spec: &'static ParameterSpec, hardware: &HardwareProfile) -> Recommendation {
    let value = spec.recommend(hardware);
    debug!(parameter = spec.name, value = %value, default = %spec.default, "evaluated rule");
    Recommendation {
        parameter: spec,
        value,
    }
}
