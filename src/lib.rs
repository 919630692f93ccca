//! PostgreSQL server-parameter tuning
//!
//! Turns hardware facts (total memory, core count) into recommended values
//! for a fixed catalog of PostgreSQL settings and renders them as
//! configuration statements.
//!
//! ## Main Components
//!
//! - `catalog`: The parameter table and its recommendation formulas
//! - `engine`: Evaluates every formula against a `HardwareProfile`
//! - `emitter`: Renders recommendations as `ALTER SYSTEM` or postgresql.conf lines
//! - `hardware`: Hardware detection and reference profiles
//! - `config`: Configuration management

pub mod catalog;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod hardware;
pub mod utils;

pub use catalog::{ParameterCatalog, ParameterSpec, ParameterValue, Unit};
pub use config::Config;
pub use emitter::{parse_parameter_names, render, ScriptEmitter, ScriptFormat};
pub use engine::{Recommendation, RecommendationEngine};
pub use error::TuningError;
pub use hardware::HardwareProfile;

/// Library errors
pub use anyhow::{Error, Result};
