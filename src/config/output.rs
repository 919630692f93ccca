use crate::emitter::{ScriptEmitter, ScriptFormat};
use serde::{Deserialize, Serialize};

/// What the `recommend` command writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    AlterSystem,
    Conf,
    Json,
}

impl OutputFormat {
    /// Script format for text outputs, `None` for JSON
    pub fn script_format(&self) -> Option<ScriptFormat> {
        match self {
            OutputFormat::AlterSystem => Some(ScriptFormat::AlterSystem),
            OutputFormat::Conf => Some(ScriptFormat::ConfFile),
            OutputFormat::Json => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub annotate: bool,
    /// Write to this file instead of stdout
    pub path: Option<String>,
}

impl OutputConfig {
    pub fn emitter(&self) -> Option<ScriptEmitter> {
        self.format
            .script_format()
            .map(|format| ScriptEmitter::new(format).annotated(self.annotate))
    }
}
