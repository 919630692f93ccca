//! Script emitter
//!
//! Renders recommendations as configuration statements, one per line, in
//! the order they are given.

use crate::engine::Recommendation;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptFormat {
    /// `ALTER SYSTEM SET name = 'value';`
    #[default]
    AlterSystem,
    /// `name = 'value'` as written in postgresql.conf
    ConfFile,
}

impl ScriptFormat {
    fn comment_marker(&self) -> &'static str {
        match self {
            ScriptFormat::AlterSystem => "--",
            ScriptFormat::ConfFile => "#",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptEmitter {
    pub format: ScriptFormat,
    /// Append the default value and restart note as a trailing comment
    pub annotate: bool,
}

impl ScriptEmitter {
    pub fn new(format: ScriptFormat) -> Self {
        Self {
            format,
            annotate: false,
        }
    }

    pub fn annotated(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn render(&self, recommendations: &[Recommendation]) -> String {
        let mut out = String::new();
        for rec in recommendations {
            out.push_str(&self.render_line(rec));
            out.push('\n');
        }
        out
    }

    pub fn render_line(&self, rec: &Recommendation) -> String {
        let mut line = match self.format {
            ScriptFormat::AlterSystem => {
                format!("ALTER SYSTEM SET {} = '{}';", rec.name(), rec.value)
            }
            ScriptFormat::ConfFile => format!("{} = '{}'", rec.name(), rec.value),
        };

        if self.annotate {
            let _ = write!(
                line,
                " {} default {}",
                self.format.comment_marker(),
                rec.parameter.default
            );
            if rec.parameter.requires_restart() {
                line.push_str(", restart required");
            }
        }

        line
    }
}

/// Render with the default `ALTER SYSTEM` format and no annotations
pub fn render(recommendations: &[Recommendation]) -> String {
    ScriptEmitter::default().render(recommendations)
}

static STATEMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?i:ALTER\s+SYSTEM\s+SET\s+)?([A-Za-z_][A-Za-z0-9_.]*)\s*(?:=|\s+(?i:TO)\s+)")
        .expect("statement pattern is valid")
});

/// Parameter names set by an emitted script, in order of appearance.
///
/// Accepts either output format; blank lines and comment lines are skipped.
pub fn parse_parameter_names(script: &str) -> Vec<String> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("--") && !line.starts_with('#'))
        .filter_map(|line| STATEMENT_PATTERN.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecommendationEngine;
    use crate::hardware::HardwareProfile;

    fn guide_recommendations() -> Vec<Recommendation> {
        RecommendationEngine::default()
            .compute(&HardwareProfile::from_gb(256, 48))
            .unwrap()
    }

    #[test]
    fn test_render_alter_system() {
        let script = render(&guide_recommendations());
        assert!(script.contains("ALTER SYSTEM SET shared_buffers = '64GB';\n"));
        assert!(script.contains("ALTER SYSTEM SET max_connections = '288';\n"));
        assert!(script.contains("ALTER SYSTEM SET idle_in_transaction_session_timeout = '1min';\n"));
    }

    #[test]
    fn test_render_conf_file() {
        let script = ScriptEmitter::new(ScriptFormat::ConfFile).render(&guide_recommendations());
        let first = script.lines().next().unwrap();
        assert_eq!(first, "shared_buffers = '64GB'");
    }

    #[test]
    fn test_annotations_stay_on_one_line() {
        let recs = guide_recommendations();
        let script = ScriptEmitter::default().annotated(true).render(&recs);
        assert_eq!(script.lines().count(), recs.len());

        let first = script.lines().next().unwrap();
        assert_eq!(
            first,
            "ALTER SYSTEM SET shared_buffers = '64GB'; -- default 128MB, restart required"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_parse_parameter_names_skips_comments() {
        let script = "-- header\n\nALTER SYSTEM SET work_mem = '4MB';\n# conf comment\nmax_connections = '100' # note\nalter system set jit_above_cost to 500000;\n";
        assert_eq!(
            parse_parameter_names(script),
            vec!["work_mem", "max_connections", "jit_above_cost"]
        );
    }

    #[test]
    fn test_parse_round_trip_both_formats() {
        let recs = guide_recommendations();
        let expected: Vec<String> = recs.iter().map(|r| r.name().to_string()).collect();

        for format in [ScriptFormat::AlterSystem, ScriptFormat::ConfFile] {
            let script = ScriptEmitter::new(format).annotated(true).render(&recs);
            assert_eq!(parse_parameter_names(&script), expected, "{:?}", format);
        }
    }
}
