//! CLI command implementations

use anyhow::{Context, Result};
use pg_tune_rs::catalog::{Domain, ParameterCatalog};
use pg_tune_rs::config::{Config, HardwareConfig, OutputConfig, OutputFormat};
use pg_tune_rs::engine::{Recommendation, RecommendationEngine, RecommendationReport};
use pg_tune_rs::hardware::detect_hardware;
use pg_tune_rs::utils::format_bytes;
use std::fs;
use tracing::info;

pub struct RecommendArgs {
    pub memory_gb: Option<u64>,
    pub cores: Option<u64>,
    pub preset: Option<String>,
    pub format: Option<OutputFormat>,
    pub annotate: bool,
    pub output: Option<String>,
    pub config: Option<String>,
}

pub fn detect() -> Result<()> {
    let hw = detect_hardware().context("Could not auto-detect hardware")?;

    println!("Detected hardware:");
    println!("  Memory:  {}", format_bytes(hw.total_memory_bytes));
    println!("  Cores:   {}", hw.core_count);
    println!();
    println!("Run 'pg_tune recommend' to compute settings for this machine.");
    Ok(())
}

pub fn list(domain: Option<String>) -> Result<()> {
    let catalog = ParameterCatalog::global();
    let domains: Vec<Domain> = match domain {
        Some(name) => vec![parse_domain(&name)?],
        None => Domain::ALL.to_vec(),
    };

    for domain in domains {
        println!("[{}]", domain);
        for spec in catalog.by_domain(domain) {
            let restart = if spec.requires_restart() { " (restart)" } else { "" };
            println!("  {:<38} default {:<8}{}", spec.name, spec.default.to_string(), restart);
        }
        println!();
    }
    Ok(())
}

pub fn show(name: String, memory_gb: Option<u64>, cores: Option<u64>) -> Result<()> {
    let spec = ParameterCatalog::global().lookup(&name)?;

    println!("{}", spec.name);
    println!("  {}", spec.description);
    println!("  Domain:   {}", spec.domain);
    println!("  Unit:     {:?}", spec.unit);
    println!("  Default:  {}", spec.default);
    println!(
        "  Applies:  {}",
        if spec.requires_restart() { "after restart" } else { "after reload" }
    );

    if memory_gb.is_some() || cores.is_some() {
        let hw = HardwareConfig {
            preset: None,
            memory_gb,
            cores,
        }
        .resolve()?;
        let rec = RecommendationEngine::default().compute_one(spec.name, &hw)?;
        println!("  Recommended for {:.0}GB / {} cores: {}", hw.memory_gb(), hw.core_count, rec.value);
    }
    Ok(())
}

pub fn recommend(args: RecommendArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let flags = HardwareConfig {
        preset: args.preset,
        memory_gb: args.memory_gb,
        cores: args.cores,
    };
    let hw = file_config.hardware.merged_with(&flags).resolve()?;

    let output = OutputConfig {
        format: args.format.unwrap_or(file_config.output.format),
        annotate: args.annotate || file_config.output.annotate,
        path: args.output.or(file_config.output.path),
    };

    let recommendations = RecommendationEngine::default().compute(&hw)?;
    let text = render_output(&recommendations, &output)?;

    match &output.path {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write {}", path))?;
            info!(path = %path, count = recommendations.len(), "wrote recommendations");
            println!("Recommendations written to: {}", path);
        }
        None => print!("{}", text),
    }

    let restart: Vec<_> = recommendations
        .iter()
        .filter(|r| r.changed() && r.parameter.requires_restart())
        .map(|r| r.name())
        .collect();
    if !restart.is_empty() {
        eprintln!("Server restart required for: {}", restart.join(", "));
    }

    Ok(())
}

fn render_output(recommendations: &[Recommendation], output: &OutputConfig) -> Result<String> {
    match output.emitter() {
        Some(emitter) => Ok(emitter.render(recommendations)),
        None => {
            let reports: Vec<RecommendationReport> =
                recommendations.iter().map(Recommendation::report).collect();
            Ok(serde_json::to_string_pretty(&reports)? + "\n")
        }
    }
}

fn parse_domain(name: &str) -> Result<Domain> {
    Domain::ALL
        .into_iter()
        .find(|d| d.as_str().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown domain: {}. Available: {:?}",
                name,
                Domain::ALL.iter().map(Domain::as_str).collect::<Vec<_>>()
            )
        })
}
