pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pg_tune_rs::config::OutputFormat;

#[derive(Parser)]
#[command(name = "pg_tune")]
#[command(about = "PostgreSQL parameter recommendations for your hardware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the memory and core count detected on this machine
    Detect,
    /// List tunable parameters with their defaults
    List {
        /// Only show one domain (memory, parallelism, jit, connections)
        #[arg(long)]
        domain: Option<String>,
    },
    /// Describe a single parameter
    Show {
        /// Parameter name, e.g. work_mem
        name: String,
        /// Memory in GB to compute a recommendation for
        #[arg(long)]
        memory_gb: Option<u64>,
        /// Core count to compute a recommendation for
        #[arg(long)]
        cores: Option<u64>,
    },
    /// Compute recommendations and emit a configuration script
    Recommend {
        /// Memory in GB (optional, will auto-detect if not provided)
        #[arg(long)]
        memory_gb: Option<u64>,
        /// CPU cores (optional, will auto-detect if not provided)
        #[arg(long)]
        cores: Option<u64>,
        /// Use a reference machine instead of this one
        #[arg(long)]
        preset: Option<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Add the default value and restart notes as trailing comments
        #[arg(long)]
        annotate: bool,
        /// Write the script to a file
        #[arg(long)]
        output: Option<String>,
        /// JSON config file with hardware and output settings
        #[arg(long)]
        config: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect => commands::detect(),
        Commands::List { domain } => commands::list(domain),
        Commands::Show {
            name,
            memory_gb,
            cores,
        } => commands::show(name, memory_gb, cores),
        Commands::Recommend {
            memory_gb,
            cores,
            preset,
            format,
            annotate,
            output,
            config,
        } => commands::recommend(commands::RecommendArgs {
            memory_gb,
            cores,
            preset,
            format,
            annotate,
            output,
            config,
        }),
    }
}
