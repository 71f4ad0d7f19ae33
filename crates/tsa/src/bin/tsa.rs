//! Command-line trial sequential analysis.
//!
//! # Usage
//!
//! ```bash
//! # Default design (α 5%, β 20%, control rate 10%, RRR 20%)
//! tsa trials.csv
//!
//! # Custom design with a diversity adjustment
//! tsa trials.csv --control-rate 0.15 --rrr 35 --heterogeneity-correction 1.2
//!
//! # Machine-readable trace for charting
//! tsa trials.json --format csv --output trace.csv
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tsa::data::load_studies;
use tsa::output::{format_result, to_json_pretty, trace_to_csv};
use tsa::{Config, FutilityBoundaryType, TrialSequentialAnalysis, TsaError};

/// Trial sequential analysis of a cumulative meta-analysis
#[derive(Parser, Debug)]
#[command(name = "tsa")]
#[command(about = "Run a trial sequential analysis over an ordered list of studies")]
#[command(version)]
struct Args {
    /// Study list (.csv, or .json for a JSON array), in chronological order
    studies: PathBuf,

    /// Two-sided Type-I error
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,

    /// Type-II error (1 - power)
    #[arg(long, default_value_t = 0.20)]
    beta: f64,

    /// Anticipated control-arm event rate
    #[arg(long, default_value_t = 0.10)]
    control_rate: f64,

    /// Anticipated relative risk reduction, in percent
    #[arg(long, default_value_t = 20.0)]
    rrr: f64,

    /// Multiplicative inflation of the information size for heterogeneity
    #[arg(long, default_value_t = 1.0)]
    heterogeneity_correction: f64,

    /// Futility boundary: none, obrien-fleming, pocock, conditional-power
    #[arg(long, default_value = "obrien-fleming")]
    futility: FutilityBoundaryType,

    /// Inflate the information size by 1 / (1 - I²) using the observed I²
    #[arg(long)]
    i2_adjust: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable report
    Text,
    /// Full result as JSON
    Json,
    /// Cumulative trace as CSV
    Csv,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    // Direct field assignment so bad values surface as errors, not panics
    let config = Config {
        alpha: args.alpha,
        beta: args.beta,
        control_rate: args.control_rate,
        relative_risk_reduction: args.rrr,
        heterogeneity_correction: args.heterogeneity_correction,
        futility: args.futility,
        use_i2_adjustment: args.i2_adjust,
    };

    let studies = load_studies(&args.studies).map_err(TsaError::from)?;
    if studies.is_empty() {
        return Err(format!("no studies in {}", args.studies.display()).into());
    }

    let result = TrialSequentialAnalysis::with_config(config).run_checked(&studies)?;

    let rendered = match args.format {
        Format::Text => format_result(&result),
        Format::Json => to_json_pretty(&result)?,
        Format::Csv => trace_to_csv(&result),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
