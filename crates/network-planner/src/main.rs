//! Network Planning CLI
//!
//! Computes the first-approximation planning report for one set of input
//! parameters.
//!
//! Usage:
//!   plan-network                                   # ./initial.json -> ./out.json
//!   plan-network --input site.json --output site-report.json --locale ru

use anyhow::{Context, Result};
use clap::Parser;
use cluster_interference::OutageMethod;
use network_planner::{
    input, Locale, OutputReport, PlannerConfig, PlannerError, ReportAssembler, DEFAULT_INPUT_FILE,
    DEFAULT_OUTPUT_FILE,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "plan-network",
    about = "First-approximation LTE network planning: cluster interference, sizing and link budget"
)]
struct Args {
    /// Path to the input parameters JSON file
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Output report JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Language of the report labels
    #[arg(long, value_enum, default_value_t = Locale::En)]
    locale: Locale,

    /// Evaluation of the outage probability integral (erfc or quadrature)
    #[arg(long, default_value_t = OutageMethod::ClosedForm)]
    outage_method: OutageMethod,

    /// Do not print the report summary
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn log_failure(err: PlannerError) -> PlannerError {
    match std::error::Error::source(&err) {
        Some(source) => error!("{}: {} ({})", err, source, err.kind()),
        None => error!("{} ({})", err, err.kind()),
    }
    err
}

fn write_report(path: &Path, report: &OutputReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .and_then(|()| writer.flush().map_err(serde_json::Error::io))
        .with_context(|| format!("failed to write report {:?}", path))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let record = input::load_input(&args.input)
        .map_err(log_failure)
        .with_context(|| format!("failed to load input parameters from {:?}", args.input))?;

    let config = PlannerConfig::new()
        .locale(args.locale)
        .outage_method(args.outage_method);

    let report = ReportAssembler::new(&record, config)
        .and_then(|assembler| assembler.build())
        .map_err(log_failure)
        .context("network planning failed")?;

    write_report(&args.output, &report)?;
    info!("Wrote {} metrics to {:?}", report.len(), args.output);

    if !args.quiet {
        info!("{}", "=".repeat(60));
        info!("PLANNING REPORT ({} metrics, outage via {})", report.len(), args.outage_method);
        info!("{}", "=".repeat(60));
        let mut current = None;
        for entry in report.entries() {
            let section = entry.metric.section();
            if current != Some(section) {
                info!("{}", section);
                current = Some(section);
            }
            info!("  {:>14.4} | {}", entry.value, entry.label);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use network_planner::{plan, InputRecord};
    use std::fs;

    fn sample_report() -> OutputReport {
        let json = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/initial.json")).unwrap();
        plan(&InputRecord::from_json_str(&json).unwrap(), PlannerConfig::default()).unwrap()
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let report = sample_report();

        write_report(&path, &report).unwrap();
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_object().unwrap().len(), report.len());
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_report(&path, &sample_report()).unwrap_err();
        assert!(format!("{:#}", err).contains("out.json"));
    }
}
