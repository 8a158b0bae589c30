// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-engine CLI - WCAG/ARIA evaluation with JSON output

use a11y_engine::axe::RecordedResults;
use a11y_engine::compliance::Recommendation;
use a11y_engine::config;
use a11y_engine::scanner::Scanner;
use a11y_engine::{
    AriaValidator, ComplianceCalculator, ComplianceReport, Document, EvaluationResult, RuleExecutor,
    RuleRegistry, WcagLevel,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG and WAI-ARIA accessibility evaluation
#[derive(Parser)]
#[command(name = "a11y-engine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the WCAG rules on a single file
    Evaluate {
        /// HTML file to evaluate
        file: PathBuf,

        /// Saved axe-core results to merge
        #[arg(long)]
        axe_results: Option<PathBuf>,
    },

    /// Validate ARIA usage in a single file
    Aria {
        /// HTML file to validate
        file: PathBuf,
    },

    /// Calculate WCAG compliance for a single file
    Compliance {
        /// HTML file to evaluate
        file: PathBuf,

        /// Target conformance level (defaults to the configured level)
        #[arg(long)]
        level: Option<WcagLevelArg>,

        /// Saved axe-core results to merge
        #[arg(long)]
        axe_results: Option<PathBuf>,
    },

    /// Evaluate every HTML file under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Target conformance level (defaults to the configured level)
        #[arg(long)]
        level: Option<WcagLevelArg>,
    },
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    /// Level A - minimum
    A,
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::A => WcagLevel::A,
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

#[derive(Serialize)]
struct ComplianceOutput<'a> {
    report: &'a ComplianceReport,
    recommendations: Vec<Recommendation>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11y_engine=debug")
    } else {
        EnvFilter::new("a11y_engine=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let mut config = config::load_config(&config_path)?;

    match cli.command {
        Commands::Evaluate { file, axe_results } => {
            let document = Document::from_file(&file)?;
            let executor = RuleExecutor::new(RuleRegistry::wcag(), config);
            let result = evaluate(&executor, &document, axe_results.as_deref())?;
            print_json(&result)?;

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Aria { file } => {
            let document = Document::from_file(&file)?;
            let result = AriaValidator::new(config.aria).validate(&document);
            print_json(&result)?;

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Compliance { file, level, axe_results } => {
            if let Some(level) = level {
                config.wcag.level = level.into();
            }
            let document = Document::from_file(&file)?;
            let executor = RuleExecutor::new(RuleRegistry::wcag(), config.clone());
            let result = evaluate(&executor, &document, axe_results.as_deref())?;
            let report = ComplianceCalculator::new(config).calculate_configured(&result);
            print_json(&ComplianceOutput {
                recommendations: report.recommendations(),
                report: &report,
            })?;

            if !report.meets_target() {
                std::process::exit(1);
            }
        }

        Commands::Check { dir, level } => {
            if let Some(level) = level {
                config.wcag.level = level.into();
            }
            let report = Scanner::new(config).scan_directory(&dir);
            print_json(&report)?;

            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn evaluate(
    executor: &RuleExecutor,
    document: &Document,
    axe_results: Option<&Path>,
) -> anyhow::Result<EvaluationResult> {
    match axe_results {
        Some(path) => {
            let engine = RecordedResults::from_file(path)?;
            Ok(executor.evaluate_with(document, Some(&engine)))
        }
        None => Ok(executor.evaluate(document)),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
