//! CLI entry point: validate workflow DSL files and generate node ids.

mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dsl_validator::{id, ValidationReport, ValidatorOptions};

#[derive(Parser)]
#[command(name = "dsl-validator")]
#[command(version)]
#[command(about = "Validate workflow DSL files", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "DSL_VALIDATOR_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a workflow DSL file (YAML, or JSON by extension)
    Validate {
        /// Path to the workflow file
        path: PathBuf,
        /// Also warn about cycles and nodes unreachable from a start node
        #[arg(long)]
        topology: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Accepted code node language (repeatable, replaces the defaults)
        #[arg(long = "code-language", value_name = "LANG")]
        code_languages: Vec<String>,
    },
    /// Print node ids, one per line
    Id {
        /// Number of ids to generate
        count: Option<usize>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    match cli.command {
        Commands::Validate {
            path,
            topology,
            format,
            code_languages,
        } => {
            let mut options = ValidatorOptions {
                topology_checks: topology,
                ..ValidatorOptions::default()
            };
            if !code_languages.is_empty() {
                options.code_languages = code_languages;
            }
            cmd_validate(&path, &options, format)
        }
        Commands::Id { count } => {
            match count {
                Some(count) => id::generate_ids(count)
                    .iter()
                    .for_each(|node_id| println!("{}", node_id)),
                None => println!("{}", id::generate_id()),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_validate(path: &Path, options: &ValidatorOptions, format: OutputFormat) -> Result<ExitCode> {
    let report = match dsl_validator::validate_file(path, options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &ValidationReport) {
    if !report.warnings.is_empty() {
        println!("{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
        println!();
    }

    if report.is_valid() {
        println!("{}", "Workflow validation passed!".green().bold());
    } else {
        println!("{}", "Validation failed with errors:".red().bold());
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
}
