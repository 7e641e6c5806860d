mod generate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use contract_abi::parse_abi_json;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use web3_typegen_core::TypegenConfig;

use crate::generate::FileReport;

#[derive(Parser)]
#[command(name = "web3-typegen")]
#[command(about = "Generate web3.js TypeScript declarations from contract ABIs", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate declarations for an ABI file or a directory of ABI files
    Generate {
        /// Path to ABI file or directory
        #[arg(default_value = ".")]
        path: String,

        /// Output directory (overrides config)
        #[arg(long)]
        out_dir: Option<String>,

        /// Path to config file
        #[arg(long)]
        config: Option<String>,

        /// Print declarations instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Output format for the summary
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Print the parsed contract description as JSON
    Inspect {
        /// Path to ABI file
        path: String,

        /// Contract name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Generate {
            path,
            out_dir,
            config,
            stdout,
            format,
        } => {
            generate_command(path, out_dir, config, stdout, format)?;
        }
        Commands::Inspect { path, name } => {
            inspect_command(path, name)?;
        }
    }

    Ok(())
}

// Logs go to stderr so `--stdout` output can be piped.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "web3_typegen=debug,contract_abi=debug"
    } else {
        "web3_typegen=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn generate_command(
    path: String,
    out_dir: Option<String>,
    config_path: Option<String>,
    to_stdout: bool,
    format: String,
) -> Result<()> {
    let start_time = Instant::now();

    let mut config = TypegenConfig::load(config_path.as_deref())?;
    if let Some(dir) = out_dir {
        config.output.dir = PathBuf::from(dir);
    }

    let files = generate::collect_abi_files(Path::new(&path), &config)?;
    info!(count = files.len(), "generating declarations");

    let results = generate::generate_all(&files);

    let reports = if to_stdout {
        print_declarations(results)
    } else {
        generate::write_declarations(results, &config)?
    };

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    let duration = start_time.elapsed();

    if format == "json" {
        output_json(&reports, failed, duration, to_stdout)?;
    } else {
        output_human(&reports, failed, duration, to_stdout);
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_declarations(results: Vec<(PathBuf, Result<generate::Generated>)>) -> Vec<FileReport> {
    results
        .into_iter()
        .map(|(source, result)| match result {
            Ok(generated) => {
                println!("// {}\n{}", source.display(), generated.declaration);
                FileReport {
                    source,
                    contract: Some(generated.contract),
                    output: None,
                    error: None,
                }
            }
            Err(e) => generate::failure(source, None, format!("{:#}", e)),
        })
        .collect()
}

fn inspect_command(path: String, name: Option<String>) -> Result<()> {
    let source = Path::new(&path);
    let content =
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", path))?;
    let contract_name = name.unwrap_or_else(|| generate::contract_name_for(source));
    let contract = parse_abi_json(&content, &contract_name)
        .with_context(|| format!("Failed to parse ABI in {}", path))?;

    println!("{}", serde_json::to_string_pretty(&contract)?);
    Ok(())
}

// Summaries go to stderr when declarations were printed to stdout.
fn output_human(
    reports: &[FileReport],
    failed: usize,
    duration: std::time::Duration,
    to_stdout: bool,
) {
    let mut lines = Vec::new();
    for report in reports {
        match (&report.output, &report.error) {
            (_, Some(err)) => lines.push(format!(
                "{} {}\n  → {}",
                "[FAILED]".red().bold(),
                report.source.display(),
                err
            )),
            (Some(output), None) => lines.push(format!(
                "{} {} → {}",
                "[OK]".green(),
                report.source.display(),
                output.display()
            )),
            (None, None) => {}
        }
    }

    let generated = reports.len() - failed;
    let summary = if failed > 0 {
        format!(
            "Generated {} {}, {} failed",
            generated,
            if generated == 1 { "declaration" } else { "declarations" },
            failed
        )
        .red()
        .bold()
    } else if generated == 0 {
        "No ABI files found".yellow()
    } else {
        format!(
            "Generated {} {}",
            generated,
            if generated == 1 { "declaration" } else { "declarations" }
        )
        .green()
        .bold()
    };
    lines.push(format!("{} in {:.1}s.", summary, duration.as_secs_f64()));

    for line in lines {
        if to_stdout {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

fn output_json(
    reports: &[FileReport],
    failed: usize,
    duration: std::time::Duration,
    to_stdout: bool,
) -> Result<()> {
    let output = json!({
        "summary": {
            "generated": reports.len() - failed,
            "failed": failed,
            "duration_ms": duration.as_millis()
        },
        "files": reports
    });

    let rendered = serde_json::to_string_pretty(&output)?;
    if to_stdout {
        eprintln!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
