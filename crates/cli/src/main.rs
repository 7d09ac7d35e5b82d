// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::Context;
use clap::{Parser, Subcommand};
use orca_config::BoardConfig;
use orca_sim::{CollectError, Collector, Outcome, Report, SimBoard};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

const EXIT_PASS: u8 = 0;
const EXIT_TEST_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_PROTOCOL_ERROR: u8 = 3;

const RESULT_SCHEMA_VERSION: &str = "1.0";

#[derive(Parser, Debug)]
#[command(author, version, about = "ORCA test image tooling", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a UART capture from a test image run.
    Collect(CollectArgs),

    /// Run the CSR self-test on a simulated board and classify its output.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CollectArgs {
    /// Capture file (raw UART bytes). Reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Path to the board description (YAML)
    #[arg(short, long)]
    board: PathBuf,

    /// Write the raw UART capture to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CollectResult<'a> {
    result_schema_version: &'static str,
    #[serde(flatten)]
    outcome: Outcome,
    bytes: usize,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<serde_json::Value>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Collect(args) => run_collect(args),
        Commands::Simulate(args) => run_simulate(args),
    }
}

fn read_capture(input: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match input {
        Some(path) => {
            bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read capture at {:?}", path))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read capture from stdin")?;
        }
    }
    Ok(bytes)
}

fn run_collect(args: CollectArgs) -> ExitCode {
    let bytes = match read_capture(args.input.as_deref()) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    finish(&bytes, args.json, None)
}

fn run_simulate(args: SimulateArgs) -> ExitCode {
    let config = match BoardConfig::from_file(&args.board) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    let mut board = match SimBoard::from_config(&config) {
        Ok(board) => board,
        Err(e) => {
            error!("Failed to build board '{}': {}", config.name, e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    board.run_selftest();

    let bytes = match board.capture() {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_PROTOCOL_ERROR);
        }
    };

    if let Some(path) = &args.output {
        if let Err(e) = std::fs::write(path, &bytes) {
            error!("Failed to write capture to {:?}: {}", path, e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
        info!("Capture written to {:?} ({} bytes)", path, bytes.len());
    }

    finish(&bytes, args.json, Some(board.snapshot()))
}

fn finish(bytes: &[u8], json: bool, board: Option<serde_json::Value>) -> ExitCode {
    let mut collector = Collector::new();
    collector.extend(bytes);

    let report = match collector.finish() {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            if json {
                print_protocol_error(&e, bytes.len());
            }
            return ExitCode::from(EXIT_PROTOCOL_ERROR);
        }
    };

    if json {
        print_json(&report, bytes.len(), board);
    } else {
        print!("{}", report.text);
        println!();
    }

    match report.outcome {
        Outcome::Pass => {
            info!("Test passed");
            ExitCode::from(EXIT_PASS)
        }
        Outcome::Fail { errors } => {
            error!("Test failed with {} error(s)", errors);
            ExitCode::from(EXIT_TEST_FAIL)
        }
        Outcome::Unknown => {
            error!("Sentinel received without a pass or fail message");
            ExitCode::from(EXIT_PROTOCOL_ERROR)
        }
    }
}

fn print_json(report: &Report, bytes: usize, board: Option<serde_json::Value>) {
    let result = CollectResult {
        result_schema_version: RESULT_SCHEMA_VERSION,
        outcome: report.outcome,
        bytes,
        text: &report.text,
        board,
    };
    match serde_json::to_string(&result) {
        Ok(line) => println!("{}", line),
        Err(e) => error!("Failed to serialize result: {}", e),
    }
}

fn print_protocol_error(e: &CollectError, bytes: usize) {
    let value = serde_json::json!({
        "result_schema_version": RESULT_SCHEMA_VERSION,
        "status": "error",
        "bytes": bytes,
        "message": e.to_string(),
    });
    println!("{}", value);
}
