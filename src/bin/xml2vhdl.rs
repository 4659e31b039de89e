//! Command line front end: converts one XML hardware description into one VHDL file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use xml2vhdl::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use xml2vhdl::{ConversionError, Converter};

#[derive(Parser)]
#[command(name = "xml2vhdl")]
#[command(about = "Generate a VHDL entity and architecture from an XML hardware description")]
#[command(version)]
struct Args {
    /// XML hardware description to read
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// VHDL file to write (overwritten if it exists)
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    match run(&args) {
        Ok(()) => {
            println!("Successfully generated {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}

/// A missing input file gets the bare message; everything else the full chain.
fn diagnostic(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ConversionError>() {
        Some(ConversionError::FileNotFound { .. }) => err.to_string(),
        _ => format!("Error: {:#}", err),
    }
}

fn run(args: &Args) -> Result<()> {
    match Converter::new().convert(&args.input, &args.output) {
        Ok(_) => Ok(()),
        // Keep the plain diagnostic for a missing input file
        Err(err @ ConversionError::FileNotFound { .. }) => Err(err.into()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to convert {}", args.input.display()))
        }
    }
}
