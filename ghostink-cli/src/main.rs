// ghostink CLI - hide files in zero-width text
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! # ghostink
//!
//! Command-line front end for the ghostink codec.
//!
//! ## Usage
//!
//! ```bash
//! # Hide a file; the smallest strategy is picked automatically
//! ghostink encode secret.pdf -o hidden.txt
//!
//! # Try both compressed strategies
//! ghostink encode secret.pdf -o hidden.txt --scheme dual
//!
//! # Recover it
//! ghostink decode hidden.txt -o secret.pdf
//!
//! # Recover a stream pasted inside visible text
//! ghostink decode letter.txt -o secret.pdf --embedded
//!
//! # Inspect a text file
//! ghostink analyze letter.txt --json
//! ```

mod commands;
mod error;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use ghostink::compress::MAX_COMPRESSION_LEVEL;
use ghostink::{CodecConfig, StrategySet};
use report::AnalysisReport;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Hide bytes in zero-width Unicode text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a file into invisible text
    Encode(EncodeArgs),
    /// Decode invisible text back into the original bytes
    Decode(DecodeArgs),
    /// Report what a text file contains
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
struct EncodeArgs {
    /// File to encode
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable compression
    #[arg(long)]
    no_compress: bool,

    /// Compressed strategies to try
    #[arg(long, value_enum, default_value_t = Scheme::Single)]
    scheme: Scheme,

    /// zstd compression level
    #[arg(long, default_value_t = MAX_COMPRESSION_LEVEL)]
    level: i32,

    /// Print the encode summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Text file holding the encoded stream
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read unknown characters as bit 0 instead of failing
    #[arg(long, conflicts_with = "embedded")]
    lenient: bool,

    /// Search visible cover text for the encoded stream
    #[arg(long)]
    embedded: bool,
}

impl DecodeArgs {
    /// Decoding accepts streams from either scheme
    fn config(&self) -> CodecConfig {
        let config = CodecConfig::dual_marker();
        if self.lenient {
            config.lenient()
        } else {
            config
        }
    }
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Text file to inspect
    input: PathBuf,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
}

/// Strategy schemes selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    /// One marker: compress-then-encode
    Single,
    /// Two markers: compress-then-encode and encode-then-compress
    Dual,
}

impl EncodeArgs {
    fn config(&self) -> CodecConfig {
        let strategies = match (self.no_compress, self.scheme) {
            (true, _) => StrategySet::uncompressed(),
            (false, Scheme::Single) => StrategySet::single_marker(),
            (false, Scheme::Dual) => StrategySet::dual_marker(),
        };
        CodecConfig::new()
            .with_strategies(strategies)
            .with_level(self.level)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for payload output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match cli.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("ghostink v{}", env!("CARGO_PKG_VERSION"));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> error::Result<()> {
    match command {
        Command::Encode(args) => {
            let report = commands::encode(&args.input, args.output.as_deref(), args.config())?;
            if args.json {
                eprintln!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                eprint!("{}", report.render());
            }
        }
        Command::Decode(args) => {
            commands::decode(
                &args.input,
                args.output.as_deref(),
                args.config(),
                args.embedded,
            )?;
        }
        Command::Analyze(args) => {
            let stats = commands::analyze(&args.input, &CodecConfig::new().alphabet)?;
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&AnalysisReport::from(&stats))?
                );
            } else {
                print!("{}", stats.report());
            }
        }
    }
    Ok(())
}
