//! `enigma` command-line front end.
//!
//! Reads a machine configuration, then processes setting and message lines
//! from INPUT (or stdin), writing converted messages to OUTPUT (or stdout).

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use enigma::{MachineConfig, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Rotor cipher machine simulator.
#[derive(Parser, Debug)]
#[command(name = "enigma")]
#[command(version, about, long_about = None)]
struct Args {
    /// Machine configuration file.
    config: PathBuf,

    /// Message file (defaults to standard input).
    input: Option<PathBuf>,

    /// Output file (defaults to standard output).
    output: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config_text = fs::read_to_string(&args.config)
        .with_context(|| format!("could not open {}", args.config.display()))?;
    let config = MachineConfig::parse(&config_text)
        .with_context(|| format!("bad configuration in {}", args.config.display()))?;
    info!(path = %args.config.display(), rotors = config.catalog().len(), "Configuration loaded");

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not open {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("could not read standard input")?;
            buf
        }
    };

    let mut session = Session::new(&config)?;
    let lines = session.process(&input)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("could not open {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
