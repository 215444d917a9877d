#![allow(missing_docs)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lab_common::{logging, run_binary, DEFAULT_TIMEOUT};

/// Run a lab binary, capturing its stdout, stderr and exit code
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Seconds to wait before killing the binary [default: 10]
  #[arg(long, value_name = "SECS", allow_negative_numbers = true, value_parser = parse_timeout)]
  timeout: Option<Duration>,

  /// Print the captured result as JSON instead of forwarding it
  #[arg(long)]
  json: bool,

  /// Binary to execute
  #[arg(value_name = "BINARY")]
  binary: PathBuf,

  /// Arguments passed through to the binary
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  args: Vec<String>,
}

fn parse_timeout(text: &str) -> Result<Duration, String> {
  let secs: f64 = text.parse().map_err(|e| format!("{e}"))?;
  Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
  logging::init();
  let cli = Cli::parse();

  let timeout = cli.timeout.unwrap_or(DEFAULT_TIMEOUT);
  let output = run_binary(&cli.binary, &cli.args, None, timeout).await?;

  if cli.json {
    println!("{}", output.to_json_line()?);
    return Ok(());
  }

  io::stdout()
    .write_all(output.stdout.as_bytes())
    .and_then(|()| io::stdout().flush())
    .context("Failed to forward stdout")?;
  io::stderr()
    .write_all(output.stderr.as_bytes())
    .context("Failed to forward stderr")?;

  std::process::exit(output.returncode)
}
