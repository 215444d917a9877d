#![allow(missing_docs)]

use anyhow::{Context, Result};
use lab_common::logging;

// Operands are read straight from the process arguments: any text, including
// `-h` or `--`, is an operand, so there is no flag parsing to route through.
fn main() -> Result<()> {
  logging::init();
  let operands = sum_two::operand_text(std::env::args_os().skip(1));

  let mut stdout = std::io::stdout().lock();
  sum_two::run(&operands, &mut stdout).context("Failed to write result")?;

  Ok(())
}
