use std::ffi::OsString;
use std::fmt;
use std::io::Write;

use lab_common::{parse_operand, LabError};
use tracing::debug;

use crate::ffi;

/// The two integers handed across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
  /// First operand
  pub a: i32,
  /// Second operand
  pub b: i32,
}

impl Operands {
  /// Used for any operand not given on the command line
  pub const DEFAULT: Self = Self { a: 5, b: 7 };

  /// Take `a` from the first argument and `b` from the second.
  ///
  /// Missing arguments keep their defaults and anything past the second is
  /// ignored. Text that is not a number converts the way `atoi` would.
  #[must_use]
  pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
    let mut operands = Self::DEFAULT;
    if let Some(a) = args.first() {
      operands.a = parse_operand(a.as_ref());
    }
    if let Some(b) = args.get(1) {
      operands.b = parse_operand(b.as_ref());
    }
    operands
  }
}

impl Default for Operands {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// One completed call to `sum_two`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
  /// First operand
  pub a: i32,
  /// Second operand
  pub b: i32,
  /// What the routine returned
  pub result: i32,
}

impl Invocation {
  /// Cross the boundary with `operands`.
  #[must_use]
  pub fn call(operands: Operands) -> Self {
    let Operands { a, b } = operands;
    debug!(a, b, backend = ffi::BACKEND, "calling sum_two");
    let result = ffi::sum_two(a, b);
    debug!(result, "sum_two returned");
    Self { a, b, result }
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} + {} = {}", self.a, self.b, self.result)
  }
}

/// Decode raw process arguments into operand text.
///
/// Nothing is treated as a flag: `-h`, `--version` and `--` are operands like
/// any other. Bytes that are not UTF-8 become U+FFFD, which converts to 0.
#[must_use]
pub fn operand_text<I>(args: I) -> Vec<String>
where
  I: IntoIterator<Item = OsString>,
{
  args
    .into_iter()
    .map(|arg| arg.to_string_lossy().into_owned())
    .collect()
}

/// Parse `args`, call `sum_two` and write the result line to `out`.
pub fn run<S, W>(args: &[S], out: &mut W) -> Result<Invocation, LabError>
where
  S: AsRef<str>,
  W: Write,
{
  let invocation = Invocation::call(Operands::from_args(args));
  writeln!(out, "{invocation}")?;
  out.flush()?;
  Ok(invocation)
}
