//! Common support for the assembly labs.
//!
//! This crate provides the pieces every lab driver and lab test suite
//! shares: C-style operand conversion, the error type, logging setup and
//! the binary runner used to exercise compiled lab programs.

/// Error type shared by the lab crates
pub mod error;
/// Log subscriber setup
pub mod logging;
/// Conversion of operand text to integers
pub mod operand;
/// Running lab binaries and capturing their output
pub mod runner;

pub use error::LabError;
pub use operand::parse_operand;
pub use runner::{run_binary, RunOutput, DEFAULT_TIMEOUT};
