//! Lab 01: stack and calls.
//!
//! A Rust driver hands two integers to an assembly routine through the C
//! calling convention and prints what comes back.

/// The command-line driver
pub mod driver;
/// Binding to the external `sum_two` routine
pub mod ffi;

pub use driver::{operand_text, run, Invocation, Operands};
