//! The boundary crossing: Rust calling the external `sum_two` routine.
//!
//! `build.rs` assembles the routine for the target (or compiles the portable
//! C version) into a static library linked into this crate.

mod raw {
  use std::ffi::c_int;

  extern "C" {
    /// `int sum_two(int a, int b)`
    pub fn sum_two(a: c_int, b: c_int) -> c_int;
  }
}

/// Which implementation of `sum_two` the build script linked in
pub const BACKEND: &str = env!("SUM_TWO_BACKEND");

/// Add two integers by calling the external routine. Wraps on overflow.
#[must_use]
pub fn sum_two(a: i32, b: i32) -> i32 {
  // SAFETY: the routine reads its two register arguments and touches no
  // memory outside its own stack frame.
  unsafe { raw::sum_two(a, b) }
}
