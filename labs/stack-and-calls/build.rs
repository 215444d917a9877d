//! Builds the `sum_two` routine for the target into a static library.

use std::env;

const SOURCES: &[&str] = &[
  "asm/sum_two_x86_64.S",
  "asm/sum_two_aarch64.S",
  "asm/sum_two.c",
];

fn main() {
  let arch = env::var("CARGO_CFG_TARGET_ARCH").expect("CARGO_CFG_TARGET_ARCH is set by cargo");
  let os = env::var("CARGO_CFG_TARGET_OS").expect("CARGO_CFG_TARGET_OS is set by cargo");

  // Hand-written routines are ELF/GNU-as only; everything else gets the C version
  let (source, backend) = match (arch.as_str(), os.as_str()) {
    ("x86_64", "linux") => (SOURCES[0], "x86_64-sysv-asm"),
    ("aarch64", "linux") => (SOURCES[1], "aarch64-aapcs64-asm"),
    _ => (SOURCES[2], "portable-c"),
  };

  println!("cargo:rerun-if-changed=build.rs");
  for path in SOURCES {
    println!("cargo:rerun-if-changed={path}");
  }
  println!("cargo:rustc-env=SUM_TWO_BACKEND={backend}");

  cc::Build::new().file(source).compile("sum_two_asm");
}
