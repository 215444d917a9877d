use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Error type for lab support operations
#[derive(Debug, Error)]
pub enum LabError {
  /// IO operation failed
  #[error("IO error: {0}")]
  Io(#[from] io::Error),

  /// JSON serialization failed
  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// The binary to run does not exist
  #[error("Binary not found: {}", .0.display())]
  BinaryNotFound(PathBuf),

  /// The path to run exists but is not a regular file
  #[error("Not a file: {}", .0.display())]
  NotAFile(PathBuf),

  /// The binary did not exit before the deadline and was killed
  #[error("Binary execution timed out after {}s: {}", .limit.as_secs_f64(), .path.display())]
  Timeout {
    /// Binary that was killed
    path: PathBuf,
    /// Deadline that was exceeded
    limit: Duration,
  },
}
