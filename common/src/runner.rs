//! Run a lab binary and capture what it did.
//!
//! This is what the lab test suites drive their programs through: stdout,
//! stderr and the exit status come back as plain data, and a binary that
//! hangs is killed once the deadline passes.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::LabError;

/// How long a lab binary may run before it is killed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Captured result of one binary execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
  /// Everything written to stdout, lossily decoded
  pub stdout: String,
  /// Everything written to stderr, lossily decoded
  pub stderr: String,
  /// Exit code, or the negated signal number if the binary was killed by one
  pub returncode: i32,
}

impl RunOutput {
  /// Whether the binary exited with status 0
  #[must_use]
  pub const fn success(&self) -> bool {
    self.returncode == 0
  }

  /// The whole result as one line of JSON.
  pub fn to_json_line(&self) -> Result<String, LabError> {
    Ok(serde_json::to_string(self)?)
  }
}

/// Run `binary` with `args`, optionally feeding `stdin`, and capture its output.
pub async fn run_binary<I, S>(
  binary: impl AsRef<Path>,
  args: I,
  stdin: Option<&str>,
  timeout: Duration,
) -> Result<RunOutput, LabError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let binary = binary.as_ref();
  if !binary.exists() {
    return Err(LabError::BinaryNotFound(binary.to_path_buf()));
  }
  if !binary.is_file() {
    return Err(LabError::NotAFile(binary.to_path_buf()));
  }
  ensure_executable(binary)?;

  let mut child = Command::new(binary)
    .args(args)
    .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true)
    .spawn()?;
  debug!(binary = %binary.display(), pid = ?child.id(), "spawned");

  let pipe = child.stdin.take();
  let input = stdin.map(str::to_owned);
  let feed = async move {
    if let (Some(mut pipe), Some(input)) = (pipe, input) {
      // A binary that exits without reading its input is not a runner failure
      if let Err(err) = pipe.write_all(input.as_bytes()).await {
        debug!(%err, "stdin not fully consumed");
      }
    }
  };
  let run = async move {
    let ((), output) = tokio::join!(feed, child.wait_with_output());
    output
  };

  match tokio::time::timeout(timeout, run).await {
    Ok(output) => {
      let output = output?;
      let returncode = exit_code(output.status);
      debug!(binary = %binary.display(), returncode, "exited");
      Ok(RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        returncode,
      })
    }
    Err(_) => {
      warn!(binary = %binary.display(), "killed after {:?}", timeout);
      Err(LabError::Timeout {
        path: binary.to_path_buf(),
        limit: timeout,
      })
    }
  }
}

/// Give the binary execute permission if it has none.
#[cfg(unix)]
pub fn ensure_executable(binary: &Path) -> Result<(), LabError> {
  use std::os::unix::fs::PermissionsExt;

  let mut permissions = std::fs::metadata(binary)?.permissions();
  if permissions.mode() & 0o111 == 0 {
    debug!(binary = %binary.display(), "marking executable");
    permissions.set_mode(0o755);
    std::fs::set_permissions(binary, permissions)?;
  }
  Ok(())
}

/// Give the binary execute permission if it has none.
#[cfg(not(unix))]
pub fn ensure_executable(_binary: &Path) -> Result<(), LabError> {
  Ok(())
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
  use std::os::unix::process::ExitStatusExt;

  status
    .code()
    .or_else(|| status.signal().map(|signal| -signal))
    .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
  status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[cfg(unix)]
  const SH: &str = "/bin/sh";

  #[tokio::test]
  async fn test_missing_binary() {
    let err = run_binary("does/not/exist", std::iter::empty::<&str>(), None, DEFAULT_TIMEOUT)
      .await
      .unwrap_err();
    assert!(matches!(err, LabError::BinaryNotFound(_)));
  }

  #[tokio::test]
  async fn test_directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_binary(dir.path(), std::iter::empty::<&str>(), None, DEFAULT_TIMEOUT)
      .await
      .unwrap_err();
    assert!(matches!(err, LabError::NotAFile(_)));
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_captures_streams_and_exit_code() {
    let output = run_binary(
      SH,
      ["-c", "echo out; echo err >&2; exit 3"],
      None,
      DEFAULT_TIMEOUT,
    )
    .await
    .unwrap();

    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
    assert_eq!(output.returncode, 3);
    assert!(!output.success());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_feeds_stdin() {
    let output = run_binary(SH, ["-c", "cat"], Some("piped through\n"), DEFAULT_TIMEOUT)
      .await
      .unwrap();

    assert_eq!(output.stdout, "piped through\n");
    assert!(output.success());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_stdin_is_empty_when_not_given() {
    let output = run_binary(SH, ["-c", "cat"], None, DEFAULT_TIMEOUT)
      .await
      .unwrap();

    assert_eq!(output.stdout, "");
    assert!(output.success());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_signal_is_negated() {
    let output = run_binary(SH, ["-c", "kill -TERM $$"], None, DEFAULT_TIMEOUT)
      .await
      .unwrap();

    assert_eq!(output.returncode, -15);
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_hanging_binary_times_out() {
    let err = run_binary(SH, ["-c", "sleep 5"], None, Duration::from_millis(200))
      .await
      .unwrap_err();

    match err {
      LabError::Timeout { path, limit } => {
        assert_eq!(path, Path::new(SH));
        assert_eq!(limit, Duration::from_millis(200));
      }
      other => panic!("expected timeout, got {other}"),
    }
  }

  #[cfg(unix)]
  #[test]
  fn test_ensure_executable_sets_mode() {
    use std::os::unix::fs::PermissionsExt;

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

    ensure_executable(file.path()).unwrap();

    let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
  }

  #[test]
  fn test_output_serializes_as_flat_json() {
    let output = RunOutput {
      stdout: "5 + 7 = 12\n".to_string(),
      stderr: String::new(),
      returncode: 0,
    };
    let json = output.to_json_line().unwrap();
    assert_eq!(json, r#"{"stdout":"5 + 7 = 12\n","stderr":"","returncode":0}"#);
    assert!(!json.contains('\n'));
  }
}
