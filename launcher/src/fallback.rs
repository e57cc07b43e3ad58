//! Launch path for platforms without `execv`.
//!
//! The target runs as a child under a new PID and the launcher exits with
//! its status. There is no setuid bit to undo here, so no credential step
//! runs. Argument 0 cannot be forwarded: the child sees the target path.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use crate::error::LaunchError;
use crate::error::Result;

/// Exit status used when the child ended without reporting one.
const NO_EXIT_STATUS_EXIT_CODE: i32 = 1;

/// Spawns `target` with `args[1..]`, waits, and returns the exit status to
/// report.
pub fn run_as_child(target: &Path, args: Vec<OsString>) -> Result<i32> {
    tracing::debug!(
        program = %target.display(),
        argc = args.len(),
        "spawning target as a child process"
    );
    let status = Command::new(target)
        .args(args.into_iter().skip(1))
        .status()
        .map_err(|source| LaunchError::Exec {
            path: Arc::from(target),
            source,
        })?;
    Ok(status.code().unwrap_or(NO_EXIT_STATUS_EXIT_CODE))
}
