use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use assert_cmd::Command;
use predicates::str::contains;
use predicates::str::starts_with;
use pretty_assertions::assert_eq;
use suid_launcher::EXEC_FAILED_EXIT_CODE;
use suid_launcher::TARGET_PATH;

const LAUNCHER_EXE: &str = env!("CARGO_BIN_EXE_suid-launcher");
const TIMEOUT: Duration = Duration::from_secs(30);

fn launcher() -> Command {
    let mut command = Command::new(LAUNCHER_EXE);
    command.env_remove("RUST_LOG").timeout(TIMEOUT);
    command
}

#[cfg(unix)]
#[test]
fn target_path_is_absolute() {
    assert!(
        Path::new(TARGET_PATH).is_absolute(),
        "compiled-in target {TARGET_PATH:?} must be absolute"
    );
}

/// With the target installed, the launcher must be indistinguishable from
/// running the target directly under the same argument vector.
#[cfg(unix)]
#[test]
fn launcher_behaves_like_target() -> Result<()> {
    use std::os::unix::process::CommandExt;

    if !Path::new(TARGET_PATH).exists() {
        return missing_target_exits_with_exec_failure();
    }

    let via_launcher = launcher().arg("-V").output()?;

    let mut direct = std::process::Command::new(TARGET_PATH);
    direct.arg0(LAUNCHER_EXE).arg("-V").env_remove("RUST_LOG");
    let direct = Command::from_std(direct).timeout(TIMEOUT).output()?;

    assert_eq!(via_launcher.status, direct.status);
    assert_eq!(
        String::from_utf8_lossy(&via_launcher.stdout),
        String::from_utf8_lossy(&direct.stdout)
    );
    assert_eq!(
        String::from_utf8_lossy(&via_launcher.stderr),
        String::from_utf8_lossy(&direct.stderr)
    );
    Ok(())
}

#[cfg(not(unix))]
#[test]
fn launcher_behaves_like_target() -> Result<()> {
    if !Path::new(TARGET_PATH).exists() {
        return missing_target_exits_with_exec_failure();
    }
    launcher().arg("-V").assert().code(
        std::process::Command::new(TARGET_PATH)
            .arg("-V")
            .status()?
            .code()
            .unwrap_or(1),
    );
    Ok(())
}

fn missing_target_exits_with_exec_failure() -> Result<()> {
    launcher()
        .args(["--flag", "value"])
        .assert()
        .failure()
        .code(EXEC_FAILED_EXIT_CODE)
        .stdout("")
        .stderr(starts_with("ERROR: failed to exec "))
        .stderr(contains(TARGET_PATH));
    Ok(())
}
