//! A setuid launcher that collapses the real user ID onto the effective one
//! and then execs a fixed, build-time configured program with the caller's
//! argument vector and environment untouched.

mod credentials;
mod error;
#[cfg(not(unix))]
mod fallback;
#[cfg(unix)]
mod launch;
#[cfg(unix)]
mod system;

use std::path::Path;

use tracing_subscriber::EnvFilter;

pub use credentials::Uid;
#[cfg(unix)]
pub use credentials::Credentials;
#[cfg(unix)]
pub use credentials::normalize_credentials;
pub use error::EXEC_FAILED_EXIT_CODE;
pub use error::LaunchError;
pub use error::NUL_BYTE_EXIT_CODE;
pub use error::Result;
pub use error::SET_UID_FAILED_EXIT_CODE;
pub use error::UID_MISMATCH_EXIT_CODE;
#[cfg(not(unix))]
pub use fallback::run_as_child;
#[cfg(unix)]
pub use launch::ImageReplacer;
#[cfg(unix)]
pub use launch::LaunchOps;
#[cfg(unix)]
pub use launch::LaunchRequest;
#[cfg(unix)]
pub use launch::launch;
#[cfg(unix)]
pub use launch::run;
#[cfg(unix)]
pub use system::SystemOps;

/// Absolute path of the program this launcher execs, fixed at build time via
/// `SUID_LAUNCHER_TARGET`.
pub const TARGET_PATH: &str = env!("SUID_LAUNCHER_TARGET");

/// Entry point for the `suid-launcher` binary. Never returns.
///
/// On success the process image is replaced by [`TARGET_PATH`]. On failure
/// an `ERROR:` line goes to stderr and the process exits with the failing
/// step's code.
#[cfg(unix)]
pub fn run_main() -> ! {
    init_logging();

    let args = std::env::args_os().collect();
    let Err(err) = run(&SystemOps, Path::new(TARGET_PATH), args);
    eprintln!("ERROR: {err}");
    std::process::exit(err.exit_code());
}

/// Entry point for the `suid-launcher` binary. Never returns.
#[cfg(not(unix))]
pub fn run_main() -> ! {
    init_logging();

    let args = std::env::args_os().collect();
    match run_as_child(Path::new(TARGET_PATH), args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

/// Diagnostics go to stderr and stay silent unless `RUST_LOG` asks for them.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
