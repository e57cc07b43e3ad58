use std::env;
use std::env::VarError;

/// Build-time knob naming the program the launcher execs.
const TARGET_ENV: &str = "SUID_LAUNCHER_TARGET";
const DEFAULT_TARGET: &str = "/usr/bin/ssh";

fn main() {
    println!("cargo:rerun-if-env-changed={TARGET_ENV}");

    let target = match env::var(TARGET_ENV) {
        Ok(value) => value,
        Err(VarError::NotPresent) => DEFAULT_TARGET.to_string(),
        Err(VarError::NotUnicode(value)) => {
            panic!("{TARGET_ENV} must be valid UTF-8, got {value:?}");
        }
    };

    let target_family = env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    if let Err(err) = validate_target(&target, target_family == "unix") {
        panic!("invalid {TARGET_ENV}={target:?}: {err}");
    }

    println!("cargo:rustc-env={TARGET_ENV}={target}");
}

fn validate_target(target: &str, unix: bool) -> Result<(), String> {
    if target.is_empty() {
        return Err("target path is empty".to_string());
    }
    if target.contains(['\0', '\n']) {
        return Err("target path contains a NUL byte or newline".to_string());
    }
    // A relative path would be resolved against the invoker's working
    // directory, which the invoker controls.
    if unix && !target.starts_with('/') {
        return Err("target path must be absolute".to_string());
    }
    Ok(())
}
