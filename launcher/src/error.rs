use std::ffi::NulError;
use std::io;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::credentials::Uid;

pub type Result<T> = std::result::Result<T, LaunchError>;

/// Exit status when the kernel refuses `setreuid`.
pub const SET_UID_FAILED_EXIT_CODE: i32 = 5;

/// Exit status when the real and effective UIDs still differ after `setreuid`.
pub const UID_MISMATCH_EXIT_CODE: i32 = 6;

/// Exit status when the target could not be exec'd (or spawned).
pub const EXEC_FAILED_EXIT_CODE: i32 = 7;

/// Exit status when the target path or an argument cannot become a C string.
pub const NUL_BYTE_EXIT_CODE: i32 = 8;

/// Every way the launcher can stop before the target program takes over.
///
/// None of these are retried: the launcher fails closed.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("setreuid({uid}, {uid}) failed: {source}")]
    SetUid {
        uid: Uid,
        #[source]
        source: io::Error,
    },

    #[error(
        "credentials not normalized: real uid {real}, effective uid {effective}, expected {expected}"
    )]
    UidMismatch {
        real: Uid,
        effective: Uid,
        expected: Uid,
    },

    #[error("failed to exec {}: {source}", path.display())]
    Exec {
        path: Arc<Path>,
        #[source]
        source: io::Error,
    },

    #[error("{what} contains an interior NUL byte")]
    NulByte {
        what: String,
        #[source]
        source: NulError,
    },
}

impl LaunchError {
    /// The process exit status reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::SetUid { .. } => SET_UID_FAILED_EXIT_CODE,
            LaunchError::UidMismatch { .. } => UID_MISMATCH_EXIT_CODE,
            LaunchError::Exec { .. } => EXEC_FAILED_EXIT_CODE,
            LaunchError::NulByte { .. } => NUL_BYTE_EXIT_CODE,
        }
    }

    /// The errno behind this failure, if the kernel reported one.
    ///
    /// Does not allocate, so it can carry the failure out of a forked child.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            LaunchError::SetUid { source, .. } | LaunchError::Exec { source, .. } => {
                source.raw_os_error()
            }
            LaunchError::UidMismatch { .. } | LaunchError::NulByte { .. } => None,
        }
    }
}

impl From<LaunchError> for io::Error {
    fn from(err: LaunchError) -> Self {
        match err {
            LaunchError::SetUid { source, .. } | LaunchError::Exec { source, .. } => source,
            LaunchError::NulByte { source, .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, source)
            }
            other @ LaunchError::UidMismatch { .. } => {
                io::Error::new(io::ErrorKind::PermissionDenied, other)
            }
        }
    }
}
