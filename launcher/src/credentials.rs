use std::fmt;
#[cfg(unix)]
use std::io;

#[cfg(unix)]
use crate::error::LaunchError;
#[cfg(unix)]
use crate::error::Result;

/// A numeric user ID as the kernel reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid(u32);

impl Uid {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read and write access to the calling process's user IDs.
///
/// The kernel owns this state; implementations are thin wrappers over the
/// identity syscalls so that the launch sequence can be driven by a fake in
/// tests.
#[cfg(unix)]
pub trait Credentials {
    fn real_uid(&self) -> Uid;

    fn effective_uid(&self) -> Uid;

    /// Sets both the real and the effective user ID to `uid`.
    fn set_real_and_effective_uid(&self, uid: Uid) -> io::Result<()>;
}

/// Collapses the real/effective split left by the setuid bit onto `uid`.
///
/// The IDs are read back afterwards: a kernel that reports success but
/// leaves the real UID elsewhere is treated the same as a refusal.
#[cfg(unix)]
pub fn normalize_credentials<C>(credentials: &C, uid: Uid) -> Result<()>
where
    C: Credentials + ?Sized,
{
    credentials
        .set_real_and_effective_uid(uid)
        .map_err(|source| LaunchError::SetUid { uid, source })?;

    let real = credentials.real_uid();
    let effective = credentials.effective_uid();
    if real != uid || effective != uid {
        return Err(LaunchError::UidMismatch {
            real,
            effective,
            expected: uid,
        });
    }
    Ok(())
}
