use std::io;

use crate::credentials::Credentials;
use crate::credentials::Uid;
use crate::launch::ImageReplacer;
use crate::launch::LaunchRequest;

/// The real process: identity syscalls and `execv` straight from `libc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOps;

impl Credentials for SystemOps {
    fn real_uid(&self) -> Uid {
        Uid::from_raw(unsafe { libc::getuid() })
    }

    fn effective_uid(&self) -> Uid {
        Uid::from_raw(unsafe { libc::geteuid() })
    }

    fn set_real_and_effective_uid(&self, uid: Uid) -> io::Result<()> {
        let ret_code = unsafe { libc::setreuid(uid.as_raw(), uid.as_raw()) };
        if ret_code != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl ImageReplacer for SystemOps {
    fn replace_image(&self, request: &LaunchRequest) -> io::Error {
        // `execv` keeps the current `environ`, so the target sees exactly
        // the environment the launcher was started with.
        unsafe {
            libc::execv(request.c_path().as_ptr(), request.argv_ptr());
        }
        io::Error::last_os_error()
    }
}
