use std::convert::Infallible;
use std::ffi::CString;
use std::ffi::OsString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::ffi::OsStringExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::credentials::Credentials;
use crate::credentials::normalize_credentials;
use crate::error::LaunchError;
use crate::error::Result;

/// A target path and argument vector in the shape `execv(2)` wants.
///
/// Every allocation happens in [`LaunchRequest::new`]. [`launch`] issues only
/// syscalls, and on failure its error shares `path` instead of copying it, so
/// it stays usable between `fork` and `exec`.
#[derive(Debug)]
pub struct LaunchRequest {
    path: Arc<Path>,
    c_path: CString,
    args: Vec<CString>,
    /// Pointers into `args`, followed by a terminating null.
    argv: Vec<*const libc::c_char>,
}

// SAFETY: `argv` only points into the heap buffers owned by `args`, which are
// never mutated or dropped before `argv`. Moving the `Vec`s does not move
// those buffers.
unsafe impl Send for LaunchRequest {}
unsafe impl Sync for LaunchRequest {}

impl LaunchRequest {
    /// Prepares `args` (argument 0 included) for exec of `path`.
    ///
    /// Arguments are taken as raw bytes; non-UTF-8 values pass through
    /// untouched.
    pub fn new<I, S>(path: impl Into<PathBuf>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let path = path.into();
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|source| {
            LaunchError::NulByte {
                what: format!("target path {}", path.display()),
                source,
            }
        })?;

        let args = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| {
                CString::new(arg.into().into_vec()).map_err(|source| LaunchError::NulByte {
                    what: format!("argument {index}"),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut argv: Vec<*const libc::c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
        argv.push(std::ptr::null());

        Ok(Self {
            path: Arc::from(path),
            c_path,
            args,
            argv,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn c_path(&self) -> &CString {
        &self.c_path
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }

    /// Null-terminated pointer array suitable for `execv`.
    pub fn argv_ptr(&self) -> *const *const libc::c_char {
        self.argv.as_ptr()
    }
}

/// Replaces the current process image.
pub trait ImageReplacer {
    /// Only returns if the exec failed; the returned error is why.
    fn replace_image(&self, request: &LaunchRequest) -> io::Error;
}

/// Everything the launch sequence needs from the operating system.
pub trait LaunchOps: Credentials + ImageReplacer {}

impl<T> LaunchOps for T where T: Credentials + ImageReplacer + ?Sized {}

/// Normalizes credentials onto the effective UID, then execs the target.
///
/// The steps run strictly in order and a failure ends the sequence: the
/// exec is never attempted with unnormalized credentials. On success this
/// does not return.
pub fn launch<O>(ops: &O, request: &LaunchRequest) -> Result<Infallible>
where
    O: LaunchOps + ?Sized,
{
    let euid = ops.effective_uid();
    normalize_credentials(ops, euid)?;
    let source = ops.replace_image(request);
    Err(LaunchError::Exec {
        path: Arc::clone(&request.path),
        source,
    })
}

/// Builds the request for `target` and launches it, with logging around the
/// steps that may allocate.
pub fn run<O>(ops: &O, target: &Path, args: Vec<OsString>) -> Result<Infallible>
where
    O: LaunchOps + ?Sized,
{
    let request = LaunchRequest::new(target, args)?;
    tracing::debug!(
        program = %request.path().display(),
        argc = request.args().len(),
        real_uid = %ops.real_uid(),
        effective_uid = %ops.effective_uid(),
        "normalizing credentials before exec"
    );
    let result = launch(ops, &request);
    if let Err(err) = &result {
        tracing::debug!(exit_code = err.exit_code(), "launch failed: {err}");
    }
    result
}
