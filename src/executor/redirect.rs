use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use nix::unistd::dup2;
use crate::ast::{Redirect, RedirectKind};

/// Opens a redirection target, creating it with mode `rw-r--r--`.
/// `>` truncates, `>>` appends.
pub fn open_target(redirect: &Redirect) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).mode(0o644);
    match redirect.kind {
        RedirectKind::Out => {
            options.write(true).truncate(true);
        }
        RedirectKind::Append => {
            options.append(true);
        }
    }
    options.open(&redirect.target)
}

/// Replaces standard output of the current process with the target.
/// Only called in a forked child right before exec.
pub fn redirect_stdout(redirect: &Redirect) -> io::Result<()> {
    let file = open_target(redirect)?;
    dup2(file.as_raw_fd(), libc::STDOUT_FILENO)?;
    // `file` is closed on drop, the duplicate on fd 1 stays open
    Ok(())
}
