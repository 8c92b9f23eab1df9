use std::ffi::CString;
use std::io::Write;
use std::os::unix::io::AsRawFd;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{dup2, execvp, fork, pipe, ForkResult, Pid};
use tracing::debug;
use super::redirect::redirect_stdout;
use super::ExecError;
use crate::ast::Command;

/// How the foreground process of a pipeline ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited(i32),
    Signaled(Signal),
}

/// Starts one pipe-connected run of commands and waits for it.
pub trait Launcher {
    fn launch(&mut self, pipeline: &[Command]) -> Result<WaitOutcome, ExecError>;
}

/// Runs pipelines as real processes.
///
/// One child is forked per pipeline. That child forks a writer for every
/// command but the last, wiring each writer's stdout to a fresh pipe and its
/// own stdin to the pipe's read end, then execs the last command itself. Only
/// that outer child is waited on.
#[derive(Debug, Default)]
pub struct ForkLauncher;

impl Launcher for ForkLauncher {
    fn launch(&mut self, pipeline: &[Command]) -> Result<WaitOutcome, ExecError> {
        let prepared = pipeline
            .iter()
            .map(PreparedCommand::new)
            .collect::<Result<Vec<_>, _>>()?;

        // Anything still buffered would be written again by the child
        let _ = std::io::stdout().flush();

        // SAFETY: the child only rewires descriptors, forks and execs, or exits.
        match unsafe { fork() }.map_err(ExecError::Fork)? {
            ForkResult::Child => {
                let code = run_pipeline(&prepared);
                std::process::exit(code);
            }
            ForkResult::Parent { child } => {
                debug!(%child, commands = pipeline.len(), "waiting for foreground process");
                wait_foreground(child)
            }
        }
    }
}

fn wait_foreground(child: Pid) -> Result<WaitOutcome, ExecError> {
    loop {
        match waitpid(child, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(WaitOutcome::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, _)) => return Ok(WaitOutcome::Signaled(signal)),
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::Wait(e)),
        }
    }
}

/// A command whose argv is already converted for exec.
struct PreparedCommand<'a> {
    command: &'a Command,
    argv: Vec<CString>,
}

impl<'a> PreparedCommand<'a> {
    fn new(command: &'a Command) -> Result<Self, ExecError> {
        let argv = command
            .argv
            .iter()
            .map(|arg| CString::new(arg.as_str()).map_err(|_| ExecError::InvalidArgument(arg.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PreparedCommand { command, argv })
    }
}

/// Body of the outer child. Returns only when something failed; the value is
/// the exit status for the calling process.
fn run_pipeline(pipeline: &[PreparedCommand]) -> i32 {
    let Some((last, upstream)) = pipeline.split_last() else {
        return 0;
    };

    for cmd in upstream {
        let (read_end, write_end) = match pipe() {
            Ok(fds) => fds,
            Err(e) => return child_failure("pipe", e),
        };

        // SAFETY: same as the outer fork, this process is single-threaded.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                drop(read_end);
                if let Err(e) = dup2(write_end.as_raw_fd(), libc::STDOUT_FILENO) {
                    return child_failure("dup", e);
                }
                drop(write_end);
                return exec_command(cmd);
            }
            Ok(ForkResult::Parent { .. }) => {
                // The reader sees end-of-stream only after every write end is closed
                drop(write_end);
                if let Err(e) = dup2(read_end.as_raw_fd(), libc::STDIN_FILENO) {
                    return child_failure("dup", e);
                }
                drop(read_end);
            }
            Err(e) => return child_failure("fork", e),
        }
    }

    exec_command(last)
}

/// Applies the command's redirection and replaces the process image.
fn exec_command(cmd: &PreparedCommand) -> i32 {
    if let Some(redirect) = &cmd.command.redirect {
        if let Err(e) = redirect_stdout(redirect) {
            eprintln!("scsh: {}: {}", redirect.target, e);
            return 1;
        }
    }

    match execvp(&cmd.argv[0], &cmd.argv) {
        Ok(never) => match never {},
        Err(errno) => {
            eprintln!("scsh: {}: {}", cmd.command.name(), errno.desc());
            if errno == Errno::ENOENT { 127 } else { 126 }
        }
    }
}

fn child_failure(what: &str, errno: Errno) -> i32 {
    eprintln!("scsh: {}: {}", what, errno.desc());
    1
}
