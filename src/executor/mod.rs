mod executor;
mod builtins;
mod launcher;
mod redirect;

use thiserror::Error;

pub use executor::{Executor, Flow};
pub use builtins::{BuiltinCommand, BuiltinManager, ExecOutcome};
pub use launcher::{ForkLauncher, Launcher, WaitOutcome};
pub use redirect::open_target;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("argument contains a NUL byte: {0:?}")]
    InvalidArgument(String),
    #[error("fork: {0}")]
    Fork(#[source] nix::Error),
    #[error("wait: {0}")]
    Wait(#[source] nix::Error),
}

impl ExecError {
    /// Process creation failed in the shell itself; there is no way to go on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExecError::Fork(_) | ExecError::Wait(_))
    }
}
