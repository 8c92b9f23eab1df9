use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Process-wide shell state, owned by the top-level shell process.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    pub last_exit_code: i32,
    pwd: PathBuf,
    oldpwd: Option<PathBuf>,
}

impl ShellState {
    pub fn new() -> Self {
        let pwd = std::env::current_dir()
            .or_else(|_| std::env::var("PWD").map(PathBuf::from))
            .unwrap_or_default();
        ShellState {
            last_exit_code: 0,
            pwd,
            oldpwd: None,
        }
    }

    pub fn pwd(&self) -> &Path {
        &self.pwd
    }

    pub fn oldpwd(&self) -> Option<&Path> {
        self.oldpwd.as_deref()
    }

    /// Changes the working directory of the process and exports the new
    /// `PWD`/`OLDPWD` pair. On failure the state is left untouched.
    pub fn change_dir(&mut self, target: &Path) -> io::Result<()> {
        std::env::set_current_dir(target)?;
        let new_pwd = std::env::current_dir()?;
        let previous = std::mem::replace(&mut self.pwd, new_pwd);
        debug!(from = %previous.display(), to = %self.pwd.display(), "changed directory");
        // SAFETY: the shell never spawns threads, so nothing reads the
        // environment concurrently.
        unsafe {
            std::env::set_var("OLDPWD", &previous);
            std::env::set_var("PWD", &self.pwd);
        }
        self.oldpwd = Some(previous);
        Ok(())
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
