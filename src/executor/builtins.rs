use std::collections::HashMap;
use std::path::PathBuf;
use crate::expander::env_lookup;
use crate::state::ShellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Code(i32),
    Exit(i32),
}

/// A command run inside the shell process, never forked.
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], state: &mut ShellState) -> ExecOutcome;
}

pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(ExitCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn find(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands.get(name).map(|cmd| &**cmd)
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(&self, args: &[String], state: &mut ShellState) -> ExecOutcome {
        let target = match args.first().map(String::as_str) {
            None => match env_lookup("HOME") {
                Some(home) => PathBuf::from(home),
                None => {
                    eprintln!("cd: no directory provided and no HOME envvar set");
                    return ExecOutcome::Code(1);
                }
            },
            Some("-") => match state.oldpwd() {
                Some(oldpwd) => oldpwd.to_path_buf(),
                None => {
                    eprintln!("cd: OLDPWD not set");
                    return ExecOutcome::Code(1);
                }
            },
            Some(dir) => PathBuf::from(dir),
        };

        match state.change_dir(&target) {
            Ok(()) => ExecOutcome::Code(0),
            Err(e) => {
                eprintln!("cd: {}: {}", target.display(), e);
                ExecOutcome::Code(1)
            }
        }
    }
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn run(&self, _args: &[String], _state: &mut ShellState) -> ExecOutcome {
        ExecOutcome::Exit(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_builtins() {
        let mgr = BuiltinManager::new();
        assert!(mgr.is_builtin("cd"));
        assert!(mgr.is_builtin("exit"));
        assert!(!mgr.is_builtin("ls"));
        assert_eq!(mgr.find("cd").map(|cmd| cmd.name()), Some("cd"));
        assert!(mgr.find("echo").is_none());
    }

    #[test]
    fn test_cd_dash_without_oldpwd_fails() {
        let mut state = ShellState::new();
        let before = state.pwd().to_path_buf();
        let outcome = CdCommand.run(&["-".to_string()], &mut state);
        assert_eq!(outcome, ExecOutcome::Code(1));
        assert_eq!(state.pwd(), before.as_path());
        assert_eq!(state.oldpwd(), None);
    }

    #[test]
    fn test_cd_to_missing_dir_fails() {
        let mut state = ShellState::new();
        let before = state.clone();
        let outcome = CdCommand.run(&["/scsh/surely/missing/dir".to_string()], &mut state);
        assert_eq!(outcome, ExecOutcome::Code(1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_exit_ignores_arguments() {
        let mut state = ShellState::new();
        assert_eq!(ExitCommand.run(&[], &mut state), ExecOutcome::Exit(0));
        assert_eq!(
            ExitCommand.run(&["3".to_string()], &mut state),
            ExecOutcome::Exit(0)
        );
    }
}
