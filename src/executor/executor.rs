use tracing::{debug, warn};
use super::builtins::{BuiltinManager, ExecOutcome};
use super::launcher::{Launcher, WaitOutcome};
use super::ExecError;
use crate::ast::{Command, CommandList};
use crate::lexer::Operator;
use crate::state::ShellState;

/// What the caller should do after a line ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

pub struct Executor<L: Launcher> {
    launcher: L,
    builtins: BuiltinManager,
}

impl<L: Launcher> Executor<L> {
    pub fn new(launcher: L) -> Self {
        Executor {
            launcher,
            builtins: BuiltinManager::new(),
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs every command of the list in order, one pipeline at a time.
    ///
    /// Before each pipeline the operator of the preceding command is checked:
    /// after a failed `&&` or a successful `||` nothing else on the line runs.
    pub fn run(&mut self, commands: &CommandList, state: &mut ShellState) -> Result<Flow, ExecError> {
        let mut idx = 0;
        while idx < commands.len() {
            if short_circuits(commands.prev(idx), state.last_exit_code) {
                debug!(skipped = commands.len() - idx, status = state.last_exit_code, "short-circuit");
                break;
            }
            let end = commands.pipeline_end(idx);
            if let Flow::Exit(code) = self.run_pipeline(&commands.as_slice()[idx..end], state)? {
                return Ok(Flow::Exit(code));
            }
            idx = end;
        }
        Ok(Flow::Continue)
    }

    fn run_pipeline(&mut self, pipeline: &[Command], state: &mut ShellState) -> Result<Flow, ExecError> {
        // Builtins must run in this process to affect its state
        if let [cmd] = pipeline {
            if let Some(builtin) = self.builtins.find(cmd.name()) {
                debug!(builtin = builtin.name(), "running builtin");
                match builtin.run(cmd.args(), state) {
                    ExecOutcome::Code(code) => state.last_exit_code = code,
                    ExecOutcome::Exit(code) => return Ok(Flow::Exit(code)),
                }
                return Ok(Flow::Continue);
            }
        }

        match self.launcher.launch(pipeline)? {
            WaitOutcome::Exited(code) => {
                debug!(code, "foreground process exited");
                state.last_exit_code = code;
            }
            WaitOutcome::Signaled(signal) => {
                warn!(%signal, "foreground process killed by signal");
            }
        }
        Ok(Flow::Continue)
    }
}

fn short_circuits(prev: Option<&Command>, last_exit_code: i32) -> bool {
    match prev.and_then(|cmd| cmd.op) {
        Some(Operator::And) => last_exit_code != 0,
        Some(Operator::Or) => last_exit_code == 0,
        _ => false,
    }
}
