use tracing::debug;
use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{Executor, Flow, ForkLauncher, Launcher};
use crate::lexer;
use crate::parser::{CommandBuilder, Parser};
use crate::state::ShellState;

/// Ties the lexer, builder and executor to one `ShellState`.
pub struct Shell<L: Launcher = ForkLauncher> {
    state: ShellState,
    config: Config,
    executor: Executor<L>,
}

impl Shell<ForkLauncher> {
    pub fn new(config: Config) -> Self {
        Shell::with_launcher(config, ForkLauncher)
    }
}

impl<L: Launcher> Shell<L> {
    pub fn with_launcher(config: Config, launcher: L) -> Self {
        Shell {
            state: ShellState::new(),
            config,
            executor: Executor::new(launcher),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        self.executor.launcher()
    }

    /// Runs one line. Nothing executes unless the whole line lexes and builds.
    pub fn exec_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let tokens = lexer::tokenize_line(line, self.state.last_exit_code, self.config.max_tokens)?;
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        let commands = CommandBuilder::new(&tokens).parse()?;
        debug!(line, commands = commands.len(), "executing line");
        Ok(self.executor.run(&commands, &mut self.state)?)
    }
}
