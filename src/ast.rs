use std::fmt;
use crate::lexer::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Out,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub target: String,
}

/// One executable unit of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Program arguments; `argv[0]` is the program name.
    pub argv: Vec<String>,
    /// Operator following this command, `None` for the last one.
    pub op: Option<Operator>,
    pub redirect: Option<Redirect>,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn pipes_into_next(&self) -> bool {
        self.op == Some(Operator::Pipe)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))?;
        if let Some(redirect) = &self.redirect {
            let symbol = match redirect.kind {
                RedirectKind::Out => ">",
                RedirectKind::Append => ">>",
            };
            write!(f, " {} {}", symbol, redirect.target)?;
        }
        if let Some(op) = self.op {
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}

/// Ordered, never empty sequence of commands built from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    /// Returns `None` for an empty vector.
    pub fn new(commands: Vec<Command>) -> Option<Self> {
        if commands.is_empty() {
            None
        } else {
            Some(CommandList { commands })
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Command> {
        self.commands.get(idx)
    }

    /// The command before `idx`, used for short-circuit lookback.
    pub fn prev(&self, idx: usize) -> Option<&Command> {
        idx.checked_sub(1).and_then(|i| self.commands.get(i))
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    /// Index one past the end of the pipe-connected run starting at `start`.
    pub fn pipeline_end(&self, start: usize) -> usize {
        let mut end = start;
        while end + 1 < self.commands.len() && self.commands[end].pipes_into_next() {
            end += 1;
        }
        end + 1
    }
}
