use thiserror::Error;
use crate::executor::ExecError;
use crate::lexer::LexError;
use crate::parser::BuildError;

/// Everything that can abandon a line.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("parse error: {0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Build(#[from] BuildError),
    #[error("{0}")]
    Exec(#[from] ExecError),
}

impl ShellError {
    /// The shell cannot keep running after this error.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::Exec(e) => e.is_fatal(),
            _ => false,
        }
    }
}
