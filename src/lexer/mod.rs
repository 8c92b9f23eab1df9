mod lexer;
mod token;
mod validator;

pub use lexer::{LexError, Lexer};
pub use token::{Operator, Token, TokenKind};
pub use validator::validate;

use tracing::debug;
use crate::expander;

/// Scans `line`, expands variables against `last_exit_code` and the process
/// environment, then checks operator placement.
pub fn tokenize_line(line: &str, last_exit_code: i32, max_tokens: usize) -> Result<Vec<Token>, LexError> {
    let mut tokens = Lexer::new(line, max_tokens).tokenize()?;
    expander::expand(&mut tokens, last_exit_code, expander::env_lookup)?;
    validate(&tokens)?;
    debug!(count = tokens.len(), "tokenized line");
    Ok(tokens)
}
