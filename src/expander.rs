use tracing::trace;
use crate::lexer::{LexError, Token, TokenKind};

/// Reads a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Replaces every literal token that starts with `$`.
///
/// `$?` becomes `last_exit_code` in decimal, `$NAME` becomes the value that
/// `lookup` returns for `NAME`. A name without a value fails the whole line.
/// Operator tokens are never touched, so an expanded value that looks like an
/// operator stays a plain word.
pub fn expand<F>(tokens: &mut [Token], last_exit_code: i32, lookup: F) -> Result<(), LexError>
where
    F: Fn(&str) -> Option<String>,
{
    for token in tokens.iter_mut() {
        let TokenKind::Word(text) = &mut token.kind else {
            continue;
        };
        let Some(name) = text.strip_prefix('$') else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let value = if name == "?" {
            last_exit_code.to_string()
        } else {
            lookup(name).ok_or_else(|| LexError::UnknownVariable(text.clone()))?
        };
        trace!(variable = %text, %value, "expanded");
        *text = value;
    }
    Ok(())
}
