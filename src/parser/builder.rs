use tracing::debug;
use crate::ast::{Command, CommandList, Redirect, RedirectKind};
use crate::lexer::{Operator, Token, TokenKind};
use crate::parser::{BuildError, Parser};

/// Groups a flat token stream into commands split at control operators.
pub struct CommandBuilder<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_target(&mut self, op: Operator) -> Result<String, BuildError> {
        match self.next().and_then(Token::as_word) {
            Some(target) => Ok(target.to_string()),
            None => Err(BuildError::MissingRedirectTarget(op)),
        }
    }

    /// Builds one command, stopping after its control operator.
    fn build_command(&mut self) -> Result<Command, BuildError> {
        match self.peek() {
            None => return Err(BuildError::Empty),
            Some(tok) => {
                if let Some(op) = tok.as_operator() {
                    return Err(BuildError::OperatorAtCommandStart(op));
                }
            }
        }

        let mut argv = Vec::new();
        let mut redirect = None;
        while let Some(tok) = self.next() {
            match &tok.kind {
                TokenKind::Word(word) => argv.push(word.clone()),
                TokenKind::Operator(op) if op.is_redirect() => {
                    let target = self.expect_target(*op)?;
                    let kind = match op {
                        Operator::RedirectAppend => RedirectKind::Append,
                        _ => RedirectKind::Out,
                    };
                    redirect = Some(Redirect { kind, target });
                }
                TokenKind::Operator(op) => {
                    return Ok(Command {
                        argv,
                        op: Some(*op),
                        redirect,
                    });
                }
            }
        }
        Ok(Command {
            argv,
            op: None,
            redirect,
        })
    }
}

impl<'a> Parser for CommandBuilder<'a> {
    fn parse(&mut self) -> Result<CommandList, BuildError> {
        let mut commands = vec![self.build_command()?];
        while self.peek().is_some() {
            commands.push(self.build_command()?);
        }
        debug!(count = commands.len(), "built commands");
        CommandList::new(commands).ok_or(BuildError::Empty)
    }
}
