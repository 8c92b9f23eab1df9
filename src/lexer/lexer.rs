use thiserror::Error;
use super::token::{Operator, Token};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("unterminated '\"' (quote) starting at position {0}")]
    UnterminatedQuote(usize),
    #[error("unterminated '|' (pipe) at position {0}")]
    UnterminatedPipe(usize),
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("unexpected operator '{0}' at start of line")]
    LeadingOperator(Operator),
    #[error("unexpected operator '{second}' after '{first}'")]
    AdjacentOperators { first: Operator, second: Operator },
    #[error("line cannot end with operator '{0}'")]
    TrailingOperator(Operator),
    #[error("too many tokens (limit is {0})")]
    TooManyTokens(usize),
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Single-pass scanner producing literal and operator tokens.
///
/// Literals are owned copies of the input; quote characters are dropped and
/// nothing is expanded here.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    // start of the literal currently being scanned
    start: usize,
    max_tokens: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, max_tokens: usize) -> Self {
        Lexer {
            input,
            pos: 0,
            start: 0,
            max_tokens,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.input[self.pos..].chars().next() {
            match ch {
                c if is_blank(c) => {
                    self.flush_literal()?;
                    self.advance_to(self.pos + 1);
                }
                '"' => self.scan_quoted()?,
                _ => match Operator::match_prefix(&self.input[self.pos..]) {
                    Some(op) => self.scan_operator(op)?,
                    None => self.pos += ch.len_utf8(),
                },
            }
        }
        self.flush_literal()?;
        Ok(self.tokens)
    }

    fn scan_quoted(&mut self) -> Result<(), LexError> {
        self.flush_literal()?;
        let open = self.pos;
        let content_start = open + 1;
        let Some(len) = self.input[content_start..].find('"') else {
            return Err(LexError::UnterminatedQuote(open));
        };
        let content_end = content_start + len;
        let text = &self.input[content_start..content_end];
        self.push(Token::word(text, (content_start, content_end)))?;
        // Consume the closing quote
        self.advance_to(content_end + 1);
        Ok(())
    }

    fn scan_operator(&mut self, op: Operator) -> Result<(), LexError> {
        // Text glued to the operator (e.g. the `ls` in `ls&&pwd`) is its own token
        self.flush_literal()?;
        let end = self.pos + op.symbol().len();
        if op == Operator::Pipe && self.input[end..].chars().all(is_blank) {
            return Err(LexError::UnterminatedPipe(self.pos));
        }
        self.push(Token::operator(op, (self.pos, end)))?;
        self.advance_to(end);
        Ok(())
    }

    fn flush_literal(&mut self) -> Result<(), LexError> {
        if self.start < self.pos {
            let span = (self.start, self.pos);
            self.push(Token::word(&self.input[span.0..span.1], span))?;
        }
        self.start = self.pos;
        Ok(())
    }

    fn advance_to(&mut self, pos: usize) {
        self.pos = pos;
        self.start = pos;
    }

    fn push(&mut self, token: Token) -> Result<(), LexError> {
        if self.tokens.len() >= self.max_tokens {
            return Err(LexError::TooManyTokens(self.max_tokens));
        }
        self.tokens.push(token);
        Ok(())
    }
}
