use std::fmt;

/// Control and redirection operators recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,            // &&
    Background,     // &
    Or,             // ||
    Pipe,           // |
    RedirectAppend, // >>
    RedirectOut,    // >
    Sequence,       // ;
}

impl Operator {
    /// Lookup order used while scanning. A longer operator must come before
    /// any operator that is a prefix of it.
    pub const TABLE: [Operator; 7] = [
        Operator::And,
        Operator::Background,
        Operator::Or,
        Operator::Pipe,
        Operator::RedirectAppend,
        Operator::RedirectOut,
        Operator::Sequence,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Background => "&",
            Operator::Or => "||",
            Operator::Pipe => "|",
            Operator::RedirectAppend => ">>",
            Operator::RedirectOut => ">",
            Operator::Sequence => ";",
        }
    }

    /// First operator of the table that `input` starts with.
    pub fn match_prefix(input: &str) -> Option<Operator> {
        Self::TABLE
            .iter()
            .copied()
            .find(|op| input.starts_with(op.symbol()))
    }

    pub fn is_redirect(self) -> bool {
        matches!(self, Operator::RedirectAppend | Operator::RedirectOut)
    }

    /// Only `;` and `&` may end a line.
    pub fn may_terminate_line(self) -> bool {
        matches!(self, Operator::Sequence | Operator::Background)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Word(String),
    Operator(Operator),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: (usize, usize), // Position info [start, end)
}

impl Token {
    pub fn word(text: impl Into<String>, span: (usize, usize)) -> Self {
        Token {
            kind: TokenKind::Word(text.into()),
            span,
        }
    }

    pub fn operator(op: Operator, span: (usize, usize)) -> Self {
        Token {
            kind: TokenKind::Operator(op),
            span,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            TokenKind::Word(_) => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(text) => Some(text),
            TokenKind::Operator(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Word(text) => f.write_str(text),
            TokenKind::Operator(op) => write!(f, "{}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(Operator::match_prefix("&&x"), Some(Operator::And));
        assert_eq!(Operator::match_prefix("&x"), Some(Operator::Background));
        assert_eq!(Operator::match_prefix("||"), Some(Operator::Or));
        assert_eq!(Operator::match_prefix("| x"), Some(Operator::Pipe));
        assert_eq!(Operator::match_prefix(">>f"), Some(Operator::RedirectAppend));
        assert_eq!(Operator::match_prefix(">f"), Some(Operator::RedirectOut));
        assert_eq!(Operator::match_prefix(";"), Some(Operator::Sequence));
        assert_eq!(Operator::match_prefix("ls"), None);
    }

    #[test]
    fn test_table_orders_prefixes_after_longer_operators() {
        for (i, op) in Operator::TABLE.iter().enumerate() {
            for later in &Operator::TABLE[i + 1..] {
                assert!(
                    !later.symbol().starts_with(op.symbol()) || later.symbol() == op.symbol(),
                    "{} shadows {}",
                    op,
                    later
                );
            }
        }
    }
}
