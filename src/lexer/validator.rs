use super::lexer::LexError;
use super::token::Token;

/// Operator placement rules checked after the scan.
pub fn validate(tokens: &[Token]) -> Result<(), LexError> {
    let Some(first) = tokens.first() else {
        return Ok(());
    };
    if let Some(op) = first.as_operator() {
        return Err(LexError::LeadingOperator(op));
    }

    for pair in tokens.windows(2) {
        if let (Some(first), Some(second)) = (pair[0].as_operator(), pair[1].as_operator()) {
            return Err(LexError::AdjacentOperators { first, second });
        }
    }

    match tokens.last().and_then(Token::as_operator) {
        Some(op) if !op.may_terminate_line() => Err(LexError::TrailingOperator(op)),
        _ => Ok(()),
    }
}
