use super::locations::Span;
use super::tokenizer::Token;

/// The token sequence violates the grammar. Carries the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    token: Token,
    message: String,
}

impl SyntaxError {
    pub(crate) fn new(token: Token, msg: &str) -> Self {
        Self {
            token,
            message: msg.to_string(),
        }
    }

    pub(crate) fn expected(token: Token, expected: impl std::fmt::Display) -> Self {
        Self {
            token,
            message: format!("expected {expected}"),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &Span {
        self.token.span()
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, found {} at {}",
            self.message,
            self.token.describe(),
            self.token.span()
        )
    }
}

impl std::error::Error for SyntaxError {}
