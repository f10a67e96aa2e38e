use crate::parser::SyntaxError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("arithmetic error: division by zero")]
    DivisionByZero,
    /// Tree the evaluator refuses to walk. Every node kind is handled, so the
    /// only source is a tree deeper than [`crate::parser::MAX_DEPTH`].
    #[error("evaluation error: {0}")]
    Evaluation(String),
}
