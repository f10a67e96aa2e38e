mod error;
mod interpreter;
mod parser;

pub use error::Error;
pub use interpreter::{evaluate, Environment, Interpreter, Value};
pub use parser::tokenizer::{tokenize, tokenize_file, Token, TokenKind, Tokenizer};
pub use parser::{parse_program, Location, Node, Operator, Span, SyntaxError, MAX_DEPTH};

/// Runs `program` in a fresh session and returns the final bindings.
pub fn execute(program: &str) -> Result<Environment, Error> {
    let mut interpreter = Interpreter::new();
    interpreter.run(program)?;
    Ok(interpreter.into_environment())
}
