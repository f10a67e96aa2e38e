mod ast;
mod combinators;
mod error;
mod grammar;
mod locations;
pub mod tokenizer;

pub use ast::*;
pub use error::SyntaxError;
pub use grammar::parse_program;
pub use locations::{Location, Span};
