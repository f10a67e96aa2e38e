use super::locations::{Location, Span};
use const_format::concatcp;
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Clone, Debug, Default, Derivative)]
#[derivative(PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    #[derivative(PartialEq = "ignore")]
    pub(crate) span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_string(),
            span: Span::default(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Human readable form used in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            TokenKind::Invalid => format!("invalid character '{}'", self.lexeme),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.kind, self.lexeme)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Derivative)]
#[derivative(Default)]
pub enum TokenKind {
    Number,
    Identifier,
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    LeftParen,
    RightParen,
    #[derivative(Default)]
    EndOfInput,
    Invalid,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Self::Number => "a number",
            Self::Identifier => "an identifier",
            Self::Assign => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Multiply => "'*'",
            Self::Divide => "'/'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::EndOfInput => "end of input",
            Self::Invalid => "an invalid character",
        };
        f.write_str(description)
    }
}

const ASSIGN: (&str, TokenKind) = ("=", TokenKind::Assign);
const PLUS: (&str, TokenKind) = ("+", TokenKind::Plus);
const MINUS: (&str, TokenKind) = ("-", TokenKind::Minus);
const MULTIPLY: (&str, TokenKind) = ("*", TokenKind::Multiply);
const DIVIDE: (&str, TokenKind) = ("/", TokenKind::Divide);
const LEFTPAREN: (&str, TokenKind) = ("(", TokenKind::LeftParen);
const RIGHTPAREN: (&str, TokenKind) = (")", TokenKind::RightParen);

const SIMPLE_TOKENS: [(&str, TokenKind); 7] =
    [ASSIGN, PLUS, MINUS, MULTIPLY, DIVIDE, LEFTPAREN, RIGHTPAREN];

const S_DIGIT: &str = r"[0-9]";
const S_LETTER: &str = r"[A-Za-z]";
const S_WHITESPACE: &str = r"^[ \t\n\r\x0B\x0C]+";
const S_NUMBER: &str = concatcp!("^", S_DIGIT, "+");
const S_IDENTIFIER: &str = concatcp!("^", S_LETTER, "(?:", S_LETTER, "|", S_DIGIT, ")*");

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_IDENTIFIER).expect("Error compiling regex."));

/// Line oriented scanner. Feed it lines with [`Tokenizer::tokenize`], then
/// call [`Tokenizer::finalize`] to obtain the token stream.
pub struct Tokenizer {
    tokens: Vec<Token>,
    start: usize,
    lineno: usize,
    end_of_input: Location,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            tokens: vec![],
            start: 0,
            lineno: 0,
            end_of_input: Location { line: 1, column: 1 },
        }
    }

    /// Scans the next lines. Line numbers continue across calls.
    pub fn tokenize<'a>(&mut self, input: impl Iterator<Item = &'a str>) {
        for line in input {
            self.lineno += 1;
            self.tokenize_line(line, self.lineno);
        }
    }

    pub fn finalize(mut self) -> Vec<Token> {
        let Location { line, column } = self.end_of_input;
        self.tokens.push(Token {
            kind: TokenKind::EndOfInput,
            lexeme: "".to_string(),
            span: Span::new(line, column, column),
        });
        self.tokens
    }

    fn tokenize_line(&mut self, line: &str, lineno: usize) {
        self.start = 0;
        while self.start < line.len() {
            let rest = &line[self.start..];
            if let Some(m) = WHITESPACE.find(rest) {
                self.start += m.end();
                continue;
            }
            if self.find_by_regex(&NUMBER, TokenKind::Number, line, lineno) {
                continue;
            }
            if self.find_by_regex(&IDENTIFIER, TokenKind::Identifier, line, lineno) {
                continue;
            }
            if let Some((lexeme, kind)) = SIMPLE_TOKENS
                .iter()
                .find(|(lexeme, _)| rest.starts_with(lexeme))
            {
                self.push(*kind, lexeme, lineno);
                continue;
            }
            // Unknown characters are deferred to the parser.
            let Some(chr) = rest.chars().next() else {
                break;
            };
            let mut buf = [0; 4];
            self.push(TokenKind::Invalid, chr.encode_utf8(&mut buf), lineno);
        }
        self.end_of_input = Location {
            line: lineno,
            column: line.len() + 1,
        };
    }

    fn push(&mut self, kind: TokenKind, lexeme: &str, lineno: usize) {
        let end = self.start + lexeme.len();
        self.tokens.push(Token {
            kind,
            lexeme: lexeme.to_string(),
            span: Span::new(lineno, self.start + 1, end + 1),
        });
        self.start = end;
    }

    fn find_by_regex(&mut self, regex: &Regex, kind: TokenKind, line: &str, lineno: usize) -> bool {
        if let Some(m) = regex.find(&line[self.start..]) {
            self.push(kind, m.as_str(), lineno);
            return true;
        }
        false
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans `source` in full. Never fails: unknown characters become
/// [`TokenKind::Invalid`] tokens and the result always ends with exactly one
/// [`TokenKind::EndOfInput`].
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize(source.lines());
    tokenizer.finalize()
}

pub fn tokenize_file<P>(path: P) -> io::Result<Vec<Token>>
where
    P: AsRef<Path>,
{
    let source = fs::read_to_string(path)?;
    Ok(tokenize(&source))
}
