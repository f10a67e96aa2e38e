use super::ast::MAX_DEPTH;
use super::error::SyntaxError;
use super::tokenizer::{Token, TokenKind};

/// Outcome of a single parser. `Err` lets an enclosing alternative or
/// repetition try something else; `Failure` is committed and aborts the
/// whole parse.
#[derive(Debug)]
pub enum ParseResult<'a, Output> {
    Ok((Output, ParserInput<'a>)),
    Err(SyntaxError),
    Failure(SyntaxError),
}

/// Remaining tokens and the number of open parentheses. Reading past the
/// end yields an implicit end of input.
#[derive(Debug, Clone, Copy)]
pub struct ParserInput<'a> {
    tokens: &'a [Token],
    nesting: usize,
}

impl<'a> ParserInput<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, nesting: 0 }
    }

    pub(super) fn peek(&self) -> Token {
        self.tokens.first().cloned().unwrap_or_default()
    }

    /// One level deeper, or `None` once `MAX_DEPTH` levels are open.
    pub(super) fn nested(&self) -> Option<Self> {
        (self.nesting < MAX_DEPTH).then(|| Self {
            nesting: self.nesting + 1,
            ..*self
        })
    }

    pub(super) fn unnested(&self) -> Self {
        Self {
            nesting: self.nesting.saturating_sub(1),
            ..*self
        }
    }

    pub(super) fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    fn advance(&self) -> Self {
        Self {
            tokens: self.tokens.get(1..).unwrap_or(&[]),
            ..*self
        }
    }
}

impl<'a, T> ParseResult<'a, T> {
    pub(super) fn or_else<O>(self, op: O) -> Self
    where
        O: FnOnce() -> Self,
    {
        match self {
            Self::Err(_) => op(),
            other => other,
        }
    }
    pub(super) fn map<U, F>(self, op: F) -> ParseResult<'a, U>
    where
        F: FnOnce((T, ParserInput<'a>)) -> (U, ParserInput<'a>),
    {
        match self {
            Self::Ok(inner) => ParseResult::Ok(op(inner)),
            Self::Err(e) => ParseResult::Err(e),
            Self::Failure(e) => ParseResult::Failure(e),
        }
    }
    pub(super) fn and_then<U, F>(self, op: F) -> ParseResult<'a, U>
    where
        F: FnOnce((T, ParserInput<'a>)) -> ParseResult<'a, U>,
    {
        match self {
            Self::Ok(inner) => op(inner),
            Self::Err(e) => ParseResult::Err(e),
            Self::Failure(e) => ParseResult::Failure(e),
        }
    }
    pub(super) fn into_result(self) -> Result<(T, ParserInput<'a>), SyntaxError> {
        match self {
            Self::Ok(inner) => Ok(inner),
            Self::Err(e) | Self::Failure(e) => Err(e),
        }
    }
}

pub(super) trait Parser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output>;
    fn map<F, MappedOutput>(self, map_fn: F) -> BoxedParser<'a, MappedOutput>
    where
        Self: Sized + 'a,
        Output: 'a,
        MappedOutput: 'a,
        F: Fn(Output) -> MappedOutput + 'a,
    {
        BoxedParser::new(map(self, map_fn))
    }
    fn or(self, parser: impl Parser<'a, Output> + 'a) -> BoxedParser<'a, Output>
    where
        Self: Sized + 'a,
        Output: 'a,
    {
        let alternative =
            move |input: ParserInput<'a>| self.parse(input).or_else(|| parser.parse(input));
        BoxedParser::new(alternative)
    }
}

impl<'a, F, Output> Parser<'a, Output> for F
where
    F: Fn(ParserInput<'a>) -> ParseResult<'a, Output>,
{
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self(input)
    }
}

pub(super) struct BoxedParser<'a, Output> {
    parser: Box<dyn Parser<'a, Output> + 'a>,
}

impl<'a, Output> BoxedParser<'a, Output> {
    pub(super) fn new(parser: impl Parser<'a, Output> + 'a) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }
}

impl<'a, Output> Parser<'a, Output> for BoxedParser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self.parser.parse(input)
    }
}

pub(super) fn pair<'a, R1, R2>(
    parser1: impl Parser<'a, R1>,
    parser2: impl Parser<'a, R2>,
) -> impl Parser<'a, (R1, R2)> {
    move |input: ParserInput<'a>| {
        parser1.parse(input).and_then(|(result1, next_input)| {
            parser2
                .parse(next_input)
                .map(|(result2, rest)| ((result1, result2), rest))
        })
    }
}

pub(super) fn map<'a, F, A, B>(
    parser: impl Parser<'a, A>,
    map_fn: F,
) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, B>
where
    F: Fn(A) -> B,
{
    move |input: ParserInput<'a>| {
        parser
            .parse(input)
            .map(|(result, rest)| (map_fn(result), rest))
    }
}

pub(super) fn left<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, A> {
    map(pair(left_parser, right_parser), |(left, _right)| left)
}

pub(super) fn right<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, B> {
    map(pair(left_parser, right_parser), |(_left, right)| right)
}

/// Repeats `parser` until it fails recoverably. A committed failure inside
/// the repetition is propagated.
pub(super) fn zero_or_more<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, Vec<R>> {
    move |input: ParserInput<'a>| {
        let mut result = Vec::new();
        let mut tmp_input = input;
        loop {
            match parser.parse(tmp_input) {
                ParseResult::Ok((next, rest)) => {
                    tmp_input = rest;
                    result.push(next);
                }
                ParseResult::Err(_) => return ParseResult::Ok((result, tmp_input)),
                ParseResult::Failure(e) => return ParseResult::Failure(e),
            }
        }
    }
}

/// Commits to `parser`: a recoverable error becomes a failure.
pub(super) fn cut<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, R> {
    move |input: ParserInput<'a>| match parser.parse(input) {
        ParseResult::Err(e) => ParseResult::Failure(e),
        other => other,
    }
}

pub(super) fn tok<'a>(expected: TokenKind) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, Token> {
    move |input: ParserInput<'a>| {
        let token = input.peek();
        if token.kind == expected {
            ParseResult::Ok((token, input.advance()))
        } else {
            ParseResult::Err(SyntaxError::expected(token, expected))
        }
    }
}

/// Always fails, reporting the current token.
pub(super) fn unexpected<'a, R>(
    expected: &'static str,
) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, R> {
    move |input: ParserInput<'a>| ParseResult::Err(SyntaxError::expected(input.peek(), expected))
}
