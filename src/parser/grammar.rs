// Grammar, one function per rule:
//
// program    : statement* ENDOFINPUT
// statement  : assignment
// assignment : expression ['=' expression]
// expression : term (('+' | '-') term)*
// term       : factor (('*' | '/') factor)*
// factor     : NUMBER | IDENTIFIER | '(' expression ')'
//
// Statements carry no separator: a statement ends where no '=', operator or
// parenthesized group continues it.
//
// Trees deeper than MAX_DEPTH, and parentheses nested deeper than MAX_DEPTH,
// are rejected on the token that crosses the limit.

use super::ast::*;
use super::combinators::*;
use super::error::SyntaxError;
use super::tokenizer::{Token, TokenKind as TK};

/// Parses statements until the lookahead is the end of input.
pub fn parse_program(tokens: &[Token]) -> Result<Vec<Node>, SyntaxError> {
    let mut input = ParserInput::new(tokens);
    let mut statements = vec![];
    while !input.at_end() {
        let (node, rest) = statement(input).into_result()?;
        statements.push(node);
        input = rest;
    }
    Ok(statements)
}

fn statement(input: ParserInput) -> ParseResult<Node> {
    assignment(input)
}

// The left hand side is parsed as an ordinary expression and reinterpreted
// as a target once '=' shows up. Only a bare variable is a valid target.
fn assignment(input: ParserInput) -> ParseResult<Node> {
    expression(input).and_then(|(target, rest)| match tok(TK::Assign)(rest) {
        ParseResult::Ok((equals, rest)) => match target {
            Node::Variable(name) => cut(expression).parse(rest).and_then(|(value, rest)| {
                if value.depth() >= MAX_DEPTH {
                    return ParseResult::Failure(too_deep(equals));
                }
                ParseResult::Ok((Node::Assignment(name, Box::new(value)), rest))
            }),
            _ => ParseResult::Failure(SyntaxError::new(equals, "cannot assign to expression")),
        },
        _ => ParseResult::Ok((target, rest)),
    })
}

fn expression(input: ParserInput) -> ParseResult<Node> {
    pair(term, zero_or_more(pair(additive_operator, cut(term))))
        .parse(input)
        .and_then(|((first, tail), rest)| fold_left(first, tail, rest))
}

fn term(input: ParserInput) -> ParseResult<Node> {
    pair(factor, zero_or_more(pair(multiplicative_operator, cut(factor))))
        .parse(input)
        .and_then(|((first, tail), rest)| fold_left(first, tail, rest))
}

fn factor(input: ParserInput) -> ParseResult<Node> {
    BoxedParser::new(number)
        .or(variable)
        .or(group)
        .or(unexpected("an expression"))
        .parse(input)
}

fn number(input: ParserInput) -> ParseResult<Node> {
    tok(TK::Number)(input).and_then(|(token, rest)| match token.lexeme.parse() {
        Ok(value) => ParseResult::Ok((Node::Number(value), rest)),
        Err(_) => ParseResult::Failure(SyntaxError::new(token, "integer literal out of range")),
    })
}

fn variable(input: ParserInput) -> ParseResult<Node> {
    map(tok(TK::Identifier), |token: Token| Node::Variable(token.lexeme)).parse(input)
}

fn group(input: ParserInput) -> ParseResult<Node> {
    tok(TK::LeftParen)(input).and_then(|(paren, rest)| match rest.nested() {
        Some(inner) => cut(left(expression, tok(TK::RightParen)))
            .parse(inner)
            .map(|(node, rest)| (node, rest.unnested())),
        None => ParseResult::Failure(too_deep(paren)),
    })
}

fn additive_operator(input: ParserInput) -> ParseResult<(Operator, Token)> {
    tok(TK::Plus)
        .map(|token| (Operator::Plus, token))
        .or(tok(TK::Minus).map(|token| (Operator::Minus, token)))
        .parse(input)
}

fn multiplicative_operator(input: ParserInput) -> ParseResult<(Operator, Token)> {
    tok(TK::Multiply)
        .map(|token| (Operator::Times, token))
        .or(tok(TK::Divide).map(|token| (Operator::Divide, token)))
        .parse(input)
}

// Builds the left-deep tree of an operator chain, failing on the operator
// whose node would be deeper than MAX_DEPTH.
fn fold_left<'a>(
    first: Node,
    tail: Vec<((Operator, Token), Node)>,
    rest: ParserInput<'a>,
) -> ParseResult<'a, Node> {
    let mut depth = first.depth();
    let mut node = first;
    for ((op, token), right) in tail {
        depth = depth.max(right.depth()) + 1;
        if depth > MAX_DEPTH {
            return ParseResult::Failure(too_deep(token));
        }
        node = Node::binary(op, node, right);
    }
    ParseResult::Ok((node, rest))
}

fn too_deep(token: Token) -> SyntaxError {
    SyntaxError::new(token, "expression nested too deeply")
}
