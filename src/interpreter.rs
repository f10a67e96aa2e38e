use std::collections::HashMap;

use crate::error::Error;
use crate::parser::tokenizer::tokenize;
use crate::parser::{parse_program, Node, Operator, MAX_DEPTH};

pub type Value = i32;

/// Variable bindings of one evaluation session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unassigned variables read as 0.
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).unwrap_or_default()
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.variables.get(name).copied()
    }

    pub fn assign(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn sorted(&self) -> Vec<(&str, Value)> {
        let mut bindings: Vec<_> = self.iter().collect();
        bindings.sort_by_key(|(name, _)| *name);
        bindings
    }
}

/// Evaluates one statement tree. Trees deeper than [`MAX_DEPTH`] are
/// rejected before any node runs.
pub fn evaluate(node: &Node, env: &mut Environment) -> Result<Value, Error> {
    if node.depth() > MAX_DEPTH {
        return Err(Error::Evaluation(format!(
            "expression nested deeper than {MAX_DEPTH} levels"
        )));
    }
    eval(node, env)
}

fn eval(node: &Node, env: &mut Environment) -> Result<Value, Error> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Variable(name) => Ok(env.get(name)),
        Node::BinaryOperation(op, operands) => {
            let (left, right) = operands.as_ref();
            let lhs = eval(left, env)?;
            let rhs = eval(right, env)?;
            apply(*op, lhs, rhs)
        }
        Node::Assignment(target, value) => {
            let value = eval(value, env)?;
            env.assign(target, value);
            Ok(value)
        }
    }
}

fn apply(op: Operator, lhs: Value, rhs: Value) -> Result<Value, Error> {
    match op {
        Operator::Plus => Ok(lhs.wrapping_add(rhs)),
        Operator::Minus => Ok(lhs.wrapping_sub(rhs)),
        Operator::Times => Ok(lhs.wrapping_mul(rhs)),
        Operator::Divide => {
            if rhs == 0 {
                Err(Error::DivisionByZero)
            } else {
                Ok(lhs.wrapping_div(rhs))
            }
        }
    }
}

/// An evaluation session: statements run in order against one environment
/// that survives between calls.
#[derive(Debug, Default)]
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans and parses all of `source` before evaluating anything. Returns
    /// the value of every statement; stops at the first failing statement,
    /// keeping the assignments made before it.
    pub fn run(&mut self, source: &str) -> Result<Vec<Value>, Error> {
        let tokens = tokenize(source);
        let statements = parse_program(&tokens)?;
        self.execute(&statements)
    }

    pub fn execute(&mut self, statements: &[Node]) -> Result<Vec<Value>, Error> {
        statements
            .iter()
            .map(|statement| evaluate(statement, &mut self.environment))
            .collect()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: Value) -> Node {
        Node::Number(value)
    }

    #[test]
    fn test_evaluate_number() {
        let mut env = Environment::new();
        assert_eq!(evaluate(&num(42), &mut env), Ok(42));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        let mut env = Environment::new();
        let cases = [
            (Operator::Plus, 2, 3, 5),
            (Operator::Minus, 10, 3, 7),
            (Operator::Times, 4, 5, 20),
            (Operator::Divide, 20, 4, 5),
        ];
        for (op, lhs, rhs, expected) in cases {
            let node = Node::binary(op, num(lhs), num(rhs));
            assert_eq!(evaluate(&node, &mut env), Ok(expected), "{node}");
        }
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let mut env = Environment::new();
        let node = Node::binary(
            Operator::Divide,
            Node::binary(Operator::Minus, num(0), num(7)),
            num(2),
        );
        assert_eq!(evaluate(&node, &mut env), Ok(-3));
        assert_eq!(
            evaluate(&Node::binary(Operator::Divide, num(7), num(2)), &mut env),
            Ok(3)
        );
    }

    #[test]
    fn test_division_by_zero() {
        let mut env = Environment::new();
        let node = Node::assign("c", Node::binary(Operator::Divide, num(1), num(0)));
        assert_eq!(evaluate(&node, &mut env), Err(Error::DivisionByZero));
        assert_eq!(env.lookup("c"), None);
    }

    #[test]
    fn test_unassigned_variable_reads_zero() {
        let mut env = Environment::new();
        assert_eq!(evaluate(&Node::variable("y"), &mut env), Ok(0));
        assert!(env.is_empty());
    }

    #[test]
    fn test_assignment_returns_and_overwrites() {
        let mut env = Environment::new();
        assert_eq!(evaluate(&Node::assign("x", num(1)), &mut env), Ok(1));
        assert_eq!(evaluate(&Node::assign("x", num(2)), &mut env), Ok(2));
        assert_eq!(env.lookup("x"), Some(2));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_operands_evaluate_left_to_right() {
        // (b = 3) / b only sees the assignment if the left side runs first.
        let mut env = Environment::new();
        let node = Node::binary(
            Operator::Divide,
            Node::assign("b", num(3)),
            Node::variable("b"),
        );
        assert_eq!(evaluate(&node, &mut env), Ok(1));

        let mut env = Environment::new();
        let node = Node::binary(
            Operator::Minus,
            Node::variable("a"),
            Node::assign("a", num(5)),
        );
        assert_eq!(evaluate(&node, &mut env), Ok(-5));
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let node = Node::binary(
            Operator::Plus,
            Node::variable("a"),
            Node::binary(Operator::Times, num(2), num(3)),
        );
        let mut start = Environment::new();
        start.assign("a", 5);
        let mut first = start.clone();
        let mut second = start.clone();
        assert_eq!(evaluate(&node, &mut first), Ok(11));
        assert_eq!(evaluate(&node, &mut second), Ok(11));
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflow_wraps() {
        let mut env = Environment::new();
        let node = Node::binary(Operator::Plus, num(Value::MAX), num(1));
        assert_eq!(evaluate(&node, &mut env), Ok(Value::MIN));
        let node = Node::binary(
            Operator::Divide,
            Node::binary(Operator::Minus, num(Value::MIN), num(0)),
            Node::binary(Operator::Minus, num(0), num(1)),
        );
        assert_eq!(evaluate(&node, &mut env), Ok(Value::MIN));
    }

    #[test]
    fn test_session_keeps_environment() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.run("a = 5"), Ok(vec![5]));
        assert_eq!(interp.run("b = a * 2 a = b"), Ok(vec![10, 10]));
        assert_eq!(interp.environment().lookup("a"), Some(10));
    }

    #[test]
    fn test_session_stops_at_first_error() {
        let mut interp = Interpreter::new();
        let result = interp.run("a = 1 c = a / 0 d = 4");
        assert_eq!(result, Err(Error::DivisionByZero));
        let env = interp.into_environment();
        assert_eq!(env.lookup("a"), Some(1));
        assert_eq!(env.lookup("c"), None);
        assert_eq!(env.lookup("d"), None);
    }

    #[test]
    fn test_tree_deeper_than_limit_is_rejected() {
        let mut node = num(1);
        for _ in 1..MAX_DEPTH {
            node = Node::binary(Operator::Plus, node, num(1));
        }
        assert_eq!(node.depth(), MAX_DEPTH);
        let mut env = Environment::new();
        assert_eq!(evaluate(&node, &mut env), Ok(MAX_DEPTH as Value));

        let node = Node::assign("x", node);
        let err = evaluate(&node, &mut env).unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)), "{err:?}");
        assert_eq!(
            err.to_string(),
            format!("evaluation error: expression nested deeper than {MAX_DEPTH} levels")
        );
        assert_eq!(env.lookup("x"), None);
    }

    #[test]
    fn test_sorted_bindings() {
        let mut env = Environment::new();
        env.assign("b", 2);
        env.assign("a", 1);
        env.assign("c", 3);
        assert_eq!(env.sorted(), vec![("a", 1), ("b", 2), ("c", 3)]);
    }
}
