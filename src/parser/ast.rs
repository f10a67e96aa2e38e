use crate::interpreter::Value;

/// Deepest tree, and deepest parenthesis nesting, the parser builds and the
/// evaluator accepts.
pub const MAX_DEPTH: usize = 128;

/// One statement's syntax tree. Every node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Number(Value),
    Variable(String),
    BinaryOperation(Operator, Box<(Node, Node)>),
    Assignment(String, Box<Node>),
}

impl Node {
    pub fn binary(op: Operator, left: Node, right: Node) -> Self {
        Self::BinaryOperation(op, Box::new((left, right)))
    }

    pub fn assign(target: &str, value: Node) -> Self {
        Self::Assignment(target.to_string(), Box::new(value))
    }

    pub fn variable(name: &str) -> Self {
        Self::Variable(name.to_string())
    }

    /// Number of nodes on the longest root-to-leaf path. Walks the tree with
    /// an explicit stack, so any depth can be measured.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            match node {
                Self::Number(_) | Self::Variable(_) => {}
                Self::BinaryOperation(_, operands) => {
                    pending.push((&operands.0, depth + 1));
                    pending.push((&operands.1, depth + 1));
                }
                Self::Assignment(_, value) => pending.push((value.as_ref(), depth + 1)),
            }
        }
        deepest
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::BinaryOperation(op, operands) => {
                let (left, right) = operands.as_ref();
                write!(f, "({left} {op} {right})")
            }
            Self::Assignment(target, value) => write!(f, "{target} = {value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
        };
        f.write_str(symbol)
    }
}
