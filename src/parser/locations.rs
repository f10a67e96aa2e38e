#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Source range of a token. Tokens synthesized past the end of the input
/// have no position.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub enum Span {
    #[default]
    Indetermined,
    Determined { start: Location, end: Location },
}

impl Span {
    pub(crate) fn new(line: usize, start_col: usize, end_col: usize) -> Self {
        Self::Determined {
            start: Location {
                line,
                column: start_col,
            },
            end: Location {
                line,
                column: end_col,
            },
        }
    }

    pub fn start(&self) -> Option<Location> {
        match self {
            Self::Determined { start, .. } => Some(*start),
            Self::Indetermined => None,
        }
    }

    pub fn end(&self) -> Option<Location> {
        match self {
            Self::Determined { end, .. } => Some(*end),
            Self::Indetermined => None,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Determined { start, .. } => write!(f, "{start}"),
            Self::Indetermined => write!(f, "unknown location"),
        }
    }
}
