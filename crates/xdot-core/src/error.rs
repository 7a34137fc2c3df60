pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input does not follow the grammar it was expected to follow. `offset` is the byte
    /// offset in the input at which the problem was detected.
    #[error("Malformed input at byte {offset}: {reason}")]
    MalformedInput { offset: usize, reason: Malformed },
}

impl Error {
    pub fn malformed(offset: usize, reason: Malformed) -> Self {
        Self::MalformedInput { offset, reason }
    }

    pub fn offset(&self) -> usize {
        match self {
            Self::MalformedInput { offset, .. } => *offset,
        }
    }

    pub fn reason(&self) -> &Malformed {
        match self {
            Self::MalformedInput { reason, .. } => reason,
        }
    }

    pub fn is_unknown_directive(&self) -> bool {
        matches!(self.reason(), Malformed::UnknownDirective(_))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Malformed {
    #[error("unknown directive `{0}`")]
    UnknownDirective(char),

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected}, found `{found}`")]
    Expected {
        expected: &'static str,
        found: String,
    },

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("invalid count {0}")]
    InvalidCount(i64),

    #[error("string length does not end on a character boundary")]
    InvalidUtf8Boundary,

    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}
