//! Error types for big number construction and arithmetic

use thiserror::Error;

/// What went wrong while reading numeric text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty input")]
    Empty,
    #[error("no digits")]
    MissingDigits,
    #[error("invalid digit {0:?}")]
    InvalidDigit(char),
    #[error("more than one decimal point")]
    MultipleDecimalPoints,
    #[error("malformed exponent")]
    InvalidExponent,
    #[error("radix {0} is not in 2..=36")]
    InvalidRadix(u32),
    #[error("non-ASCII character")]
    NonAscii,
}

/// Malformed numeric text.
///
/// `position` is the byte offset (or character offset, for UTF-32 input) at
/// which the text stopped matching the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Integer division or remainder with a zero divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("division by zero")]
pub struct DivisionByZero;

/// Either failure, for callers that mix parsing and integer division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZero),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(ParseErrorKind::InvalidDigit('a'), 2);
        assert_eq!(err.to_string(), "invalid digit 'a' at position 2");
        assert_eq!(err.kind(), ParseErrorKind::InvalidDigit('a'));
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn test_numeric_error_from() {
        let err: NumericError = DivisionByZero.into();
        assert_eq!(err.to_string(), "division by zero");

        let err: NumericError = ParseError::new(ParseErrorKind::Empty, 0).into();
        assert!(matches!(err, NumericError::Parse(_)));
    }
}
