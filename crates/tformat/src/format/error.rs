//! Error types for pattern compilation and formatting.

use thiserror::Error;

/// A pattern that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `{` was opened and never closed.
    #[error("unmatched braces in pattern")]
    UnmatchedBraces,

    /// The argument index is missing or not an integer.
    #[error("can't parse argument number: '{index}'")]
    InvalidArgumentIndex { index: String },

    /// The argument index is negative.
    #[error("negative argument number: {index}")]
    NegativeArgumentIndex { index: i64 },

    /// The type keyword is not one of number, date, time, choice, range.
    #[error("unknown format type: '{keyword}'")]
    UnknownFormatType { keyword: String },

    #[error("invalid number pattern '{pattern}': {message}")]
    InvalidNumberPattern { pattern: String, message: String },

    #[error("invalid date pattern '{pattern}': {message}")]
    InvalidDatePattern { pattern: String, message: String },

    #[error("invalid choice pattern '{pattern}': {message}")]
    InvalidChoicePattern { pattern: String, message: String },

    #[error("invalid range pattern '{pattern}': {source}")]
    InvalidRangePattern {
        pattern: String,
        #[source]
        source: RangeSyntaxError,
    },
}

/// A range sub-pattern that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeSyntaxError {
    #[error("unmatched braces")]
    UnmatchedBraces,

    #[error("illegal start index: '{index}'")]
    IllegalStartIndex { index: String },

    #[error("illegal end index: '{index}'")]
    IllegalEndIndex { index: String },
}

/// A failure while formatting arguments against a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A range placeholder resolved an element index outside the sequence.
    #[error("index out of range: {index} in sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// A typed placeholder received a value it cannot format.
    #[error("cannot format {found} as {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
