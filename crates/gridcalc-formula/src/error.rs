//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing a formula
///
/// These never escape evaluation: a formula that fails to parse evaluates to
/// [`Value::Invalid`](gridcalc_core::Value::Invalid). The error is kept so
/// callers can explain why.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// Expression text did not start with '='
    #[error("Formula must start with '='")]
    MissingPrefix,

    /// Input ended where a factor was expected
    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    /// A character that cannot start a factor
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// A token that is neither a cell reference nor a number
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// '(' without a matching ')'
    #[error("Unclosed parenthesis opened at position {position}")]
    UnclosedParenthesis { position: usize },

    /// Parentheses nested deeper than the parser accepts
    #[error("Parentheses nested more than {limit} deep at position {position}")]
    NestingTooDeep { position: usize, limit: usize },

    /// A complete expression followed by unparsed input
    #[error("Unexpected characters after expression at position {position}: '{rest}'")]
    TrailingInput { position: usize, rest: String },
}
