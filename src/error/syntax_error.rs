/// Represents all errors that can occur during tokenizing or parsing.
///
/// Every variant except [`SyntaxError::UnexpectedEndOfInput`] carries the byte
/// offset in the source where the problem was found.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A quoted string literal was opened but never closed.
    #[error("Error at {position}: Unterminated string literal.")]
    UnterminatedString {
        /// Offset of the opening quote.
        position: usize,
    },
    /// Found a token that does not fit the grammar at this point.
    #[error("Error at {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of the token encountered.
        found:    String,
        /// Description of what the grammar required.
        expected: String,
        /// Offset of the offending token.
        position: usize,
    },
    /// Reached the end of input while a token was still required.
    #[error("Unexpected end of input: expected {expected}.")]
    UnexpectedEndOfInput {
        /// Description of what the grammar required.
        expected: String,
    },
    /// Found extra tokens after a complete expression.
    #[error("Error at {position}: Extra tokens after expression, starting with {token}.")]
    UnexpectedTrailingTokens {
        /// Description of the first extra token.
        token:    String,
        /// Offset of the first extra token.
        position: usize,
    },
    /// The left side of an assignment is not an identifier or member chain.
    #[error("Error at {position}: Only identifiers and member paths can be assigned to.")]
    InvalidAssignmentTarget {
        /// Offset of the assignment target.
        position: usize,
    },
    /// The expression nests deeper than the parser allows.
    #[error("Error at {position}: Expression is nested too deeply.")]
    NestingTooDeep {
        /// Offset of the token that opened one level too many.
        position: usize,
    },
}

impl SyntaxError {
    /// Returns the source offset of the error, if it has one.
    ///
    /// ## Example
    /// ```
    /// use showif::error::SyntaxError;
    ///
    /// let err = SyntaxError::UnterminatedString { position: 7 };
    /// assert_eq!(err.position(), Some(7));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::UnterminatedString { position }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::InvalidAssignmentTarget { position }
            | Self::NestingTooDeep { position } => Some(*position),
            Self::UnexpectedEndOfInput { .. } => None,
        }
    }
}
