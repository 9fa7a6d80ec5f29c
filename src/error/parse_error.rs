/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the 1-based column where the problem was detected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found a token that cannot appear at this position.
    #[error("invalid syntax: unexpected {token} at column {column}")]
    UnexpectedToken {
        /// The token encountered, as displayed to the user.
        token:  String,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Reached the end of input while an expression was still incomplete.
    #[error("invalid syntax: unexpected end of input at column {column}")]
    UnexpectedEndOfInput {
        /// The source column where the error occurred.
        column: usize,
    },
    /// A closing bracket was expected but something else was found.
    #[error("invalid syntax: expected '{expected}' at column {column}")]
    ExpectedClosing {
        /// The closing delimiter that was expected.
        expected: char,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("invalid syntax: unexpected {token} after expression at column {column}")]
    TrailingTokens {
        /// The first extra token.
        token:  String,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The input is empty or contains only whitespace and comments.
    #[error("invalid syntax: empty expression")]
    EmptyInput,
    /// The lexer could not turn part of the input into a token.
    #[error("invalid syntax: {detail} '{token}' at column {column}")]
    InvalidToken {
        /// The offending text.
        token:  String,
        /// Why the text is not a valid token.
        detail: &'static str,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("integer literal too large at column {column}")]
    LiteralTooLarge {
        /// The source column where the error occurred.
        column: usize,
    },
    /// The expression nests brackets or operators too deeply.
    #[error("expression nests too deeply at column {column}")]
    TooDeep {
        /// The source column where the limit was hit.
        column: usize,
    },
}

impl ParseError {
    /// Gets the column from `self`, if the error refers to one.
    /// ## Example
    /// ```
    /// use reckon::error::ParseError;
    ///
    /// let error = ParseError::UnexpectedEndOfInput { column: 4 };
    ///
    /// assert_eq!(error.column(), Some(4));
    /// assert_eq!(ParseError::EmptyInput.column(), None);
    /// ```
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { column, .. }
            | Self::UnexpectedEndOfInput { column }
            | Self::ExpectedClosing { column, .. }
            | Self::TrailingTokens { column, .. }
            | Self::InvalidToken { column, .. }
            | Self::LiteralTooLarge { column }
            | Self::TooDeep { column } => Some(*column),
            Self::EmptyInput => None,
        }
    }
}
