/// Crate-wide result type for directive processing.
pub type Result<T> = std::result::Result<T, DirectiveError>;

/// Why a directive could not be applied.
///
/// Every variant is reported back to the requester verbatim through its
/// `Display` text; none of them touch the history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// The directive body has fewer than two `/` delimiters.
    #[error("Too few '/'s.")]
    TooFewDelimiters,

    /// The pattern is not a valid regular expression.
    #[error("{0}")]
    InvalidPattern(String),

    /// `y///` sets with different character counts.
    #[error("Translations have different lengths")]
    LengthMismatch,

    /// Nothing in the history matches.
    #[error("No match found.")]
    NoMatchFound,
}

impl From<regex::Error> for DirectiveError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}
