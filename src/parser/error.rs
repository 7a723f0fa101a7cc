use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not in this parser's format; try the next one.
    #[error("line does not match the listing format")]
    NoMatch,

    /// The line matched but its date or time does not name a real moment.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl ParseError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    pub(crate) fn invalid_timestamp(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
