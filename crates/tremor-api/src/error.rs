//! Error types for the session client.
//!
//! Only transport failures and pages that do not have the expected shape are
//! errors. A rejected login or an action the site refused is reported as a
//! value (`bool` or [`ActionOutcome`](crate::types::ActionOutcome)).

/// All errors that can occur while talking to the site.
#[derive(thiserror::Error, Debug)]
pub enum TremorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Page structure not found: {0}")]
    StructureNotFound(&'static str),

    #[error("Pattern {pattern} did not match {input:?}")]
    PatternMismatch { pattern: &'static str, input: String },

    #[error("Date {input:?} does not match format {format:?}")]
    InvalidDate { input: String, format: &'static str },

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

impl TremorError {
    /// True when the page was fetched but did not look the way it should.
    ///
    /// This is what an expired session usually looks like on the read
    /// endpoints, since the site serves the public page instead.
    pub fn is_structure_error(&self) -> bool {
        matches!(
            self,
            Self::StructureNotFound(_) | Self::PatternMismatch { .. }
        )
    }
}

pub type TremorResult<T> = Result<T, TremorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_error_classification() {
        assert!(TremorError::StructureNotFound("inbox table").is_structure_error());
        assert!(TremorError::PatternMismatch {
            pattern: "x",
            input: "y".into()
        }
        .is_structure_error());
        assert!(!TremorError::InvalidNumber("abc".into()).is_structure_error());
    }

    #[test]
    fn test_display_names_missing_element() {
        let err = TremorError::StructureNotFound("referral table");
        assert_eq!(err.to_string(), "Page structure not found: referral table");
    }
}
