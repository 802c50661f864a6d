//! Error types for the session layer.

/// Errors that can occur during session management.
///
/// Absence conditions (no cookie, unknown token) are deliberately not
/// represented here: the resolver folds them into
/// [`Visitor::Anonymous`](crate::Visitor::Anonymous).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The submitted display name failed validation.
    ///
    /// Carries the rejected candidate so the caller can echo it back
    /// when re-rendering the login form.
    #[error("invalid display name: {0:?}")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display_quotes_candidate() {
        let err = SessionError::InvalidName("Madonna".into());
        assert_eq!(err.to_string(), "invalid display name: \"Madonna\"");
    }
}
