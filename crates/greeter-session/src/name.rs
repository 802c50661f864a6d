//! Display-name validation.
//!
//! Visitors identify themselves with a free-text name. The only rule is
//! shape: a first name and a last name, nothing more, nothing less.
//!
//! ```text
//! "Jane Doe"          accepted
//! "Mary O'Brien"      accepted  (apostrophe inside a token)
//! "Anna Smith-Jones"  accepted  (hyphen inside a token)
//! "Madonna"           rejected  (one token)
//! "Mary Jane Watson"  rejected  (three tokens)
//! "J4ne Doe"          rejected  (digit)
//! ```

use std::fmt;

use crate::SessionError;

/// Longest candidate (in characters) the validator will look at.
pub const MAX_NAME_LEN: usize = 128;

/// A display name that passed [`validate_name`].
///
/// Stored in its normalized form: the two name tokens joined by a single
/// space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validates `candidate` and returns its normalized form.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidName`] if the candidate is not a
    /// first-and-last name.
    pub fn parse(candidate: &str) -> Result<Self, SessionError> {
        if candidate.chars().count() > MAX_NAME_LEN {
            return Err(SessionError::InvalidName(candidate.to_string()));
        }

        let mut parts = candidate.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(last), None)
                if is_name_token(first) && is_name_token(last) =>
            {
                Ok(Self(format!("{first} {last}")))
            }
            _ => Err(SessionError::InvalidName(candidate.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` if `candidate` is an acceptable display name.
///
/// Validation never touches the registry.
pub fn validate_name(candidate: &str) -> bool {
    DisplayName::parse(candidate).is_ok()
}

/// A single name token: letters, optionally joined by single `-` or `'`.
///
/// The token must begin and end with a letter, and separators may not
/// be adjacent to each other.
fn is_name_token(token: &str) -> bool {
    let mut prev_was_letter = false;

    for c in token.chars() {
        if c.is_alphabetic() {
            prev_was_letter = true;
        } else if matches!(c, '-' | '\'') && prev_was_letter {
            prev_was_letter = false;
        } else {
            return false;
        }
    }

    // Empty tokens and trailing separators both leave this false.
    prev_was_letter
}
