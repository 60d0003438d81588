use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Width of a generated short code, in hex characters.
///
/// Codes are non-overlapping blocks of the SHA-256 hex digest of the
/// original URL, so every valid code is exactly this many lowercase
/// hex characters.
pub const CODE_WIDTH: usize = 7;

/// A validated short code identifier for a shortened URL.
///
/// Short codes are exactly [`CODE_WIDTH`] lowercase hex characters,
/// which also makes them safe to embed in a URL path segment without
/// escaping.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (the digest generator slices the hex digest directly, so its
    /// output is valid by construction).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() != CODE_WIDTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be exactly {}, got {}",
                CODE_WIDTH,
                code.len()
            )));
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only lowercase hex characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("5bd48fa").is_ok());
        assert!(ShortCode::new("0000000").is_ok());
        assert!(ShortCode::new("abcdef0").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(ShortCode::new("").is_err());
        assert!(ShortCode::new("abc").is_err());
        assert!(ShortCode::new("5bd48fa6").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("5bd48fg").is_err());
        assert!(ShortCode::new("5BD48FA").is_err());
        assert!(ShortCode::new("5bdice!").is_err());
    }

    #[test]
    fn display() {
        let code = ShortCode::new("5bd48fa").unwrap();
        assert_eq!(code.to_string(), "5bd48fa");
    }

    #[test]
    fn to_url() {
        let code = ShortCode::new("5bd48fa").unwrap();
        assert_eq!(code.to_url("http://hex.hop"), "http://hex.hop/5bd48fa");
        assert_eq!(code.to_url("http://hex.hop/"), "http://hex.hop/5bd48fa");
    }
}
