//! Key validation and dotted-path splitting

use crate::error::LookupError;

/// Separator between the levels of a nested key
pub const KEY_SEPARATOR: &str = ".";

/// A validated lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKey<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> ConfigKey<'a> {
    /// Validate `raw` and split it into path segments
    pub fn parse(raw: &'a str) -> Result<Self, LookupError> {
        validate_key(raw)?;
        Ok(Self {
            raw,
            segments: raw.split(KEY_SEPARATOR).collect(),
        })
    }

    /// The key as the caller wrote it
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Whether the key addresses a value inside a mapping
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Error for a key that resolved to nothing
    pub fn not_found(&self) -> LookupError {
        LookupError::NotFound(self.raw.to_string())
    }
}

/// Reject the empty key
pub fn validate_key(key: &str) -> Result<(), LookupError> {
    if key.is_empty() {
        return Err(LookupError::EmptyKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(ConfigKey::parse(""), Err(LookupError::EmptyKey));
        assert_eq!(validate_key(""), Err(LookupError::EmptyKey));
    }

    #[test]
    fn test_flat_key() {
        let key = ConfigKey::parse("testStr").unwrap();
        assert_eq!(key.as_str(), "testStr");
        assert_eq!(key.segments(), &["testStr"]);
        assert!(!key.is_nested());
    }

    #[test]
    fn test_dotted_key() {
        let key = ConfigKey::parse("location.Country/City").unwrap();
        assert_eq!(key.segments(), &["location", "Country/City"]);
        assert!(key.is_nested());
    }

    #[test]
    fn test_not_found_carries_raw_key() {
        let key = ConfigKey::parse("a.b").unwrap();
        assert_eq!(key.not_found(), LookupError::NotFound("a.b".to_string()));
    }
}
