//! Post and comment body validation

use super::ValidationError;

/// Maximum length for post/comment content (64KB)
const MAX_CONTENT_LEN: usize = 65536;

/// Validated post or comment body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    /// Create new content.
    ///
    /// # Rules
    /// - Must not be empty
    /// - Max 64KB (65536 bytes)
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        if s.len() > MAX_CONTENT_LEN {
            return Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_content() {
        assert!(Content::new("Shipping our seed round announcement!").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = Content::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let content_64k = "a".repeat(65536);
        assert!(Content::new(&content_64k).is_ok());

        let content_over = "a".repeat(65537);
        let err = Content::new(&content_over).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 65536, .. }));
    }
}
