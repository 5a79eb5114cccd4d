//! Parser error types
//!
//! Parsing never fails outright. These errors come back as warnings next to
//! whatever could be extracted, and the caller keeps the raw text.

use thiserror::Error;

/// Parser error type
#[derive(Debug, Error)]
pub enum ParserError {
    /// Front-matter block could not be parsed as YAML
    #[error("Error parsing YAML frontmatter: {0}")]
    FrontmatterError(String),

    /// Front-matter parsed, but not into a key/value mapping
    #[error("Frontmatter is not a mapping (found {0})")]
    FrontmatterShape(&'static str),
}

impl ParserError {
    /// Create a frontmatter error
    pub fn frontmatter(msg: impl Into<String>) -> Self {
        Self::FrontmatterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParserError::frontmatter("invalid syntax");
        assert_eq!(err.to_string(), "Error parsing YAML frontmatter: invalid syntax");

        let err = ParserError::FrontmatterShape("sequence");
        assert_eq!(err.to_string(), "Frontmatter is not a mapping (found sequence)");
    }
}
