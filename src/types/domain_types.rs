// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use crate::constants::NOTION_WEB_BASE_URL;
use std::fmt;
use url::Url;

/// API key for Notion API authentication.
///
/// The token is opaque; only blank values are refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if key.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "{}...", prefix)
    }
}

/// A link target that is safe to put in an `href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    /// Create a new validated URL
    ///
    /// Root-relative paths such as `/0f1e2d...`, which Notion uses for
    /// links between workspace pages, resolve against the Notion web root.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let trimmed = url.trim();
        let parsed = if is_root_relative(trimmed) {
            Url::parse(NOTION_WEB_BASE_URL).and_then(|base| base.join(trimmed))
        } else {
            Url::parse(trimmed)
        };

        match parsed {
            Ok(parsed_url) => {
                if !matches!(parsed_url.scheme(), "http" | "https" | "mailto") {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: format!("scheme '{}' is not allowed", parsed_url.scheme()),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// `//host` and `/\host` are scheme-relative, not root-relative.
fn is_root_relative(url: &str) -> bool {
    let mut chars = url.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/') | Some('\\'))
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
