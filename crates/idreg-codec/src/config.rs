//! Codec configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! max_field_len = 32
//! zero_bitmap = "literal"
//! ```
//!
//! Every key is optional; an empty file yields [`CodecConfig::default`].

use crate::supported::ZeroBitmapPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Codec configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Upper bound on a text field's byte length, checked on encode and
    /// decode (unbounded when `None`)
    pub max_field_len: Option<usize>,
    /// Interpretation of a registrar bitmap of `0`
    pub zero_bitmap: ZeroBitmapPolicy,
}

impl CodecConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a text field length limit
    #[inline]
    #[must_use]
    pub fn with_max_field_len(mut self, limit: usize) -> Self {
        self.max_field_len = Some(limit);
        self
    }

    /// With a zero-bitmap policy
    #[inline]
    #[must_use]
    pub fn with_zero_bitmap(mut self, policy: ZeroBitmapPolicy) -> Self {
        self.zero_bitmap = policy;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML or unknown keys
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded codec config");
        Ok(config)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(CodecConfig::from_toml_str("").unwrap(), CodecConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = CodecConfig::from_toml_str(
            "max_field_len = 32\nzero_bitmap = \"literal\"\n",
        )
        .unwrap();
        assert_eq!(
            config,
            CodecConfig::new()
                .with_max_field_len(32)
                .with_zero_bitmap(ZeroBitmapPolicy::Literal)
        );
    }

    #[test]
    fn rejects_unknown_key() {
        let result = CodecConfig::from_toml_str("hash = \"sha256\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CodecConfig::load("/nonexistent/idreg.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/idreg.toml"));
    }
}
