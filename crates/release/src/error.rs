//! Error types for release descriptions.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for release model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading a release description.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// An artifact or package set is missing a required field or carries a
    /// malformed one.
    #[error("Invalid {field}: {message}")]
    #[diagnostic(
        code(tapsmith::release::invalid_artifact),
        help("Every artifact needs a download URL and a 64-character hex sha256 checksum")
    )]
    InvalidArtifact {
        /// The field that failed validation
        field: String,
        /// The error message
        message: String,
    },

    /// Two artifacts claim overlapping architecture coverage on one platform.
    #[error("Ambiguous architecture coverage: more than one {platform} artifact matches {arch}")]
    #[diagnostic(
        code(tapsmith::release::ambiguous_guard),
        help(
            "Ship at most one archive per platform and architecture, and never mix an 'all' archive with architecture-specific ones"
        )
    )]
    AmbiguousGuard {
        /// The platform with overlapping entries
        platform: String,
        /// The architecture claimed more than once
        arch: String,
    },

    /// Architecture tag outside the known set.
    #[error("Unsupported architecture: {value}")]
    #[diagnostic(
        code(tapsmith::release::unsupported_arch),
        help("Valid architectures: amd64, arm, arm64, all")
    )]
    UnsupportedArch {
        /// The rejected tag
        value: String,
    },

    /// Platform tag outside the known set.
    #[error("Unsupported platform: {value}")]
    #[diagnostic(
        code(tapsmith::release::unsupported_platform),
        help("Valid platforms: macos (or darwin), linux")
    )]
    UnsupportedPlatform {
        /// The rejected tag
        value: String,
    },

    /// A known architecture that has no meaning on the given platform.
    #[error("Unsupported combination: {arch} artifacts are not supported on {platform}")]
    #[diagnostic(code(tapsmith::release::unsupported_combination))]
    UnsupportedCombination {
        /// The platform
        platform: String,
        /// The architecture
        arch: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tapsmith::release::config), help("{help}"))]
    Config {
        /// The error message
        message: String,
        /// Help text for the user
        help: String,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(tapsmith::release::io))]
    Io(#[from] std::io::Error),

    /// Wrapped JSON error.
    #[error("JSON error: {0}")]
    #[diagnostic(code(tapsmith::release::json))]
    Json(#[from] serde_json::Error),

    /// Wrapped TOML parsing error.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(tapsmith::release::toml_parse))]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Create a new invalid artifact error.
    #[must_use]
    pub fn invalid_artifact(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new ambiguous guard error.
    #[must_use]
    pub fn ambiguous_guard(platform: impl Into<String>, arch: impl Into<String>) -> Self {
        Self::AmbiguousGuard {
            platform: platform.into(),
            arch: arch.into(),
        }
    }

    /// Create a new unsupported architecture error.
    #[must_use]
    pub fn unsupported_arch(value: impl Into<String>) -> Self {
        Self::UnsupportedArch {
            value: value.into(),
        }
    }

    /// Create a new unsupported platform error.
    #[must_use]
    pub fn unsupported_platform(value: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            value: value.into(),
        }
    }

    /// Create a new unsupported combination error.
    #[must_use]
    pub fn unsupported_combination(platform: impl Into<String>, arch: impl Into<String>) -> Self {
        Self::UnsupportedCombination {
            platform: platform.into(),
            arch: arch.into(),
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_artifact_error() {
        let err = Error::invalid_artifact("sha256", "must not be empty");
        assert!(err.to_string().contains("Invalid sha256"));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_ambiguous_guard_error() {
        let err = Error::ambiguous_guard("linux", "arm64");
        let msg = err.to_string();
        assert!(msg.contains("Ambiguous"));
        assert!(msg.contains("linux"));
        assert!(msg.contains("arm64"));
    }

    #[test]
    fn test_unsupported_arch_error() {
        let err = Error::unsupported_arch("riscv64");
        assert!(err.to_string().contains("riscv64"));
    }

    #[test]
    fn test_unsupported_platform_error() {
        let err = Error::unsupported_platform("windows");
        assert!(err.to_string().contains("windows"));
    }

    #[test]
    fn test_unsupported_combination_error() {
        let err = Error::unsupported_combination("macos", "arm");
        assert!(err.to_string().contains("arm artifacts are not supported on macos"));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("bad config", "check your settings");
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::unsupported_arch("mips");
        let debug = format!("{err:?}");
        assert!(debug.contains("UnsupportedArch"));
    }
}
