//! Release artifacts as seen by manifest generators.
//!
//! This module handles:
//! - Platform and architecture tags
//! - Checksum validation
//! - Optional HTTP fetch parameters for a download URL
//! - Validated artifact construction

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Operating system an artifact installs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    /// macOS (darwin)
    MacOs,
    /// Linux
    Linux,
}

impl Platform {
    /// Returns the canonical tag for this platform.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }

    /// Returns the Ruby DSL block that scopes stanzas to this platform.
    #[must_use]
    pub const fn dsl_block(&self) -> &'static str {
        match self {
            Self::MacOs => "on_macos",
            Self::Linux => "on_linux",
        }
    }

    /// Returns all supported platforms, in manifest emission order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::MacOs, Self::Linux]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            _ => Err(Error::unsupported_platform(s)),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.as_str().to_string()
    }
}

/// CPU architecture an artifact was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Arch {
    /// 64-bit Intel/AMD
    Amd64,
    /// 32-bit ARM
    Arm,
    /// 64-bit ARM (aarch64, Apple Silicon)
    Arm64,
    /// Architecture-independent (e.g. macOS universal binaries)
    All,
}

impl Arch {
    /// Returns the tag used in release descriptions.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "amd64" => Ok(Self::Amd64),
            "arm" => Ok(Self::Arm),
            "arm64" => Ok(Self::Arm64),
            "all" => Ok(Self::All),
            _ => Err(Error::unsupported_arch(s)),
        }
    }
}

impl TryFrom<String> for Arch {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Arch> for String {
    fn from(value: Arch) -> Self {
        value.as_str().to_string()
    }
}

/// A SHA256 checksum: exactly 64 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sha256(String);

impl Sha256 {
    /// Validates and wraps a checksum string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArtifact`] if the value is not 64 hex characters.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::invalid_artifact("sha256", "checksum must not be empty"));
        }
        if value.len() != 64 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid_artifact(
                "sha256",
                format!("expected 64 hexadecimal characters, got '{value}'"),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the checksum as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Sha256 {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Sha256> for String {
    fn from(value: Sha256) -> Self {
        value.0
    }
}

/// Optional HTTP fetch customization for a download URL.
///
/// Every field is independently optional. Empty strings, maps and lists are
/// treated as absent by renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrlParams {
    /// Domain that the download URL is verified against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<String>,
    /// Download strategy, emitted unquoted (e.g. `:post` or a strategy class).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    /// Cookies sent with the request.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,
    /// Referer header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// Raw request headers, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
    /// User agent (a string or a symbol such as `:fake`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Form data for POST downloads.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl UrlParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the verified domain.
    #[must_use]
    pub fn with_verified(mut self, verified: impl Into<String>) -> Self {
        self.verified = Some(verified.into());
        self
    }

    /// Sets the download strategy.
    #[must_use]
    pub fn with_using(mut self, using: impl Into<String>) -> Self {
        self.using = Some(using.into());
        self
    }

    /// Adds a cookie.
    #[must_use]
    pub fn with_cookie(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(key.into(), value.into());
        self
    }

    /// Sets the referer.
    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a form data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Returns true when no field would be emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank(self.verified.as_deref())
            && is_blank(self.using.as_deref())
            && self.cookies.is_empty()
            && is_blank(self.referer.as_deref())
            && self.headers.is_empty()
            && is_blank(self.user_agent.as_deref())
            && self.data.is_empty()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Download location of an artifact with its fetch parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrl {
    /// The URL to download from.
    pub download: String,
    /// Extra fetch parameters.
    #[serde(default, skip_serializing_if = "UrlParams::is_empty")]
    pub additional_params: UrlParams,
}

impl DownloadUrl {
    /// Creates a download URL without extra parameters.
    #[must_use]
    pub fn new(download: impl Into<String>) -> Self {
        Self {
            download: download.into(),
            additional_params: UrlParams::default(),
        }
    }

    /// Attaches fetch parameters.
    #[must_use]
    pub fn with_params(mut self, params: UrlParams) -> Self {
        self.additional_params = params;
        self
    }
}

/// Unvalidated artifact shape as it appears in release description files.
///
/// Platform, architecture and checksum stay plain strings here so that
/// converting into an [`Artifact`] reports the precise validation error
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSpec {
    /// Platform tag (`macos`, `darwin` or `linux`).
    pub platform: String,
    /// Architecture tag (`amd64`, `arm`, `arm64` or `all`).
    pub arch: String,
    /// Where to fetch the artifact from.
    pub url: DownloadUrl,
    /// Checksum of the downloaded file.
    pub sha256: String,
    /// Formula install steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install: Vec<String>,
    /// Cask symlink target for the contained binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_target: Option<String>,
}

/// One downloadable release unit for one platform and architecture.
///
/// Fields are only reachable through accessors so a constructed artifact
/// always carries a non-empty URL and a valid checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArtifactSpec", rename_all = "camelCase")]
pub struct Artifact {
    platform: Platform,
    arch: Arch,
    url: DownloadUrl,
    sha256: Sha256,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    install: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    binary_target: Option<String>,
}

impl Artifact {
    /// Creates a validated artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArtifact`] if the download URL is empty or the
    /// checksum is not a 64-character hex string.
    pub fn new(
        platform: Platform,
        arch: Arch,
        url: DownloadUrl,
        sha256: impl Into<String>,
    ) -> Result<Self> {
        check_url(platform, arch, &url)?;
        Ok(Self {
            platform,
            arch,
            url,
            sha256: Sha256::new(sha256)?,
            install: Vec::new(),
            binary_target: None,
        })
    }

    /// Platform this artifact installs on.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Architecture this artifact was built for.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }

    /// Where to fetch the artifact from.
    #[must_use]
    pub const fn url(&self) -> &DownloadUrl {
        &self.url
    }

    /// Checksum of the downloaded file.
    #[must_use]
    pub const fn sha256(&self) -> &Sha256 {
        &self.sha256
    }

    /// Formula install steps, emitted verbatim in order.
    #[must_use]
    pub fn install(&self) -> &[String] {
        &self.install
    }

    /// Cask symlink target for the contained binary.
    #[must_use]
    pub fn binary_target(&self) -> Option<&str> {
        self.binary_target.as_deref()
    }

    /// Replaces the fetch parameters of the download URL.
    #[must_use]
    pub fn with_params(mut self, params: UrlParams) -> Self {
        self.url.additional_params = params;
        self
    }

    /// Sets the formula install steps.
    #[must_use]
    pub fn with_install<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.install = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cask binary symlink target.
    #[must_use]
    pub fn with_binary_target(mut self, target: impl Into<String>) -> Self {
        self.binary_target = Some(target.into());
        self
    }
}

fn check_url(platform: Platform, arch: Arch, url: &DownloadUrl) -> Result<()> {
    if url.download.trim().is_empty() {
        return Err(Error::invalid_artifact(
            "url",
            format!("{platform}/{arch} artifact has no download URL"),
        ));
    }
    Ok(())
}

impl TryFrom<ArtifactSpec> for Artifact {
    type Error = Error;

    fn try_from(spec: ArtifactSpec) -> Result<Self> {
        let platform: Platform = spec.platform.parse()?;
        let arch: Arch = spec.arch.parse()?;
        let artifact = Self::new(platform, arch, spec.url, spec.sha256)?.with_install(spec.install);
        Ok(match spec.binary_target {
            Some(target) if !target.is_empty() => artifact.with_binary_target(target),
            _ => artifact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_arch_from_str() {
        assert_eq!(Arch::from_str("amd64").unwrap(), Arch::Amd64);
        assert_eq!(Arch::from_str("arm").unwrap(), Arch::Arm);
        assert_eq!(Arch::from_str("arm64").unwrap(), Arch::Arm64);
        assert_eq!(Arch::from_str("all").unwrap(), Arch::All);
    }

    #[test]
    fn test_arch_rejects_unknown() {
        let err = Arch::from_str("x86_64").unwrap_err();
        assert!(matches!(err, Error::UnsupportedArch { .. }));
    }

    #[test]
    fn test_platform_accepts_darwin_alias() {
        assert_eq!(Platform::from_str("darwin").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_str("macos").unwrap(), Platform::MacOs);
        assert!(Platform::from_str("windows").is_err());
    }

    #[test]
    fn test_platform_dsl_block() {
        assert_eq!(Platform::MacOs.dsl_block(), "on_macos");
        assert_eq!(Platform::Linux.dsl_block(), "on_linux");
    }

    #[test]
    fn test_sha256_validation() {
        assert!(Sha256::new(SHA).is_ok());
        assert!(Sha256::new("").is_err());
        assert!(Sha256::new("abc123").is_err());
        assert!(Sha256::new("z".repeat(64)).is_err());
    }

    #[test]
    fn test_artifact_requires_url() {
        let err = Artifact::new(Platform::Linux, Arch::Amd64, DownloadUrl::new("  "), SHA)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid url"));
    }

    #[test]
    fn test_artifact_requires_checksum() {
        let err = Artifact::new(
            Platform::Linux,
            Arch::Amd64,
            DownloadUrl::new("https://x/a.tar.gz"),
            "",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid sha256"));
    }

    #[test]
    fn test_url_params_is_empty() {
        assert!(UrlParams::new().is_empty());
        assert!(
            UrlParams {
                referer: Some(String::new()),
                ..UrlParams::default()
            }
            .is_empty()
        );
        assert!(!UrlParams::new().with_header("Accept: */*").is_empty());
    }

    #[test]
    fn test_artifact_deserialize_validates() {
        let json = r#"{
            "platform": "darwin",
            "arch": "arm64",
            "url": {
                "download": "https://example.com/tool.tar.gz",
                "additionalParams": { "userAgent": ":fake", "headers": ["X-A: 1"] }
            },
            "sha256": "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
            "binaryTarget": "tool"
        }"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.platform(), Platform::MacOs);
        assert_eq!(artifact.arch(), Arch::Arm64);
        assert_eq!(
            artifact.url().additional_params.user_agent.as_deref(),
            Some(":fake")
        );
        assert_eq!(artifact.binary_target(), Some("tool"));
    }

    #[test]
    fn test_artifact_deserialize_rejects_bad_checksum() {
        let json = r#"{
            "platform": "linux",
            "arch": "amd64",
            "url": { "download": "https://example.com/tool.tar.gz" },
            "sha256": "nope"
        }"#;
        let result: std::result::Result<Artifact, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_artifact_deserialize_rejects_unknown_arch() {
        let json = r#"{
            "platform": "linux",
            "arch": "ppc64le",
            "url": { "download": "https://example.com/tool.tar.gz" },
            "sha256": "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        }"#;
        let err = serde_json::from_str::<Artifact>(json).unwrap_err();
        assert!(err.to_string().contains("ppc64le"));
    }

    #[test]
    fn test_artifact_spec_conversion_keeps_error_variant() {
        let spec = ArtifactSpec {
            platform: "linux".to_string(),
            arch: "ppc64".to_string(),
            url: DownloadUrl::new("https://x/a.tar.gz"),
            sha256: SHA.to_string(),
            install: Vec::new(),
            binary_target: None,
        };
        let err = Artifact::try_from(spec.clone()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedArch { .. }));

        let bad_platform = ArtifactSpec {
            platform: "windows".to_string(),
            arch: "amd64".to_string(),
            ..spec.clone()
        };
        let err = Artifact::try_from(bad_platform).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform { .. }));

        let bad_sha = ArtifactSpec {
            arch: "amd64".to_string(),
            sha256: "nope".to_string(),
            ..spec.clone()
        };
        let err = Artifact::try_from(bad_sha).unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact { .. }));

        let empty_url = ArtifactSpec {
            arch: "amd64".to_string(),
            url: DownloadUrl::new(""),
            ..spec
        };
        let err = Artifact::try_from(empty_url).unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact { .. }));
    }

    #[test]
    fn test_artifact_with_params_keeps_download() {
        let artifact = Artifact::new(
            Platform::Linux,
            Arch::Arm,
            DownloadUrl::new("https://x/arm.tar.gz"),
            SHA,
        )
        .unwrap()
        .with_params(UrlParams::new().with_referer("https://example.com"));
        assert_eq!(artifact.url().download, "https://x/arm.tar.gz");
        assert_eq!(
            artifact.url().additional_params.referer.as_deref(),
            Some("https://example.com")
        );
    }
}
