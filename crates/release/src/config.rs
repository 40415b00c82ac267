//! Manifest configuration types.
//!
//! This module defines the Rust representations of the release description
//! file: manifest kind and guard encoding selection, formula and cask
//! metadata, and the artifact list.

use crate::artifact::{Artifact, ArtifactSpec, Platform};
use crate::error::{Error, Result};
use crate::package::PackageSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Kind of manifest to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    /// A Homebrew formula (`class X < Formula`).
    #[default]
    Formula,
    /// A Homebrew cask (`cask "x" do`).
    Cask,
}

impl ManifestKind {
    /// Returns the guard encoding this kind uses when none is configured.
    #[must_use]
    pub const fn default_encoding(&self) -> GuardEncoding {
        match self {
            Self::Formula => GuardEncoding::InlineBoolean,
            Self::Cask => GuardEncoding::NamedBlock,
        }
    }

    /// Returns the directory a tap keeps this kind of manifest in.
    #[must_use]
    pub const fn tap_directory(&self) -> &'static str {
        match self {
            Self::Formula => "Formula",
            Self::Cask => "Casks",
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Cask => write!(f, "cask"),
        }
    }
}

impl FromStr for ManifestKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "formula" => Ok(Self::Formula),
            "cask" => Ok(Self::Cask),
            _ => Err(Error::config(
                format!("Unknown manifest kind: {s}"),
                "Valid kinds: formula, cask",
            )),
        }
    }
}

/// How architecture guards are written in the generated DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardEncoding {
    /// `if Hardware::CPU.intel?` … `end`
    #[serde(alias = "inline")]
    InlineBoolean,
    /// `on_intel do` … `end` / `on_arm do` … `end`
    #[serde(alias = "named")]
    NamedBlock,
}

impl fmt::Display for GuardEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineBoolean => write!(f, "inline-boolean"),
            Self::NamedBlock => write!(f, "named-block"),
        }
    }
}

impl FromStr for GuardEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inline" | "inline-boolean" => Ok(Self::InlineBoolean),
            "named" | "named-block" => Ok(Self::NamedBlock),
            _ => Err(Error::config(
                format!("Unknown guard encoding: {s}"),
                "Valid encodings: inline-boolean, named-block",
            )),
        }
    }
}

/// A formula dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaDependency {
    /// Formula name.
    pub name: String,
    /// Dependency type (e.g. `build`, `optional`, `recommended`, `test`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Restrict the dependency to one platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Platform>,
}

/// Formula metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormulaConfig {
    /// One-line description.
    pub description: String,
    /// Project homepage.
    pub homepage: String,
    /// SPDX license identifier.
    pub license: String,
    /// Extra `require_relative` path emitted before the class.
    pub custom_require: String,
    /// Formula dependencies.
    pub dependencies: Vec<FormulaDependency>,
    /// Conflicting formulae.
    pub conflicts: Vec<String>,
    /// Raw DSL lines inserted after the header stanzas.
    pub custom_block: String,
    /// Caveats text.
    pub caveats: String,
    /// `post_install` body.
    pub post_install: String,
    /// `service` block body.
    pub service: String,
    /// `test` block body.
    pub test: String,
}

/// A cask dependency: either another cask or a formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaskDependency {
    /// Cask token.
    pub cask: String,
    /// Formula name.
    pub formula: String,
}

/// A cask conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaskConflict {
    /// Cask token.
    pub cask: String,
}

/// Groups of paths and identifiers removed on `uninstall` or `zap`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaskUninstall {
    /// launchd job labels to unload.
    pub launchctl: Vec<String>,
    /// Bundle identifiers of applications to quit.
    pub quit: Vec<String>,
    /// Login item names to remove.
    pub login_item: Vec<String>,
    /// Paths to delete.
    pub delete: Vec<String>,
    /// Paths to move to the trash.
    pub trash: Vec<String>,
}

/// Shell completion files shipped inside the cask artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaskCompletions {
    /// Bash completion file.
    pub bash: String,
    /// Zsh completion file.
    pub zsh: String,
    /// Fish completion file.
    pub fish: String,
}

/// Script bodies run around one cask phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaskHook {
    /// Runs around installation.
    pub install: String,
    /// Runs around uninstallation.
    pub uninstall: String,
}

/// Cask lifecycle hooks.
///
/// `pre.install` maps to `preflight`, `post.install` to `postflight`,
/// `pre.uninstall` to `uninstall_preflight` and `post.uninstall` to
/// `uninstall_postflight`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaskHooks {
    /// Hooks run before the phase.
    pub pre: CaskHook,
    /// Hooks run after the phase.
    pub post: CaskHook,
}

/// Cask metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaskConfig {
    /// One-line description.
    pub description: String,
    /// Project homepage.
    pub homepage: String,
    /// SPDX license identifier.
    pub license: String,
    /// Man page shipped inside the artifact.
    pub manpage: String,
    /// Shell completions shipped inside the artifact.
    pub completions: CaskCompletions,
    /// Cask dependencies.
    pub dependencies: Vec<CaskDependency>,
    /// Conflicting casks.
    pub conflicts: Vec<CaskConflict>,
    /// Raw DSL lines inserted after the header stanzas.
    pub custom_block: String,
    /// Caveats text.
    pub caveats: String,
    /// Lifecycle hooks.
    pub hooks: CaskHooks,
    /// `uninstall` stanza.
    pub uninstall: CaskUninstall,
    /// `zap` stanza.
    pub zap: CaskUninstall,
}

/// A complete release description as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseFile {
    /// Project name; becomes the formula class or cask token.
    pub name: String,
    /// Version being released.
    pub version: String,
    /// Manifest kind to generate.
    #[serde(default)]
    pub kind: ManifestKind,
    /// Guard encoding override. Defaults per manifest kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<GuardEncoding>,
    /// Formula metadata.
    #[serde(default)]
    pub formula: FormulaConfig,
    /// Cask metadata.
    #[serde(default)]
    pub cask: CaskConfig,
    /// Release artifacts, in emission order. Validated by
    /// [`ReleaseFile::package_set`].
    #[serde(default)]
    pub artifacts: Vec<ArtifactSpec>,
}

impl ReleaseFile {
    /// Loads a release description from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// or fails to parse and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        debug!(path = %path.display(), extension, "Loading release description");

        let release: Self = match extension {
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            other => {
                return Err(Error::config(
                    format!("Unsupported release file extension: '{other}'"),
                    "Use a .toml or .json release description",
                ));
            }
        };

        info!(
            name = %release.name,
            version = %release.version,
            kind = %release.kind,
            artifacts = release.artifacts.len(),
            "Loaded release description"
        );
        Ok(release)
    }

    /// Returns the configured guard encoding, or the kind's default.
    #[must_use]
    pub fn encoding(&self) -> GuardEncoding {
        self.encoding
            .unwrap_or_else(|| self.kind.default_encoding())
    }

    /// Validates the artifacts and builds the package set.
    ///
    /// # Errors
    ///
    /// Returns the first artifact validation error (unsupported platform or
    /// architecture, missing URL, malformed checksum), or an error if the
    /// artifacts do not form a valid package set.
    pub fn package_set(&self) -> Result<PackageSet> {
        let artifacts = self
            .artifacts
            .iter()
            .cloned()
            .map(Artifact::try_from)
            .collect::<Result<Vec<_>>>()?;
        PackageSet::new(self.name.clone(), artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Arch;

    #[test]
    fn test_kind_default_encoding() {
        assert_eq!(
            ManifestKind::Formula.default_encoding(),
            GuardEncoding::InlineBoolean
        );
        assert_eq!(ManifestKind::Cask.default_encoding(), GuardEncoding::NamedBlock);
    }

    #[test]
    fn test_kind_tap_directory() {
        assert_eq!(ManifestKind::Formula.tap_directory(), "Formula");
        assert_eq!(ManifestKind::Cask.tap_directory(), "Casks");
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!(
            GuardEncoding::from_str("inline").unwrap(),
            GuardEncoding::InlineBoolean
        );
        assert_eq!(
            GuardEncoding::from_str("named-block").unwrap(),
            GuardEncoding::NamedBlock
        );
        assert!(GuardEncoding::from_str("ternary").is_err());
    }

    #[test]
    fn test_release_file_from_toml() {
        let content = r#"
name = "mytool"
version = "1.2.3"
kind = "cask"

[cask]
description = "My tool"
homepage = "https://example.com"

[[cask.dependencies]]
formula = "git"

[[artifacts]]
platform = "darwin"
arch = "all"
sha256 = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
binaryTarget = "mytool"

[artifacts.url]
download = "https://example.com/mytool.tar.gz"
"#;
        let release: ReleaseFile = toml::from_str(content).unwrap();
        assert_eq!(release.kind, ManifestKind::Cask);
        assert_eq!(release.encoding(), GuardEncoding::NamedBlock);
        assert_eq!(release.cask.dependencies[0].formula, "git");
        assert_eq!(release.artifacts[0].arch, "all");

        let set = release.package_set().unwrap();
        assert_eq!(set.name(), "mytool");
        assert!(set.has_arch(Platform::MacOs, Arch::All));
    }

    fn release_with_artifact(arch: &str, sha256: &str) -> String {
        format!(
            r#"
name = "mytool"
version = "1.0.0"

[[artifacts]]
platform = "linux"
arch = "{arch}"
sha256 = "{sha256}"

[artifacts.url]
download = "https://example.com/mytool.tar.gz"
"#
        )
    }

    #[test]
    fn test_release_file_parses_invalid_artifacts_lazily() {
        let content = release_with_artifact("ppc64", "nope");
        let release: ReleaseFile = toml::from_str(&content).unwrap();
        assert_eq!(release.artifacts.len(), 1);
        assert!(release.package_set().is_err());
    }

    #[test]
    fn test_package_set_reports_unsupported_arch() {
        let sha = "a".repeat(64);
        let release: ReleaseFile = toml::from_str(&release_with_artifact("ppc64", &sha)).unwrap();
        let err = release.package_set().unwrap_err();
        assert!(matches!(err, Error::UnsupportedArch { .. }));
    }

    #[test]
    fn test_package_set_reports_invalid_checksum() {
        let release: ReleaseFile =
            toml::from_str(&release_with_artifact("amd64", "nope")).unwrap();
        let err = release.package_set().unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact { .. }));
    }

    #[test]
    fn test_cask_config_hooks_and_completions() {
        let content = r#"
name = "mytool"
version = "1.0.0"
kind = "cask"

[cask]
license = "MIT"
manpage = "man/mytool.1.gz"

[cask.completions]
bash = "completions/mytool.bash"
fish = "completions/mytool.fish"

[cask.hooks.pre]
install = "system_command \"/bin/true\""

[cask.hooks.post]
uninstall = "puts \"bye\""
"#;
        let release: ReleaseFile = toml::from_str(content).unwrap();
        assert_eq!(release.cask.license, "MIT");
        assert_eq!(release.cask.manpage, "man/mytool.1.gz");
        assert_eq!(release.cask.completions.bash, "completions/mytool.bash");
        assert!(release.cask.completions.zsh.is_empty());
        assert_eq!(release.cask.hooks.pre.install, "system_command \"/bin/true\"");
        assert_eq!(release.cask.hooks.post.uninstall, "puts \"bye\"");
        assert!(release.cask.hooks.post.install.is_empty());
    }

    #[test]
    fn test_release_file_encoding_override() {
        let content = r#"
name = "mytool"
version = "1.0.0"
encoding = "named-block"
"#;
        let release: ReleaseFile = toml::from_str(content).unwrap();
        assert_eq!(release.kind, ManifestKind::Formula);
        assert_eq!(release.encoding(), GuardEncoding::NamedBlock);
    }

    #[test]
    fn test_formula_dependency_type_field() {
        let json = r#"{"name": "zsh", "type": "optional", "os": "linux"}"#;
        let dep: FormulaDependency = serde_json::from_str(json).unwrap();
        assert_eq!(dep.kind.as_deref(), Some("optional"));
        assert_eq!(dep.os, Some(Platform::Linux));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("release.yaml");
        std::fs::write(&path, "name: x").unwrap();
        let err = ReleaseFile::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_json_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("release.json");
        std::fs::write(
            &path,
            r#"{"name": "tool", "version": "0.1.0", "artifacts": []}"#,
        )
        .unwrap();
        let release = ReleaseFile::load(&path).unwrap();
        assert_eq!(release.version, "0.1.0");
        assert!(release.artifacts.is_empty());
    }
}
