//! Release-level artifact sets.
//!
//! A [`PackageSet`] is the validated input to manifest rendering. It is built
//! once per release, immediately before rendering, and never mutated.

use crate::artifact::{Arch, Artifact, Platform};
use crate::error::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// The validated set of artifacts for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSet {
    name: String,
    entries: Vec<Artifact>,
    has_only_amd64_mac_artifact: bool,
}

impl PackageSet {
    /// Validates the artifacts of a release and builds the package set.
    ///
    /// Entry order is preserved exactly as given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `name` is empty
    /// - two artifacts share a platform and architecture
    /// - an `all` artifact shares a platform with any other artifact
    /// - a 32-bit `arm` artifact targets macOS
    pub fn new(name: impl Into<String>, entries: Vec<Artifact>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_artifact("name", "package name must not be empty"));
        }

        let mut seen = HashSet::new();
        for artifact in &entries {
            if artifact.platform() == Platform::MacOs && artifact.arch() == Arch::Arm {
                return Err(Error::unsupported_combination(
                    artifact.platform().as_str(),
                    artifact.arch().as_str(),
                ));
            }
            if !seen.insert((artifact.platform(), artifact.arch())) {
                return Err(Error::ambiguous_guard(
                    artifact.platform().as_str(),
                    artifact.arch().as_str(),
                ));
            }
        }

        for platform in Platform::all() {
            let archs: Vec<Arch> = entries
                .iter()
                .filter(|a| a.platform() == *platform)
                .map(Artifact::arch)
                .collect();
            if archs.len() > 1 && archs.contains(&Arch::All) {
                return Err(Error::ambiguous_guard(platform.as_str(), Arch::All.as_str()));
            }
        }

        let mac: Vec<&Artifact> = entries
            .iter()
            .filter(|a| a.platform() == Platform::MacOs)
            .collect();
        let has_only_amd64_mac_artifact = mac.len() == 1 && mac[0].arch() == Arch::Amd64;

        debug!(
            name = %name,
            entries = entries.len(),
            has_only_amd64_mac_artifact,
            "Built package set"
        );

        Ok(Self {
            name,
            entries,
            has_only_amd64_mac_artifact,
        })
    }

    /// Returns the manifest/display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns every artifact, in the order given.
    #[must_use]
    pub fn entries(&self) -> &[Artifact] {
        &self.entries
    }

    /// Returns the artifacts of one platform, in the order given.
    pub fn entries_for(&self, platform: Platform) -> impl Iterator<Item = &Artifact> {
        self.entries.iter().filter(move |a| a.platform() == platform)
    }

    /// Returns true if the platform has at least one artifact.
    #[must_use]
    pub fn has_platform(&self, platform: Platform) -> bool {
        self.entries_for(platform).next().is_some()
    }

    /// Returns true if the platform carries an artifact for `arch`.
    #[must_use]
    pub fn has_arch(&self, platform: Platform, arch: Arch) -> bool {
        self.entries_for(platform).any(|a| a.arch() == arch)
    }

    /// True when macOS is covered by a single amd64 artifact and nothing else.
    #[must_use]
    pub const fn has_only_amd64_mac_artifact(&self) -> bool {
        self.has_only_amd64_mac_artifact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DownloadUrl;

    const SHA: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn artifact(platform: Platform, arch: Arch) -> Artifact {
        Artifact::new(
            platform,
            arch,
            DownloadUrl::new(format!("https://x/{platform}-{arch}.tar.gz")),
            SHA,
        )
        .unwrap()
    }

    #[test]
    fn test_only_amd64_mac_flag() {
        let set = PackageSet::new(
            "tool",
            vec![
                artifact(Platform::MacOs, Arch::Amd64),
                artifact(Platform::Linux, Arch::Arm64),
            ],
        )
        .unwrap();
        assert!(set.has_only_amd64_mac_artifact());
    }

    #[test]
    fn test_flag_false_with_arm64_mac() {
        let set = PackageSet::new(
            "tool",
            vec![
                artifact(Platform::MacOs, Arch::Amd64),
                artifact(Platform::MacOs, Arch::Arm64),
            ],
        )
        .unwrap();
        assert!(!set.has_only_amd64_mac_artifact());
    }

    #[test]
    fn test_flag_false_without_mac() {
        let set = PackageSet::new("tool", vec![artifact(Platform::Linux, Arch::Amd64)]).unwrap();
        assert!(!set.has_only_amd64_mac_artifact());
        assert!(!set.has_platform(Platform::MacOs));
    }

    #[test]
    fn test_entries_for_preserves_order() {
        let set = PackageSet::new(
            "tool",
            vec![
                artifact(Platform::Linux, Arch::Arm),
                artifact(Platform::MacOs, Arch::All),
                artifact(Platform::Linux, Arch::Amd64),
                artifact(Platform::Linux, Arch::Arm64),
            ],
        )
        .unwrap();
        let linux: Vec<Arch> = set.entries_for(Platform::Linux).map(Artifact::arch).collect();
        assert_eq!(linux, vec![Arch::Arm, Arch::Amd64, Arch::Arm64]);
        assert!(set.has_arch(Platform::MacOs, Arch::All));
    }

    #[test]
    fn test_rejects_duplicate_arch() {
        let err = PackageSet::new(
            "tool",
            vec![
                artifact(Platform::Linux, Arch::Arm64),
                artifact(Platform::Linux, Arch::Arm64),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::AmbiguousGuard { .. }));
    }

    #[test]
    fn test_rejects_all_mixed_with_specific() {
        let err = PackageSet::new(
            "tool",
            vec![
                artifact(Platform::MacOs, Arch::All),
                artifact(Platform::MacOs, Arch::Arm64),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::AmbiguousGuard { .. }));
    }

    #[test]
    fn test_allows_same_arch_on_different_platforms() {
        let set = PackageSet::new(
            "tool",
            vec![
                artifact(Platform::MacOs, Arch::Arm64),
                artifact(Platform::Linux, Arch::Arm64),
            ],
        );
        assert!(set.is_ok());
    }

    #[test]
    fn test_rejects_arm32_on_macos() {
        let err = PackageSet::new("tool", vec![artifact(Platform::MacOs, Arch::Arm)]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCombination { .. }));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = PackageSet::new(" ", vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact { .. }));
    }
}
