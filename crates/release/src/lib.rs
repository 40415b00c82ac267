//! Release descriptions for tapsmith.
//!
//! This crate holds the validated data model that manifest generators render
//! from: artifacts with their platform, architecture, download URL and
//! checksum, the [`PackageSet`] grouping them for one release, and the
//! configuration read from release description files.
//!
//! Validation happens at construction. A [`PackageSet`] that exists is always
//! renderable: every artifact has a URL and a well-formed checksum, and no two
//! artifacts claim the same platform and architecture.
//!
//! # Example
//!
//! ```rust
//! use tapsmith_release::{Arch, Artifact, DownloadUrl, PackageSet, Platform};
//!
//! let artifact = Artifact::new(
//!     Platform::MacOs,
//!     Arch::Amd64,
//!     DownloadUrl::new("https://example.com/tool-darwin-amd64.tar.gz"),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
//! )?;
//! let set = PackageSet::new("tool", vec![artifact])?;
//! assert!(set.has_only_amd64_mac_artifact());
//! # Ok::<(), tapsmith_release::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod artifact;
pub mod config;
pub mod error;
pub mod package;

// Re-export main types
pub use artifact::{Arch, Artifact, ArtifactSpec, DownloadUrl, Platform, Sha256, UrlParams};
pub use config::{
    CaskCompletions, CaskConfig, CaskConflict, CaskDependency, CaskHook, CaskHooks, CaskUninstall,
    FormulaConfig, FormulaDependency, GuardEncoding, ManifestKind, ReleaseFile,
};
pub use error::{Error, Result};
pub use package::PackageSet;
