//! Homebrew manifest rendering.
//!
//! Turns a validated [`PackageSet`](tapsmith_release::PackageSet) into the
//! Ruby DSL of a Homebrew formula or cask. The pieces compose bottom-up:
//!
//! - [`serialize_params`] renders the keyword arguments after a `url` stanza
//! - [`GuardResolver`] picks the architecture guard for each artifact
//! - [`ArtifactBlockRenderer`] writes one guarded `url`/`sha256`/body block
//! - [`ManifestComposer`] lays out every block of one platform
//! - [`FormulaGenerator`] and [`CaskGenerator`] wrap the regions in a full file
//!
//! # Example
//!
//! ```rust
//! use tapsmith_homebrew::ManifestComposer;
//! use tapsmith_release::{Arch, Artifact, DownloadUrl, ManifestKind, PackageSet, Platform};
//!
//! let artifact = Artifact::new(
//!     Platform::Linux,
//!     Arch::Amd64,
//!     DownloadUrl::new("https://example.com/mytool_linux_amd64.tar.gz"),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
//! )?;
//! let packages = PackageSet::new("mytool", vec![artifact])?;
//!
//! let region = ManifestComposer::for_kind(ManifestKind::Formula)
//!     .compose(&packages, Platform::Linux);
//! assert!(region.starts_with("  if Hardware::CPU.intel?\n"));
//! # Ok::<(), tapsmith_release::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod block;
mod cask;
mod composer;
mod formula;
mod guard;
mod manifest;
mod naming;
mod params;
mod writer;

pub use block::ArtifactBlockRenderer;
pub use cask::{CaskData, CaskGenerator};
pub use composer::ManifestComposer;
pub use formula::{FormulaData, FormulaGenerator};
pub use guard::{Condition, Cpu, CpuFamily, Guard, GuardResolver, NamedBlock};
pub use manifest::{RenderedManifest, render_release, tap_path};
pub use naming::{cask_token, formula_class_name};
pub use params::serialize_params;
pub use writer::{RubyWriter, quote};
