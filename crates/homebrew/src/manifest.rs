//! Rendering a release description into a tap file.

use crate::cask::{CaskData, CaskGenerator};
use crate::formula::{FormulaData, FormulaGenerator};
use crate::naming::cask_token;
use std::path::PathBuf;
use tapsmith_release::{ManifestKind, ReleaseFile, Result};
use tracing::info;

/// A rendered manifest and the tap-relative path it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedManifest {
    /// Manifest kind.
    pub kind: ManifestKind,
    /// Path inside the tap, e.g. `Formula/mytool.rb` or `Casks/mytool.rb`.
    pub path: PathBuf,
    /// Ruby source.
    pub content: String,
}

/// Returns the tap-relative path of the manifest for `name`.
#[must_use]
pub fn tap_path(kind: ManifestKind, name: &str) -> PathBuf {
    let stem = match kind {
        ManifestKind::Formula => name.to_string(),
        ManifestKind::Cask => cask_token(name),
    };
    PathBuf::from(kind.tap_directory()).join(format!("{stem}.rb"))
}

/// Validates a release description and renders its manifest.
///
/// # Errors
///
/// Returns an error if the artifacts do not form a valid package set.
pub fn render_release(release: &ReleaseFile) -> Result<RenderedManifest> {
    let packages = release.package_set()?;
    let encoding = release.encoding();

    let content = match release.kind {
        ManifestKind::Formula => {
            let data = FormulaData::new(&release.version, &release.formula, &packages)
                .with_encoding(encoding);
            FormulaGenerator::generate(&data)
        }
        ManifestKind::Cask => {
            let data =
                CaskData::new(&release.version, &release.cask, &packages).with_encoding(encoding);
            CaskGenerator::generate(&data)
        }
    };

    let path = tap_path(release.kind, &release.name);
    info!(
        name = %release.name,
        kind = %release.kind,
        encoding = %encoding,
        path = %path.display(),
        "Rendered manifest"
    );

    Ok(RenderedManifest {
        kind: release.kind,
        path,
        content,
    })
}
