use crate::cli::{CliError, EncodingArg, KindArg};
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use tapsmith_homebrew::{render_release, tap_path};
use tapsmith_release::{Platform, ReleaseFile};
use tracing::{info, instrument};

/// Options for the `render` command.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Release description to load.
    pub release_file: PathBuf,
    /// Manifest kind override.
    pub kind: Option<KindArg>,
    /// Guard encoding override.
    pub encoding: Option<EncodingArg>,
    /// Destination file; stdout when unset.
    pub output: Option<PathBuf>,
    /// Release version override.
    pub release_version: Option<String>,
}

/// Loads a release description and applies command line overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or lists no artifacts.
pub fn load_release(path: &Path) -> Result<ReleaseFile, CliError> {
    let release = ReleaseFile::load(path)?;
    if release.artifacts.is_empty() {
        return Err(CliError::invalid_with_help(
            format!("{} lists no artifacts", path.display()),
            "Add at least one [[artifacts]] entry with a platform, arch, url and sha256",
        ));
    }
    Ok(release)
}

/// Renders a manifest to `options.output` or to `out`.
///
/// # Errors
///
/// Returns an error if the release cannot be loaded or rendered, or if
/// writing the manifest fails.
#[instrument(skip_all, fields(release_file = %options.release_file.display()))]
pub fn execute_render(options: &RenderOptions, out: &mut dyn Write) -> Result<(), CliError> {
    let mut release = load_release(&options.release_file)?;
    if let Some(kind) = options.kind {
        release.kind = kind.into();
    }
    if let Some(encoding) = options.encoding {
        release.encoding = Some(encoding.into());
    }
    if let Some(version) = &options.release_version {
        release.version.clone_from(version);
    }

    let manifest = render_release(&release)?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| write_error(parent, &e))?;
            }
            std::fs::write(path, &manifest.content).map_err(|e| write_error(path, &e))?;
            info!(
                path = %path.display(),
                tap_path = %manifest.path.display(),
                "Wrote manifest"
            );
        }
        None => {
            out.write_all(manifest.content.as_bytes())
                .map_err(|e| CliError::config(format!("Failed to write manifest: {e}")))?;
        }
    }
    Ok(())
}

/// Validates a release description and writes a package set summary to `out`.
///
/// # Errors
///
/// Returns an error if the release cannot be loaded or its artifacts are
/// invalid.
#[instrument(skip_all, fields(release_file = %release_file.display()))]
pub fn execute_check(release_file: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let release = load_release(release_file)?;
    let packages = release.package_set()?;

    let mut summary = String::new();
    let _ = writeln!(
        summary,
        "{} {} ({}, {} guards)",
        release.name,
        release.version,
        release.kind,
        release.encoding()
    );
    for platform in Platform::all() {
        let arches: Vec<String> = packages
            .entries_for(*platform)
            .map(|artifact| artifact.arch().to_string())
            .collect();
        if !arches.is_empty() {
            let _ = writeln!(summary, "  {platform}: {}", arches.join(", "));
        }
    }
    if packages.has_only_amd64_mac_artifact() {
        let _ = writeln!(
            summary,
            "  note: macOS ships amd64 only; arm64 hosts get a compatibility caveat"
        );
    }
    let _ = writeln!(
        summary,
        "  tap path: {}",
        tap_path(release.kind, &release.name).display()
    );

    out.write_all(summary.as_bytes())
        .map_err(|e| CliError::config(format!("Failed to write summary: {e}")))?;
    Ok(())
}

fn write_error(path: &Path, err: &std::io::Error) -> CliError {
    CliError::config_with_help(
        format!("Failed to write {}: {err}", path.display()),
        "Check that the output location exists and is writable",
    )
}
