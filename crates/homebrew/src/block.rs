//! Per-artifact blocks.
//!
//! One artifact renders as its guard, the `url` stanza with serialized
//! parameters, the `sha256` stanza and a manifest-kind-specific body:
//!
//! - Formula: `def install` with the install steps verbatim
//! - Cask: `binary "<name>", target: "<target>"` when a target is set

use crate::guard::Guard;
use crate::params::serialize_params;
use crate::writer::RubyWriter;
use tapsmith_release::{Artifact, ManifestKind};

/// Renders artifacts of one package set into guarded blocks.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactBlockRenderer<'a> {
    kind: ManifestKind,
    name: &'a str,
}

impl<'a> ArtifactBlockRenderer<'a> {
    /// Creates a renderer for a manifest of `kind` named `name`.
    #[must_use]
    pub const fn new(kind: ManifestKind, name: &'a str) -> Self {
        Self { kind, name }
    }

    /// Writes one artifact wrapped in `guard`.
    pub fn render(&self, w: &mut RubyWriter, artifact: &Artifact, guard: Guard) {
        guard.open(w);

        let url = artifact.url();
        let params = serialize_params(&url.additional_params, self.kind, w.depth());
        w.line(format!("url \"{}\"{params}", url.download));
        w.line(format!("sha256 \"{}\"", artifact.sha256()));

        match self.kind {
            ManifestKind::Formula => {
                w.blank();
                w.open("def install");
                for step in artifact.install() {
                    w.line(step);
                }
                w.close();
            }
            ManifestKind::Cask => {
                if let Some(target) = artifact.binary_target() {
                    w.line(format!("binary \"{}\", target: \"{target}\"", self.name));
                }
            }
        }

        guard.close(w);
    }
}
