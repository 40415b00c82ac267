//! Per-platform package regions.
//!
//! The composer turns the artifacts one platform ships into the ordered run of
//! guarded blocks that a manifest places inside `on_macos` or `on_linux`.

use crate::block::ArtifactBlockRenderer;
use crate::guard::{Guard, GuardResolver};
use crate::writer::RubyWriter;
use tapsmith_release::{Arch, Artifact, GuardEncoding, ManifestKind, PackageSet, Platform};
use tracing::debug;

/// Composes the package region of a manifest for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestComposer {
    kind: ManifestKind,
    encoding: GuardEncoding,
}

impl ManifestComposer {
    /// Creates a composer with an explicit guard encoding.
    #[must_use]
    pub const fn new(kind: ManifestKind, encoding: GuardEncoding) -> Self {
        Self { kind, encoding }
    }

    /// Creates a composer using the kind's default guard encoding.
    #[must_use]
    pub const fn for_kind(kind: ManifestKind) -> Self {
        Self::new(kind, kind.default_encoding())
    }

    /// Renders the package region for `platform` at indentation depth 1.
    ///
    /// Returns an empty string when the platform has no artifacts.
    #[must_use]
    pub fn compose(&self, set: &PackageSet, platform: Platform) -> String {
        let mut w = RubyWriter::new(1);
        self.compose_into(&mut w, set, platform);
        w.finish()
    }

    /// Writes the package region for `platform` at the writer's depth.
    pub fn compose_into(&self, w: &mut RubyWriter, set: &PackageSet, platform: Platform) {
        let entries: Vec<&Artifact> = set.entries_for(platform).collect();
        let renderer = ArtifactBlockRenderer::new(self.kind, set.name());

        debug!(
            platform = %platform,
            kind = %self.kind,
            encoding = %self.encoding,
            entries = entries.len(),
            "Composing package region"
        );

        match entries.as_slice() {
            [] => {}
            [only] if only.arch() == Arch::All => {
                renderer.render(w, only, Guard::Unguarded);
            }
            [only] if platform == Platform::MacOs && set.has_only_amd64_mac_artifact() => {
                // Left unguarded so arm64 hosts can still run it under emulation.
                renderer.render(w, only, Guard::Unguarded);
                w.blank();
                self.write_arm64_caveat(w, set.name());
            }
            _ => {
                let resolver = GuardResolver::for_package_set(set, platform, self.encoding);
                for artifact in entries {
                    renderer.render(w, artifact, resolver.resolve(artifact.arch()));
                }
            }
        }
    }

    fn write_arm64_caveat(&self, w: &mut RubyWriter, name: &str) {
        let guard = Guard::arm_caveat(self.encoding);
        guard.open(w);
        w.open("def caveats");
        w.heredoc(&format!(
            "The darwin_arm64 architecture is not supported for the {name}
formula at this time. The darwin_amd64 binary may work in compatibility
mode, but it might not be fully supported."
        ));
        w.close();
        guard.close(w);
    }
}
