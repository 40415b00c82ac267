//! Homebrew cask generation.
//!
//! Casks share the package regions built by the composer with formulae but
//! wrap them in the cask DSL: a `cask "<token>" do` block, a livecheck stub,
//! man page and shell completion artifacts, grouped `depends_on` and
//! `conflicts_with` stanzas, lifecycle hooks and `uninstall`/`zap`.

use crate::composer::ManifestComposer;
use crate::formula::BANNER;
use crate::naming::cask_token;
use crate::writer::{RubyWriter, pad, quote};
use std::fmt::Write;
use tapsmith_release::{CaskConfig, CaskUninstall, GuardEncoding, ManifestKind, PackageSet, Platform};

/// Data for generating a Homebrew cask.
#[derive(Debug, Clone)]
pub struct CaskData<'a> {
    /// Version being released
    pub version: &'a str,
    /// Cask metadata
    pub config: &'a CaskConfig,
    /// Release artifacts
    pub packages: &'a PackageSet,
    /// Guard encoding for architecture blocks
    pub encoding: GuardEncoding,
}

impl<'a> CaskData<'a> {
    /// Creates cask data with the cask default guard encoding.
    #[must_use]
    pub const fn new(version: &'a str, config: &'a CaskConfig, packages: &'a PackageSet) -> Self {
        Self {
            version,
            config,
            packages,
            encoding: ManifestKind::Cask.default_encoding(),
        }
    }

    /// Overrides the guard encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: GuardEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Cask token derived from the package name.
    #[must_use]
    pub fn token(&self) -> String {
        cask_token(self.packages.name())
    }
}

/// Homebrew cask generator.
pub struct CaskGenerator;

impl CaskGenerator {
    /// Generates a Ruby cask from the data.
    #[must_use]
    pub fn generate(data: &CaskData<'_>) -> String {
        let config = data.config;
        let mut w = RubyWriter::new(0);

        w.lines(BANNER);
        w.blank();

        w.open(format!("cask {} do", quote(&data.token())));
        w.line(format!("name {}", quote(data.packages.name())));
        if !config.description.is_empty() {
            w.line(format!("desc {}", quote(&config.description)));
        }
        if !config.homepage.is_empty() {
            w.line(format!("homepage {}", quote(&config.homepage)));
        }
        w.line(format!("version {}", quote(data.version)));
        if !config.license.trim().is_empty() {
            // Casks have no license stanza.
            w.line(format!("# License: {}", config.license.trim()));
        }

        w.section_break();
        w.open("livecheck do");
        w.line("skip \"Auto-generated on release.\"");
        w.close();

        let composer = ManifestComposer::new(ManifestKind::Cask, data.encoding);
        for platform in Platform::all() {
            if !data.packages.has_platform(*platform) {
                continue;
            }
            w.section_break();
            w.open(format!("{} do", platform.dsl_block()));
            composer.compose_into(&mut w, data.packages, *platform);
            w.close();
        }

        let completions = [
            ("bash_completion", &config.completions.bash),
            ("zsh_completion", &config.completions.zsh),
            ("fish_completion", &config.completions.fish),
        ];
        let has_manpage = !config.manpage.trim().is_empty();
        if has_manpage || completions.iter().any(|(_, path)| !path.trim().is_empty()) {
            w.section_break();
            if has_manpage {
                w.line(format!("manpage {}", quote(&config.manpage)));
            }
            for (stanza, path) in completions {
                if !path.trim().is_empty() {
                    w.line(format!("{stanza} {}", quote(path)));
                }
            }
        }

        let casks = sorted(config.dependencies.iter().map(|d| d.cask.as_str()));
        let formulae = sorted(config.dependencies.iter().map(|d| d.formula.as_str()));
        let conflicts = sorted(config.conflicts.iter().map(|c| c.cask.as_str()));
        if !casks.is_empty() || !formulae.is_empty() || !conflicts.is_empty() {
            w.section_break();
            write_groups(&mut w, "depends_on", &[("cask", casks), ("formula", formulae)]);
            write_groups(&mut w, "conflicts_with", &[("cask", conflicts)]);
        }

        if !config.custom_block.trim().is_empty() {
            w.section_break();
            w.lines(&config.custom_block);
        }

        let hooks = &config.hooks;
        for (stanza, body) in [
            ("preflight", &hooks.pre.install),
            ("postflight", &hooks.post.install),
            ("uninstall_preflight", &hooks.pre.uninstall),
            ("uninstall_postflight", &hooks.post.uninstall),
        ] {
            if !body.trim().is_empty() {
                w.section_break();
                w.open(format!("{stanza} do"));
                w.lines(body);
                w.close();
            }
        }

        if !config.caveats.trim().is_empty() {
            w.section_break();
            w.stanza_heredoc("caveats", &config.caveats);
        }

        let uninstall = uninstall_groups(&config.uninstall);
        if uninstall.iter().any(|(_, items)| !items.is_empty()) {
            w.section_break();
            write_groups(&mut w, "uninstall", &uninstall);
        }

        w.section_break();
        let zap = uninstall_groups(&config.zap);
        if zap.iter().all(|(_, items)| items.is_empty()) {
            w.line("# No zap stanza required");
        } else {
            write_groups(&mut w, "zap", &zap);
        }

        w.close();
        w.finish()
    }
}

fn sorted<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut items: Vec<&str> = items.filter(|s| !s.trim().is_empty()).collect();
    items.sort_unstable();
    items.dedup();
    items
}

fn uninstall_groups(uninstall: &CaskUninstall) -> [(&'static str, Vec<&str>); 5] {
    [
        ("launchctl", non_blank(&uninstall.launchctl)),
        ("quit", non_blank(&uninstall.quit)),
        ("login_item", non_blank(&uninstall.login_item)),
        ("delete", non_blank(&uninstall.delete)),
        ("trash", non_blank(&uninstall.trash)),
    ]
}

fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Writes `stanza key: [...], key: [...]`, skipping empty groups.
///
/// Items sit two levels below the stanza and each group closer one level
/// below it, so continuation groups line up under the first.
fn write_groups(w: &mut RubyWriter, stanza: &str, groups: &[(&str, Vec<&str>)]) {
    let mut text = String::new();
    let depth = w.depth();
    for (key, items) in groups.iter().filter(|(_, items)| !items.is_empty()) {
        if text.is_empty() {
            let _ = write!(text, "{stanza} {key}: [");
        } else {
            let _ = write!(text, ",\n{}{key}: [", pad(depth + 1));
        }
        for item in items {
            let _ = write!(text, "\n{}{},", pad(depth + 2), quote(item));
        }
        let _ = write!(text, "\n{}]", pad(depth + 1));
    }
    if !text.is_empty() {
        w.line(text);
    }
}
