//! Homebrew formula generation.
//!
//! Generates Ruby formula files from a validated package set and formula
//! metadata.

use crate::composer::ManifestComposer;
use crate::naming::formula_class_name;
use crate::writer::{RubyWriter, quote};
use tapsmith_release::{
    FormulaConfig, FormulaDependency, GuardEncoding, ManifestKind, PackageSet, Platform,
};

/// Banner written at the top of every generated manifest.
pub(crate) const BANNER: &str = "# typed: false
# frozen_string_literal: true

# This file was generated by tapsmith. DO NOT EDIT.";

/// Data for generating a Homebrew formula.
#[derive(Debug, Clone)]
pub struct FormulaData<'a> {
    /// Version being released
    pub version: &'a str,
    /// Formula metadata
    pub config: &'a FormulaConfig,
    /// Release artifacts
    pub packages: &'a PackageSet,
    /// Guard encoding for architecture blocks
    pub encoding: GuardEncoding,
}

impl<'a> FormulaData<'a> {
    /// Creates formula data with the formula default guard encoding.
    #[must_use]
    pub const fn new(version: &'a str, config: &'a FormulaConfig, packages: &'a PackageSet) -> Self {
        Self {
            version,
            config,
            packages,
            encoding: ManifestKind::Formula.default_encoding(),
        }
    }

    /// Overrides the guard encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: GuardEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Ruby class name derived from the package name.
    #[must_use]
    pub fn class_name(&self) -> String {
        formula_class_name(self.packages.name())
    }
}

/// Homebrew formula generator.
pub struct FormulaGenerator;

impl FormulaGenerator {
    /// Generates a Ruby formula from the data.
    #[must_use]
    pub fn generate(data: &FormulaData<'_>) -> String {
        let config = data.config;
        let mut w = RubyWriter::new(0);

        w.lines(BANNER);
        if !config.custom_require.is_empty() {
            w.line(format!("require_relative {}", quote(&config.custom_require)));
        }
        w.blank();

        w.open(format!("class {} < Formula", data.class_name()));
        if !config.description.is_empty() {
            w.line(format!("desc {}", quote(&config.description)));
        }
        if !config.homepage.is_empty() {
            w.line(format!("homepage {}", quote(&config.homepage)));
        }
        w.line(format!("version {}", quote(data.version)));
        if !config.license.is_empty() {
            w.line(format!("license {}", quote(&config.license)));
        }

        write_dependencies(&mut w, &config.dependencies);

        if !config.conflicts.is_empty() {
            w.section_break();
            for conflict in &config.conflicts {
                w.line(format!("conflicts_with {}", quote(conflict)));
            }
        }

        if !config.custom_block.trim().is_empty() {
            w.section_break();
            w.lines(&config.custom_block);
        }

        let composer = ManifestComposer::new(ManifestKind::Formula, data.encoding);
        for platform in Platform::all() {
            if !data.packages.has_platform(*platform) {
                continue;
            }
            w.section_break();
            w.open(format!("{} do", platform.dsl_block()));
            composer.compose_into(&mut w, data.packages, *platform);
            w.close();
        }

        write_def(&mut w, "post_install", &config.post_install);

        if !config.caveats.trim().is_empty() {
            w.section_break();
            w.open("def caveats");
            w.heredoc(&config.caveats);
            w.close();
        }

        write_do_block(&mut w, "service", &config.service);
        write_do_block(&mut w, "test", &config.test);

        w.close();
        w.finish()
    }
}

fn write_dependencies(w: &mut RubyWriter, dependencies: &[FormulaDependency]) {
    if dependencies.is_empty() {
        return;
    }
    let mut sorted: Vec<&FormulaDependency> = dependencies.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    w.section_break();
    for dep in sorted.iter().filter(|d| d.os.is_none()) {
        w.line(depends_on(dep));
    }
    for platform in Platform::all() {
        let scoped: Vec<&&FormulaDependency> =
            sorted.iter().filter(|d| d.os == Some(*platform)).collect();
        if scoped.is_empty() {
            continue;
        }
        w.open(format!("{} do", platform.dsl_block()));
        for dep in scoped {
            w.line(depends_on(dep));
        }
        w.close();
    }
}

fn depends_on(dep: &FormulaDependency) -> String {
    match dep.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(kind) => format!("depends_on {} => :{kind}", quote(&dep.name)),
        None => format!("depends_on {}", quote(&dep.name)),
    }
}

fn write_def(w: &mut RubyWriter, method: &str, body: &str) {
    if body.trim().is_empty() {
        return;
    }
    w.section_break();
    w.open(format!("def {method}"));
    w.lines(body);
    w.close();
}

fn write_do_block(w: &mut RubyWriter, block: &str, body: &str) {
    if body.trim().is_empty() {
        return;
    }
    w.section_break();
    w.open(format!("{block} do"));
    w.lines(body);
    w.close();
}
