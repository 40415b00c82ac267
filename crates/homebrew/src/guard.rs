//! Architecture guards.
//!
//! Maps an artifact's architecture to the conditional construct that limits
//! it to matching hosts. Two encodings exist:
//!
//! - inline boolean: `if Hardware::CPU.intel?` … `end`
//! - named block: `on_intel do` … `end`, `on_arm do` … `end`, with a nested
//!   bitness `if` when 32-bit and 64-bit arm builds share a platform
//!
//! There is no named block for 32-bit arm, so a Linux `arm` artifact keeps
//! its inline guard under either encoding.
//!
//! Guards of one platform are pairwise disjoint: [`Guard::admits`] evaluates a
//! guard against a simulated host, and for any valid package set at most one
//! guard admits any [`Cpu`].

use crate::writer::RubyWriter;
use tapsmith_release::{Arch, GuardEncoding, PackageSet, Platform};

/// CPU family of a simulated host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuFamily {
    /// Intel/AMD
    Intel,
    /// ARM
    Arm,
}

/// A simulated install host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpu {
    /// CPU family.
    pub family: CpuFamily,
    /// Whether the host runs a 64-bit userland.
    pub is_64_bit: bool,
}

impl Cpu {
    /// Every family/bitness combination.
    pub const ALL: [Self; 4] = [
        Self::new(CpuFamily::Intel, true),
        Self::new(CpuFamily::Intel, false),
        Self::new(CpuFamily::Arm, true),
        Self::new(CpuFamily::Arm, false),
    ];

    /// Creates a simulated host.
    #[must_use]
    pub const fn new(family: CpuFamily, is_64_bit: bool) -> Self {
        Self { family, is_64_bit }
    }
}

/// A boolean condition over `Hardware::CPU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Intel/AMD host.
    Intel,
    /// Any ARM host.
    Arm,
    /// 64-bit ARM host.
    Arm64,
    /// 32-bit ARM host.
    Arm32,
    /// 64-bit host of the enclosing family.
    Is64Bit,
}

impl Condition {
    /// Returns the Ruby expression for this condition.
    #[must_use]
    pub const fn ruby(&self) -> &'static str {
        match self {
            Self::Intel => "Hardware::CPU.intel?",
            Self::Arm => "Hardware::CPU.arm?",
            Self::Arm64 => "Hardware::CPU.arm? and Hardware::CPU.is_64_bit?",
            Self::Arm32 => "Hardware::CPU.arm? and !Hardware::CPU.is_64_bit?",
            Self::Is64Bit => "Hardware::CPU.is_64_bit?",
        }
    }

    /// Evaluates the condition on a simulated host.
    #[must_use]
    pub fn holds(&self, cpu: &Cpu) -> bool {
        match self {
            Self::Intel => cpu.family == CpuFamily::Intel,
            Self::Arm => cpu.family == CpuFamily::Arm,
            Self::Arm64 => cpu.family == CpuFamily::Arm && cpu.is_64_bit,
            Self::Arm32 => cpu.family == CpuFamily::Arm && !cpu.is_64_bit,
            Self::Is64Bit => cpu.is_64_bit,
        }
    }
}

/// A named architecture block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedBlock {
    /// `on_intel do`
    OnIntel,
    /// `on_arm do`
    OnArm,
}

impl NamedBlock {
    /// Returns the DSL method name.
    #[must_use]
    pub const fn ruby(&self) -> &'static str {
        match self {
            Self::OnIntel => "on_intel",
            Self::OnArm => "on_arm",
        }
    }

    /// Evaluates the block's implied condition on a simulated host.
    #[must_use]
    pub fn holds(&self, cpu: &Cpu) -> bool {
        match self {
            Self::OnIntel => Condition::Intel.holds(cpu),
            Self::OnArm => Condition::Arm.holds(cpu),
        }
    }
}

/// The conditional construct wrapped around one artifact block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// No guard: the block applies on every host.
    Unguarded,
    /// `if <condition>` … `end`
    Inline(Condition),
    /// `on_<arch> do` … `end`
    Named(NamedBlock),
    /// `on_<arch> do` / `if <condition>` … `end` / `end`
    NamedWithBitness(NamedBlock, Condition),
}

impl Guard {
    /// The guard used for the unsupported-architecture caveat.
    #[must_use]
    pub const fn arm_caveat(encoding: GuardEncoding) -> Self {
        match encoding {
            GuardEncoding::InlineBoolean => Self::Inline(Condition::Arm),
            GuardEncoding::NamedBlock => Self::Named(NamedBlock::OnArm),
        }
    }

    /// Evaluates the guard on a simulated host.
    #[must_use]
    pub fn admits(&self, cpu: &Cpu) -> bool {
        match self {
            Self::Unguarded => true,
            Self::Inline(condition) => condition.holds(cpu),
            Self::Named(block) => block.holds(cpu),
            Self::NamedWithBitness(block, condition) => block.holds(cpu) && condition.holds(cpu),
        }
    }

    /// Number of nesting levels this guard adds.
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::Unguarded => 0,
            Self::Inline(_) | Self::Named(_) => 1,
            Self::NamedWithBitness(..) => 2,
        }
    }

    /// Writes the opening lines and indents.
    pub fn open(&self, w: &mut RubyWriter) {
        match self {
            Self::Unguarded => {}
            Self::Inline(condition) => w.open(format!("if {}", condition.ruby())),
            Self::Named(block) => w.open(format!("{} do", block.ruby())),
            Self::NamedWithBitness(block, condition) => {
                w.open(format!("{} do", block.ruby()));
                w.open(format!("if {}", condition.ruby()));
            }
        }
    }

    /// Dedents and writes the closing lines.
    pub fn close(&self, w: &mut RubyWriter) {
        for _ in 0..self.depth() {
            w.close();
        }
    }
}

/// Resolves artifact architectures to guards for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardResolver {
    platform: Platform,
    encoding: GuardEncoding,
    has_arm32_sibling: bool,
}

impl GuardResolver {
    /// Creates a resolver.
    ///
    /// `has_arm32_sibling` tells whether the platform also ships a 32-bit
    /// `arm` artifact, which forces a bitness check on the 64-bit one under
    /// the named-block encoding.
    #[must_use]
    pub const fn new(platform: Platform, encoding: GuardEncoding, has_arm32_sibling: bool) -> Self {
        Self {
            platform,
            encoding,
            has_arm32_sibling,
        }
    }

    /// Creates a resolver for one platform of a package set.
    #[must_use]
    pub fn for_package_set(set: &PackageSet, platform: Platform, encoding: GuardEncoding) -> Self {
        Self::new(platform, encoding, set.has_arch(platform, Arch::Arm))
    }

    /// Returns the guard for an artifact of the given architecture.
    #[must_use]
    pub const fn resolve(&self, arch: Arch) -> Guard {
        match (arch, self.encoding) {
            (Arch::All, _) => Guard::Unguarded,
            (Arch::Amd64, GuardEncoding::InlineBoolean) => Guard::Inline(Condition::Intel),
            (Arch::Amd64, GuardEncoding::NamedBlock) => Guard::Named(NamedBlock::OnIntel),
            (Arch::Arm, _) => Guard::Inline(Condition::Arm32),
            (Arch::Arm64, GuardEncoding::InlineBoolean) => match self.platform {
                Platform::MacOs => Guard::Inline(Condition::Arm),
                Platform::Linux => Guard::Inline(Condition::Arm64),
            },
            (Arch::Arm64, GuardEncoding::NamedBlock) => {
                if self.has_arm32_sibling {
                    Guard::NamedWithBitness(NamedBlock::OnArm, Condition::Is64Bit)
                } else {
                    Guard::Named(NamedBlock::OnArm)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODINGS: [GuardEncoding; 2] = [GuardEncoding::InlineBoolean, GuardEncoding::NamedBlock];

    fn render(guard: Guard) -> String {
        let mut w = RubyWriter::new(1);
        guard.open(&mut w);
        w.line("url \"x\"");
        guard.close(&mut w);
        w.finish()
    }

    #[test]
    fn test_all_is_unguarded() {
        for encoding in ENCODINGS {
            for platform in Platform::all() {
                let resolver = GuardResolver::new(*platform, encoding, false);
                assert_eq!(resolver.resolve(Arch::All), Guard::Unguarded);
            }
        }
    }

    #[test]
    fn test_inline_guards() {
        let mac = GuardResolver::new(Platform::MacOs, GuardEncoding::InlineBoolean, false);
        assert_eq!(mac.resolve(Arch::Amd64), Guard::Inline(Condition::Intel));
        assert_eq!(mac.resolve(Arch::Arm64), Guard::Inline(Condition::Arm));

        let linux = GuardResolver::new(Platform::Linux, GuardEncoding::InlineBoolean, true);
        assert_eq!(linux.resolve(Arch::Amd64), Guard::Inline(Condition::Intel));
        assert_eq!(linux.resolve(Arch::Arm64), Guard::Inline(Condition::Arm64));
        assert_eq!(linux.resolve(Arch::Arm), Guard::Inline(Condition::Arm32));
    }

    #[test]
    fn test_named_guards() {
        let linux = GuardResolver::new(Platform::Linux, GuardEncoding::NamedBlock, false);
        assert_eq!(linux.resolve(Arch::Amd64), Guard::Named(NamedBlock::OnIntel));
        assert_eq!(linux.resolve(Arch::Arm64), Guard::Named(NamedBlock::OnArm));
    }

    #[test]
    fn test_named_arm64_nests_bitness_with_arm32_sibling() {
        let linux = GuardResolver::new(Platform::Linux, GuardEncoding::NamedBlock, true);
        assert_eq!(
            linux.resolve(Arch::Arm64),
            Guard::NamedWithBitness(NamedBlock::OnArm, Condition::Is64Bit)
        );
    }

    #[test]
    fn test_linux_arm32_stays_inline_under_named_encoding() {
        let linux = GuardResolver::new(Platform::Linux, GuardEncoding::NamedBlock, true);
        assert_eq!(linux.resolve(Arch::Arm), Guard::Inline(Condition::Arm32));
    }

    #[test]
    fn test_arm_and_arm64_are_disjoint() {
        for encoding in ENCODINGS {
            let resolver = GuardResolver::new(Platform::Linux, encoding, true);
            let guards = [
                resolver.resolve(Arch::Amd64),
                resolver.resolve(Arch::Arm64),
                resolver.resolve(Arch::Arm),
            ];
            for cpu in Cpu::ALL {
                let admitted = guards.iter().filter(|g| g.admits(&cpu)).count();
                assert!(admitted <= 1, "{encoding}: {cpu:?} admitted by {admitted} guards");
            }
        }
    }

    #[test]
    fn test_every_arm_host_is_covered_on_linux() {
        for encoding in ENCODINGS {
            let resolver = GuardResolver::new(Platform::Linux, encoding, true);
            for cpu in [Cpu::new(CpuFamily::Arm, true), Cpu::new(CpuFamily::Arm, false)] {
                assert!(
                    [Arch::Arm64, Arch::Arm]
                        .iter()
                        .any(|arch| resolver.resolve(*arch).admits(&cpu))
                );
            }
        }
    }

    #[test]
    fn test_render_inline() {
        assert_eq!(
            render(Guard::Inline(Condition::Intel)),
            "  if Hardware::CPU.intel?\n    url \"x\"\n  end\n"
        );
    }

    #[test]
    fn test_render_named_with_bitness() {
        assert_eq!(
            render(Guard::NamedWithBitness(NamedBlock::OnArm, Condition::Is64Bit)),
            "  on_arm do\n    if Hardware::CPU.is_64_bit?\n      url \"x\"\n    end\n  end\n"
        );
    }

    #[test]
    fn test_render_unguarded() {
        assert_eq!(render(Guard::Unguarded), "  url \"x\"\n");
    }

    #[test]
    fn test_arm_caveat_guard() {
        assert_eq!(
            Guard::arm_caveat(GuardEncoding::InlineBoolean),
            Guard::Inline(Condition::Arm)
        );
        assert_eq!(
            Guard::arm_caveat(GuardEncoding::NamedBlock),
            Guard::Named(NamedBlock::OnArm)
        );
    }
}
