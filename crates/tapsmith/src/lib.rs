// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

//! tapsmith - Homebrew manifest rendering from release descriptions
//!
//! The binary wraps two commands:
//!
//! - `tapsmith render <release-file>` writes a formula or cask
//! - `tapsmith check <release-file>` validates the artifacts and summarizes them
//!
//! Both are exposed here so they can be driven from tests or other tools with
//! any [`std::io::Write`] sink.

// CLI errors are reported on stderr through miette
#![allow(clippy::print_stderr)]

/// CLI argument parsing and exit codes.
pub mod cli;
/// Command implementations.
pub mod commands;

pub use cli::{Cli, CliError, Commands};
pub use commands::{RenderOptions, execute_check, execute_render};
