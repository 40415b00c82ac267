//! Download parameter serialization.
//!
//! Turns [`UrlParams`] into the keyword arguments that follow a `url`
//! stanza. Clauses are emitted in a fixed order (verified, using, cookies,
//! referer, headers, user agent, data), one per line, each introduced by the
//! comma that terminates the previous clause:
//!
//! ```ruby
//! url "https://example.com/tool.tar.gz",
//!   verified: "example.com",
//!   using: :post
//! ```
//!
//! Values are emitted verbatim so that Ruby interpolation written by the
//! release author (e.g. `#{ENV["TOKEN"]}` in a header) survives.

use crate::writer::pad;
use std::collections::BTreeMap;
use std::fmt::Write;
use tapsmith_release::{ManifestKind, UrlParams};

/// Serializes download parameters for a `url` line written at `depth`.
///
/// Returns an empty string when no parameter is set. Otherwise the result
/// starts with `,` and is meant to be appended directly after the quoted URL.
#[must_use]
pub fn serialize_params(params: &UrlParams, kind: ManifestKind, depth: usize) -> String {
    let clause_pad = pad(depth + 1);
    let item_pad = pad(depth + 2);
    let mut clauses: Vec<String> = Vec::new();

    if let Some(verified) = present(params.verified.as_deref()) {
        clauses.push(format!("verified: \"{verified}\""));
    }
    if let Some(using) = present(params.using.as_deref()) {
        clauses.push(format!("using: {using}"));
    }
    if !params.cookies.is_empty() {
        clauses.push(hash_clause("cookies", &params.cookies, &clause_pad, &item_pad));
    }
    if let Some(referer) = present(params.referer.as_deref()) {
        clauses.push(format!("referer: \"{referer}\""));
    }
    if !params.headers.is_empty() {
        let mut clause = format!("{}: [\n", headers_key(kind));
        for header in &params.headers {
            let _ = writeln!(clause, "{item_pad}\"{header}\",");
        }
        clause.push_str(&clause_pad);
        clause.push(']');
        clauses.push(clause);
    }
    if let Some(user_agent) = present(params.user_agent.as_deref()) {
        clauses.push(format!("user_agent: \"{user_agent}\""));
    }
    if !params.data.is_empty() {
        clauses.push(hash_clause("data", &params.data, &clause_pad, &item_pad));
    }

    clauses
        .iter()
        .map(|clause| format!(",\n{clause_pad}{clause}"))
        .collect()
}

/// The header list keyword differs between the two DSLs.
const fn headers_key(kind: ManifestKind) -> &'static str {
    match kind {
        ManifestKind::Formula => "headers",
        ManifestKind::Cask => "header",
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn hash_clause(
    key: &str,
    entries: &BTreeMap<String, String>,
    clause_pad: &str,
    item_pad: &str,
) -> String {
    let mut clause = format!("{key}: {{\n");
    for (k, v) in entries {
        let _ = writeln!(clause, "{item_pad}\"{k}\" => \"{v}\",");
    }
    clause.push_str(clause_pad);
    clause.push('}');
    clause
}
