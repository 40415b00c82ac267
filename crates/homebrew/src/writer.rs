//! Indentation-aware Ruby line writer.
//!
//! All renderers emit through [`RubyWriter`] so nesting depth is tracked in
//! one place and no line ever carries trailing whitespace.

use std::fmt::Write;

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Returns the padding for `depth` levels of indentation.
#[must_use]
pub fn pad(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Accumulates Ruby source line by line at a tracked nesting depth.
#[derive(Debug, Default)]
pub struct RubyWriter {
    out: String,
    depth: usize,
    at_block_start: bool,
}

impl RubyWriter {
    /// Creates a writer starting at `depth`.
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            out: String::new(),
            depth,
            at_block_start: true,
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Writes one line at the current depth.
    ///
    /// Text may contain embedded newlines that already carry their own
    /// indentation (parameter fragments do); only the first line is padded.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref().trim_end();
        if text.is_empty() {
            self.out.push('\n');
        } else {
            let _ = writeln!(self.out, "{}{}", pad(self.depth), text);
        }
        self.at_block_start = false;
    }

    /// Writes each line of a multi-line string at the current depth.
    ///
    /// Leading and trailing blank lines of `text` are dropped.
    pub fn lines(&mut self, text: &str) {
        for line in split_lines(text) {
            self.line(line);
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
        self.at_block_start = true;
    }

    /// Writes an empty line unless one was just written or a block just opened.
    pub fn section_break(&mut self) {
        if !self.at_block_start {
            self.blank();
        }
    }

    /// Writes a block header and indents.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(header);
        self.depth += 1;
        self.at_block_start = true;
    }

    /// Dedents and writes `end`.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("end");
    }

    /// Writes a squiggly heredoc (`<<~EOS` … `EOS`) holding `text`.
    pub fn heredoc(&mut self, text: &str) {
        self.stanza_heredoc("", text);
    }

    /// Writes `stanza <<~EOS` followed by the heredoc body.
    pub fn stanza_heredoc(&mut self, stanza: &str, text: &str) {
        self.line(format!("{stanza} <<~EOS").trim_start());
        self.depth += 1;
        self.lines(text);
        self.depth -= 1;
        self.line("EOS");
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Splits configuration text into lines, ignoring surrounding blank lines.
///
/// An empty or whitespace-only input yields no lines.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let trimmed = text.trim_matches(|c| c == '\n' || c == '\r');
    if trimmed.trim().is_empty() {
        return Vec::new();
    }
    trimmed.lines().collect()
}

/// Quotes a literal value as a Ruby double-quoted string.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '#' => quoted.push_str("\\#"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
