//! Shared document model for line-oriented parameter files.
//!
//! Every codec decodes a file into ordered header lines, ordered keyed data
//! records, ordered footer lines, and a trailing-newline flag. Records keep
//! their verbatim original text so that an encode where nothing changed can
//! fall back to it and reproduce the file byte-for-byte.

use crate::error::Result;

/// A decoded parameter file: verbatim surrounding text plus keyed records.
///
/// The record payload varies per codec; the shared invariant is that
/// rendering header + records + footer, joined by newlines with the
/// trailing-newline flag applied, reconstructs a complete valid file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<R> {
    pub header: Vec<String>,
    pub records: Vec<R>,
    pub footer: Vec<String>,
    pub trailing_newline: bool,
}

impl<R> Document<R> {
    pub fn new(trailing_newline: bool) -> Self {
        Document {
            header: Vec::new(),
            records: Vec::new(),
            footer: Vec::new(),
            trailing_newline,
        }
    }

    /// Render the document, producing each record line through `render`.
    ///
    /// Records stay in original file order; header and footer are emitted
    /// verbatim.
    pub fn try_render_with<F>(&self, mut render: F) -> Result<String>
    where
        F: FnMut(&R) -> Result<String>,
    {
        let mut lines: Vec<String> = Vec::with_capacity(
            self.header.len() + self.records.len() + self.footer.len(),
        );
        lines.extend(self.header.iter().cloned());
        for record in &self.records {
            lines.push(render(record)?);
        }
        lines.extend(self.footer.iter().cloned());
        Ok(join_lines(&lines, self.trailing_newline))
    }
}

impl<R> Default for Document<R> {
    fn default() -> Self {
        Document::new(true)
    }
}

/// Split file text into lines, remembering whether it ended with a newline.
pub fn split_lines(text: &str) -> (Vec<&str>, bool) {
    let trailing_newline = text.ends_with('\n');
    (text.lines().collect(), trailing_newline)
}

/// Join lines with `\n`, appending a final newline only when the original
/// file had one.
pub fn join_lines<S: AsRef<str>>(lines: &[S], trailing_newline: bool) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line.as_ref());
        if i < lines.len() - 1 || trailing_newline {
            out.push('\n');
        }
    }
    out
}
