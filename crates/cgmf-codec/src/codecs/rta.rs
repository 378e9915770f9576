//! Hybrid fixed-prefix + array codec for the mass-ratio table (`rta.dat`).
//!
//! Each data line carries an 18-character positional prefix (ZAID[0:7],
//! Amin[7:12], Amax[12:18]) followed by a whitespace-delimited R_T(A)
//! array starting at column 18. The external reader takes `substr(18)` for
//! the array, so a rewritten prefix must occupy exactly 18 characters.
//! Rows key on the signed ZAID as stored; the spontaneous-fission sign
//! convention applies directly and no compound resolution is involved.

use cgmf_model::{Zaid, is_unchanged};

use crate::document::{Document, split_lines};
use crate::error::{CodecError, Result};
use crate::section::Section;

const PREFIX_WIDTH: usize = 18;

/// One isotope's R_T(A) array with its declared mass range.
#[derive(Debug, Clone, PartialEq)]
pub struct RtaRecord {
    pub zaid: Zaid,
    pub amin: i32,
    pub amax: i32,
    pub values: Vec<f64>,
    comment: String,
    original: String,
}

pub type RtaDocument = Document<RtaRecord>;

impl RtaDocument {
    /// Find the record stored under `zaid`, if present.
    pub fn record(&self, zaid: Zaid) -> Option<&RtaRecord> {
        self.records.iter().find(|r| r.zaid == zaid)
    }

    fn available(&self) -> impl Iterator<Item = i32> + '_ {
        self.records.iter().map(|r| r.zaid.value())
    }
}

fn parse_record(line: &str, line_num: usize) -> Option<RtaRecord> {
    if line.len() < PREFIX_WIDTH {
        return None;
    }
    let zaid: i32 = line.get(..7)?.trim().parse().ok()?;
    let amin: i32 = line.get(7..12)?.trim().parse().ok()?;
    let amax: i32 = line.get(12..18)?.trim().parse().ok()?;

    let rest = line.get(PREFIX_WIDTH..).unwrap_or_default();
    let (array_text, comment) = match rest.find('#') {
        Some(i) => (&rest[..i], rest[i..].to_string()),
        None => (rest, String::new()),
    };
    let mut values = Vec::new();
    for token in array_text.split_whitespace() {
        values.push(token.parse::<f64>().ok()?);
    }

    let expected = (amax - amin + 1).max(0) as usize;
    if values.len() != expected {
        // Tolerated: the external reader never validates this either.
        tracing::warn!(
            line = line_num,
            zaid,
            amin,
            amax,
            expected,
            actual = values.len(),
            "R_T(A) array length does not match declared mass range"
        );
    }

    Some(RtaRecord {
        zaid: Zaid(zaid),
        amin,
        amax,
        values,
        comment,
        original: line.to_string(),
    })
}

/// Parse the mass-ratio table.
pub fn decode(text: &str) -> Result<RtaDocument> {
    let (lines, trailing_newline) = split_lines(text);
    let mut doc = RtaDocument::new(trailing_newline);
    let mut section = Section::default();

    for (index, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            if section.is_before_data() {
                doc.header.push((*line).to_string());
            } else {
                doc.footer.push((*line).to_string());
            }
            continue;
        }
        if section.is_after_data() {
            doc.footer.push((*line).to_string());
            continue;
        }

        match parse_record(line, index + 1) {
            Some(record) => {
                section.begin_data();
                doc.records.push(record);
            }
            None => {
                if section.is_before_data() {
                    doc.header.push((*line).to_string());
                } else {
                    section.end_data();
                    doc.footer.push((*line).to_string());
                }
            }
        }
    }

    tracing::debug!(isotopes = doc.records.len(), "decoded mass-ratio table");
    Ok(doc)
}

/// Render the table with one uniform factor over the target's array.
///
/// All sibling records are emitted verbatim; the rewritten prefix is checked
/// against its 18-character contract before anything is returned.
pub fn encode(doc: &RtaDocument, target: Zaid, scale: f64) -> Result<String> {
    if doc.record(target).is_none() {
        return Err(CodecError::target_not_found(
            target.value(),
            doc.available().collect::<Vec<_>>(),
        ));
    }

    doc.try_render_with(|record| {
        if record.zaid != target {
            return Ok(record.original.clone());
        }
        let scaled: Vec<f64> = record.values.iter().map(|v| v * scale).collect();
        let unchanged = is_unchanged(1.0, scale)
            && scaled
                .iter()
                .zip(&record.values)
                .all(|(s, o)| is_unchanged(*o, *s));
        if unchanged {
            return Ok(record.original.clone());
        }

        let prefix = format!(
            "{:>7}{:>5}{:>6}",
            record.zaid.value(),
            record.amin,
            record.amax
        );
        if prefix.len() != PREFIX_WIDTH {
            return Err(CodecError::width_violation(PREFIX_WIDTH, prefix));
        }
        let array = scaled
            .iter()
            .map(|v| format!("{v:.6}"))
            .collect::<Vec<_>>()
            .join(" ");
        let mut line = format!("{prefix} {array}");
        if !record.comment.is_empty() {
            line.push(' ');
            line.push_str(&record.comment);
        }
        Ok(line)
    })
}
