//! Strict 97-column codec for the level-density systematics table
//! (`kcksyst.dat`).
//!
//! The external reader extracts every field with positional `substr` calls
//! and no length checking, so each data line must be exactly 97 characters:
//! Z[0:5] A[5:11], two 13-wide scientific fields, six 10-wide fixed fields.
//! Scale factors are keyed by stability class, not by nuclide: each record
//! picks the `STAB_*` or `UNSTAB_*` factor group from its classification.

use cgmf_model::{ScaleSet, Stability, classify};

use crate::document::{Document, split_lines};
use crate::error::{CodecError, Result};
use crate::fmt::sci_lower;
use crate::section::Section;

/// The eight scalable fields, in column order after Z and A.
pub const FIELD_NAMES: [&str; 8] = [
    "Pairing", "Eshell", "Ematch", "astar", "T", "E0", "Tsys", "E0sys",
];

/// Column layout: (start, width) per field, after Z[0:5] and A[5:11].
const FIELD_COLUMNS: [(usize, usize); 8] = [
    (11, 13), // Pairing, scientific
    (24, 13), // Eshell, scientific
    (37, 10), // Ematch
    (47, 10), // astar
    (57, 10), // T
    (67, 10), // E0
    (77, 10), // Tsys
    (87, 10), // E0sys
];

const LINE_WIDTH: usize = 97;

/// One isotope row of the systematics table.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDensityRecord {
    pub z: u32,
    pub a: u32,
    /// Field values in [`FIELD_NAMES`] order.
    pub fields: [f64; 8],
    pub stability: Stability,
    comment: String,
    original: String,
}

impl LevelDensityRecord {
    /// Named field lookup in column order.
    pub fn field(&self, name: &str) -> Option<f64> {
        FIELD_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.fields[i])
    }
}

pub type LevelDensityDocument = Document<LevelDensityRecord>;

fn slice(line: &str, start: usize, width: usize) -> Option<&str> {
    line.get(start..start + width)
}

fn parse_record(line: &str) -> Option<LevelDensityRecord> {
    let z: u32 = slice(line, 0, 5)?.trim().parse().ok()?;
    let a: u32 = slice(line, 5, 6)?.trim().parse().ok()?;

    let mut fields = [0.0; 8];
    for (value, (start, width)) in fields.iter_mut().zip(FIELD_COLUMNS) {
        *value = slice(line, start, width)?.trim().parse().ok()?;
    }

    // Anything past column 97 is an annotation the reader never sees.
    let comment = line
        .get(LINE_WIDTH..)
        .and_then(|rest| rest.find('#').map(|i| rest[i..].to_string()))
        .unwrap_or_default();

    Some(LevelDensityRecord {
        z,
        a,
        fields,
        stability: classify(z, a),
        comment,
        original: line.to_string(),
    })
}

/// Parse the systematics table.
///
/// Lines before the first parseable data line are header; a blank line or a
/// line that fails positional parsing after data has begun ends the data
/// section, and everything from it on is footer.
pub fn decode(text: &str) -> Result<LevelDensityDocument> {
    let (lines, trailing_newline) = split_lines(text);
    let mut doc = LevelDensityDocument::new(trailing_newline);
    let mut section = Section::default();

    for line in lines {
        if section.is_before_data() {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                doc.header.push(line.to_string());
                continue;
            }
        }
        if section.is_after_data() {
            doc.footer.push(line.to_string());
            continue;
        }
        if section.is_in_data() && line.trim().is_empty() {
            section.end_data();
            doc.footer.push(line.to_string());
            continue;
        }

        match parse_record(line) {
            Some(record) => {
                section.begin_data();
                doc.records.push(record);
            }
            None => {
                // First non-header line that fails positional parsing; the
                // data section (possibly empty) is over.
                section.begin_data();
                section.end_data();
                doc.footer.push(line.to_string());
            }
        }
    }

    tracing::debug!(
        isotopes = doc.records.len(),
        stable = doc
            .records
            .iter()
            .filter(|r| r.stability == Stability::Stable)
            .count(),
        "decoded level-density table"
    );
    Ok(doc)
}

/// Render the table with stability-grouped scale factors applied.
///
/// Records whose scaled fields are all numerically unchanged are emitted
/// verbatim; a rewritten line is checked to be exactly 97 characters before
/// anything is returned.
pub fn encode(doc: &LevelDensityDocument, scales: &ScaleSet) -> Result<String> {
    doc.try_render_with(|record| {
        let mut scaled = record.fields;
        for (value, name) in scaled.iter_mut().zip(FIELD_NAMES) {
            *value *= scales.factor_for(record.stability, name);
        }

        let unchanged = scaled
            .iter()
            .zip(record.fields)
            .all(|(s, o)| cgmf_model::is_unchanged(o, *s));
        if unchanged {
            return Ok(record.original.clone());
        }

        let line = format!(
            "{:5}{:6}{:>13}{:>13}{:>10.5}{:>10.5}{:>10.5}{:>10.5}{:>10.5}{:>10.5}",
            record.z,
            record.a,
            sci_lower(scaled[0], 5),
            sci_lower(scaled[1], 5),
            scaled[2],
            scaled[3],
            scaled[4],
            scaled[5],
            scaled[6],
            scaled[7],
        );
        if line.len() != LINE_WIDTH {
            return Err(CodecError::width_violation(LINE_WIDTH, line));
        }
        Ok(format!("{line}{}", record.comment))
    })
}
