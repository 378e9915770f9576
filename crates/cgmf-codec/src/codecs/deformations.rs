//! Fixed-position codec for the ground-state deformation table
//! (`deformations.dat`).
//!
//! Z and A sit at [0:4] and [4:8]; the beta2 value occupies a 7-character
//! field starting at column 44. The external reader tests presence by
//! checking that character 6 of the substring from column 44 is non-blank,
//! so that exact test is replicated here. Rows key directly on
//! `ZAID = Z*1000 + A` with no compound-nucleus arithmetic, and a row with
//! `Z > 99` terminates the data section.

use cgmf_model::{ScaleSet, Stability, Zaid, classify, is_unchanged};

use crate::document::{Document, split_lines};
use crate::error::{CodecError, Result};
use crate::section::Section;

const BETA2_START: usize = 44;
const BETA2_WIDTH: usize = 7;
const BETA2_CHECK: usize = 6;

/// One nucleus row of the deformation table.
#[derive(Debug, Clone, PartialEq)]
pub struct DeformationRecord {
    pub z: u32,
    pub a: u32,
    /// Absent when the presence check at column 44+6 finds a blank.
    pub beta2: Option<f64>,
    pub stability: Stability,
    original: String,
}

impl DeformationRecord {
    pub fn zaid(&self) -> Zaid {
        Zaid::from_za(self.z, self.a)
    }
}

pub type DeformationDocument = Document<DeformationRecord>;

enum Parsed {
    Record(Box<DeformationRecord>),
    /// A parseable row with Z > 99; terminates the data section.
    EndMarker,
    NotData,
}

fn parse_line(line: &str, line_num: usize) -> Parsed {
    let Some(z) = line.get(..4).and_then(|s| s.trim().parse::<u32>().ok()) else {
        return Parsed::NotData;
    };
    let Some(a) = line.get(4..8).and_then(|s| s.trim().parse::<u32>().ok()) else {
        return Parsed::NotData;
    };
    if z > 99 {
        return Parsed::EndMarker;
    }

    let beta2 = match line.as_bytes().get(BETA2_START + BETA2_CHECK) {
        Some(b' ') | None => None,
        Some(_) => {
            let field = line
                .get(BETA2_START..BETA2_START + BETA2_WIDTH)
                .unwrap_or("")
                .trim();
            match field.parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(line = line_num, field, "unparseable beta2 field");
                    None
                }
            }
        }
    };

    Parsed::Record(Box::new(DeformationRecord {
        z,
        a,
        beta2,
        stability: classify(z, a),
        original: line.to_string(),
    }))
}

/// Parse the deformation table.
pub fn decode(text: &str) -> Result<DeformationDocument> {
    let (lines, trailing_newline) = split_lines(text);
    let mut doc = DeformationDocument::new(trailing_newline);
    let mut section = Section::default();

    for (index, line) in lines.iter().enumerate() {
        if section.is_before_data() {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                doc.header.push((*line).to_string());
                continue;
            }
        }
        if section.is_after_data() {
            doc.footer.push((*line).to_string());
            continue;
        }
        if section.is_in_data() && line.trim().is_empty() {
            section.end_data();
            doc.footer.push((*line).to_string());
            continue;
        }

        match parse_line(line, index + 1) {
            Parsed::Record(record) => {
                section.begin_data();
                doc.records.push(*record);
            }
            Parsed::EndMarker | Parsed::NotData => {
                section.begin_data();
                section.end_data();
                doc.footer.push((*line).to_string());
            }
        }
    }

    tracing::debug!(
        nuclei = doc.records.len(),
        missing_beta2 = doc.records.iter().filter(|r| r.beta2.is_none()).count(),
        "decoded deformation table"
    );
    Ok(doc)
}

/// Render the table with `STAB_beta2` / `UNSTAB_beta2` factors applied.
///
/// Only the beta2 field is rewritten; every other column of a modified line
/// keeps its original bytes. The rewritten field must come out exactly
/// 7 characters wide or the encode aborts.
pub fn encode(doc: &DeformationDocument, scales: &ScaleSet) -> Result<String> {
    doc.try_render_with(|record| {
        let Some(beta2) = record.beta2 else {
            return Ok(record.original.clone());
        };
        let scaled = beta2 * scales.factor_for(record.stability, "beta2");
        if is_unchanged(beta2, scaled) {
            return Ok(record.original.clone());
        }

        let field = format!("{scaled:>7.3}");
        if field.len() != BETA2_WIDTH {
            return Err(CodecError::width_violation(BETA2_WIDTH, field));
        }
        let prefix = record.original.get(..BETA2_START).unwrap_or_default();
        let suffix = record
            .original
            .get(BETA2_START + BETA2_WIDTH..)
            .unwrap_or_default();
        Ok(format!("{prefix}{field}{suffix}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Columns: Z[0:4] A[4:8], element/flag/mass columns, beta2 at [44:51].
    fn row(z: u32, a: u32, beta2: &str) -> String {
        let line = format!(
            "{z:4}{a:4} XX 0   0.000000   0.000000   0.0000{beta2}  0.000  0.000"
        );
        assert_eq!(&line[44..51], beta2);
        line
    }

    fn sample() -> String {
        format!(
            "# FRDM95 ground-state deformations\n{}\n{}\n{}\n",
            row(8, 16, "  0.010"),
            row(92, 235, "  0.215"),
            row(30, 100, " -0.105"),
        )
    }

    #[test]
    fn identity_round_trip() {
        let text = sample();
        let doc = decode(&text).expect("decode");
        assert_eq!(doc.records.len(), 3);
        assert_eq!(encode(&doc, &ScaleSet::new()).expect("encode"), text);
    }

    #[test]
    fn zaid_is_direct_with_no_compound_arithmetic() {
        let doc = decode(&sample()).expect("decode");
        assert_eq!(doc.records[0].zaid(), Zaid(8016));
        assert_eq!(doc.records[1].zaid(), Zaid(92235));
    }

    #[test]
    fn missing_beta2_row_is_kept_verbatim() {
        let text = format!("{}\n", row(8, 17, "       "));
        let doc = decode(&text).expect("decode");
        assert_eq!(doc.records[0].beta2, None);
        let scales = ScaleSet::new()
            .with("STAB_beta2", 2.0)
            .with("UNSTAB_beta2", 2.0);
        assert_eq!(encode(&doc, &scales).expect("encode"), text);
    }

    #[test]
    fn scaling_splices_beta2_in_place() {
        let text = sample();
        let doc = decode(&text).expect("decode");
        let scales = ScaleSet::new().with("UNSTAB_beta2", 2.0);
        let out = encode(&doc, &scales).expect("encode");

        // Only the unstable (30, 100) row changes.
        let before: Vec<&str> = text.lines().collect();
        let after: Vec<&str> = out.lines().collect();
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2], before[2]);
        assert_eq!(&after[3][..44], &before[3][..44]);
        assert_eq!(&after[3][44..51], " -0.210");
        assert_eq!(&after[3][51..], &before[3][51..]);
    }

    #[test]
    fn z_above_99_terminates_the_data_section() {
        let text = format!("{}\n{}\n", row(92, 235, "  0.215"), row(104, 260, "  0.300"));
        let doc = decode(&text).expect("decode");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.footer.len(), 1);
        assert_eq!(encode(&doc, &ScaleSet::new()).expect("encode"), text);
    }
}
