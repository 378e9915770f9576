//! Whitespace-stream codec for the spin-scaling parameters
//! (`spinscalingmodel.dat`).
//!
//! The data section begins at a header line naming the columns (it contains
//! both `ZAID` and an alpha-like token) and every data line tokenizes to
//! exactly three whitespace-separated fields: compound ZAID, alpha_0,
//! alpha_slope. The stored key is the compound nucleus, so lookups go
//! through the target's compound identifier. The external reader streams
//! the ZAID as a double, hence the parse-as-float-then-truncate.

use cgmf_model::{TargetNuclide, Zaid, is_unchanged};

use crate::document::{Document, split_lines};
use crate::error::{CodecError, Result};
use crate::section::Section;

/// One compound nucleus row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinScalingRecord {
    pub zaid: Zaid,
    pub alpha_0: f64,
    pub alpha_slope: f64,
    comment: String,
    original: String,
}

pub type SpinScalingDocument = Document<SpinScalingRecord>;

impl SpinScalingDocument {
    pub fn record(&self, zaid: Zaid) -> Option<&SpinScalingRecord> {
        self.records.iter().find(|r| r.zaid == zaid)
    }
}

fn is_column_header(line: &str) -> bool {
    line.contains("ZAID") && line.contains("alpha")
}

fn parse_record(line: &str) -> Option<SpinScalingRecord> {
    let (data, comment) = match line.find('#') {
        Some(i) => (&line[..i], line[i..].to_string()),
        None => (line, String::new()),
    };
    let tokens: Vec<&str> = data.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }
    // Stream readers store the ZAID as a double; accept that form.
    let zaid = tokens[0].parse::<f64>().ok()? as i32;
    let alpha_0 = tokens[1].parse::<f64>().ok()?;
    let alpha_slope = tokens[2].parse::<f64>().ok()?;
    Some(SpinScalingRecord {
        zaid: Zaid(zaid),
        alpha_0,
        alpha_slope,
        comment,
        original: line.to_string(),
    })
}

/// Parse the spin-scaling file.
pub fn decode(text: &str) -> Result<SpinScalingDocument> {
    let (lines, trailing_newline) = split_lines(text);
    let mut doc = SpinScalingDocument::new(trailing_newline);
    let mut section = Section::default();

    for line in lines {
        if section.is_before_data() {
            doc.header.push(line.to_string());
            if is_column_header(line) {
                section.begin_data();
            }
            continue;
        }
        if section.is_after_data() {
            doc.footer.push(line.to_string());
            continue;
        }

        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            if !doc.records.is_empty() {
                section.end_data();
            }
            doc.footer.push(line.to_string());
            continue;
        }

        match parse_record(line) {
            Some(record) => doc.records.push(record),
            None => {
                section.end_data();
                doc.footer.push(line.to_string());
            }
        }
    }

    tracing::debug!(isotopes = doc.records.len(), "decoded spin-scaling file");
    Ok(doc)
}

/// Render the file with independent factors on the target's two parameters.
pub fn encode(
    doc: &SpinScalingDocument,
    target: TargetNuclide,
    alpha_0_scale: f64,
    alpha_slope_scale: f64,
) -> Result<String> {
    let compound = target.compound();
    if doc.record(compound).is_none() {
        return Err(CodecError::target_not_found(
            compound.value(),
            doc.records.iter().map(|r| r.zaid.value()).collect::<Vec<_>>(),
        ));
    }

    doc.try_render_with(|record| {
        if record.zaid != compound {
            return Ok(record.original.clone());
        }
        let alpha_0 = record.alpha_0 * alpha_0_scale;
        let alpha_slope = record.alpha_slope * alpha_slope_scale;
        if is_unchanged(record.alpha_0, alpha_0) && is_unchanged(record.alpha_slope, alpha_slope)
        {
            return Ok(record.original.clone());
        }

        let mut line = format!(
            "{:>6} {:>5.2} {:>6.3}",
            record.zaid.value(),
            alpha_0,
            alpha_slope
        );
        if !record.comment.is_empty() {
            line.push(' ');
            line.push_str(&record.comment);
        }
        Ok(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> String {
        "# spin scaling model\n\
         # ZAID  alpha_0  alpha_slope\n\
         \u{20}92236  1.70  0.050\n\
         \u{20}94240  1.65  0.040\n\
         -98252  1.60  0.030\n"
            .to_string()
    }

    #[test]
    fn identity_round_trip() {
        let text = sample();
        let doc = decode(&text).expect("decode");
        assert_eq!(doc.records.len(), 3);
        let out = encode(&doc, TargetNuclide::new(92235), 1.0, 1.0).expect("encode");
        assert_eq!(out, text);
    }

    #[test]
    fn data_starts_after_the_column_header_line() {
        let doc = decode(&sample()).expect("decode");
        assert_eq!(doc.header.len(), 2);
        assert_eq!(doc.records[0].zaid, Zaid(92236));
    }

    #[test]
    fn lookup_goes_through_the_compound_nucleus() {
        let doc = decode(&sample()).expect("decode");
        // Target 92235 resolves to stored key 92236.
        let out = encode(&doc, TargetNuclide::new(92235), 1.1, 1.0).expect("encode");
        let reread = decode(&out).expect("reread");
        let record = reread.record(Zaid(92236)).expect("record");
        assert!((record.alpha_0 - 1.87).abs() < 1e-9);
        assert!((record.alpha_slope - 0.05).abs() < 1e-9);
    }

    #[test]
    fn spontaneous_fission_key_is_used_unchanged() {
        let doc = decode(&sample()).expect("decode");
        let out = encode(&doc, TargetNuclide::new(-98252), 1.0, 2.0).expect("encode");
        let reread = decode(&out).expect("reread");
        let record = reread.record(Zaid(-98252)).expect("record");
        assert!((record.alpha_slope - 0.06).abs() < 1e-9);
    }

    #[test]
    fn missing_compound_enumerates_available_keys() {
        let doc = decode(&sample()).expect("decode");
        let err = encode(&doc, TargetNuclide::new(95241), 1.1, 1.0).expect_err("must fail");
        assert!(format!("{err}").contains("[-98252, 92236, 94240]"));
    }

    #[test]
    fn wrong_token_count_ends_the_data_section() {
        let text = "# ZAID alpha\n 92236  1.70  0.050\n 94240  1.65\n";
        let doc = decode(text).expect("decode");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.footer, vec![" 94240  1.65".to_string()]);
        let out = encode(&doc, TargetNuclide::new(92235), 1.0, 1.0).expect("encode");
        assert_eq!(out, text);
    }

    #[test]
    fn zaid_stored_as_double_still_parses() {
        let text = "# ZAID alpha\n 92236.0  1.70  0.050\n";
        let doc = decode(text).expect("decode");
        assert_eq!(doc.records[0].zaid, Zaid(92236));
    }
}
