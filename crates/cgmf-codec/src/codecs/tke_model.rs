//! Fixed-token-count codec for the total-kinetic-energy model
//! (`tkemodel.dat`).
//!
//! Every data line must tokenize to exactly 27 whitespace-separated fields:
//! compound ZAID plus 26 floats grouped 4 + 11 + 11 (energy dependence,
//! heavy-fragment-mass dependence, TKE variance). The external reader
//! counts on that token count, so the encoder re-tokenizes its own output
//! and aborts if a format-width regression ever merges two fields.

use cgmf_model::{TargetNuclide, Zaid, is_unchanged};

use crate::document::{Document, split_lines};
use crate::error::{CodecError, Result};
use crate::fmt::sci_upper;
use crate::section::Section;

pub const TOKENS_PER_LINE: usize = 27;
pub const TKE_EN_LEN: usize = 4;
pub const TKE_AH_LEN: usize = 11;
pub const SIGMA_TKE_LEN: usize = 11;

/// Per-group scale factors, one per parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TkeScales {
    pub tke_en: [f64; TKE_EN_LEN],
    pub tke_ah: [f64; TKE_AH_LEN],
    pub sigma_tke: [f64; SIGMA_TKE_LEN],
}

impl Default for TkeScales {
    fn default() -> Self {
        TkeScales {
            tke_en: [1.0; TKE_EN_LEN],
            tke_ah: [1.0; TKE_AH_LEN],
            sigma_tke: [1.0; SIGMA_TKE_LEN],
        }
    }
}

impl TkeScales {
    /// The 26 factors flattened into token order.
    fn flat(&self) -> [f64; 26] {
        let mut out = [1.0; 26];
        out[..TKE_EN_LEN].copy_from_slice(&self.tke_en);
        out[TKE_EN_LEN..TKE_EN_LEN + TKE_AH_LEN].copy_from_slice(&self.tke_ah);
        out[TKE_EN_LEN + TKE_AH_LEN..].copy_from_slice(&self.sigma_tke);
        out
    }
}

/// One compound nucleus row: 26 model parameters in token order.
#[derive(Debug, Clone, PartialEq)]
pub struct TkeRecord {
    pub zaid: Zaid,
    pub values: [f64; 26],
    original: String,
}

impl TkeRecord {
    pub fn tke_en(&self) -> &[f64] {
        &self.values[..TKE_EN_LEN]
    }

    pub fn tke_ah(&self) -> &[f64] {
        &self.values[TKE_EN_LEN..TKE_EN_LEN + TKE_AH_LEN]
    }

    pub fn sigma_tke(&self) -> &[f64] {
        &self.values[TKE_EN_LEN + TKE_AH_LEN..]
    }
}

pub type TkeDocument = Document<TkeRecord>;

impl TkeDocument {
    pub fn record(&self, zaid: Zaid) -> Option<&TkeRecord> {
        self.records.iter().find(|r| r.zaid == zaid)
    }
}

fn parse_record(line: &str) -> Option<TkeRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != TOKENS_PER_LINE {
        return None;
    }
    let zaid: i32 = tokens[0].parse().ok()?;
    let mut values = [0.0; 26];
    for (value, token) in values.iter_mut().zip(&tokens[1..]) {
        *value = token.parse().ok()?;
    }
    Some(TkeRecord {
        zaid: Zaid(zaid),
        values,
        original: line.to_string(),
    })
}

/// Parse the TKE model file. Any line not yielding exactly 27 tokens is
/// preamble (before data) or footer (after).
pub fn decode(text: &str) -> Result<TkeDocument> {
    let (lines, trailing_newline) = split_lines(text);
    let mut doc = TkeDocument::new(trailing_newline);
    let mut section = Section::default();

    for line in lines {
        match parse_record(line) {
            Some(record) => {
                section.begin_data();
                doc.records.push(record);
            }
            None => {
                if section.is_before_data() {
                    doc.header.push(line.to_string());
                } else {
                    section.end_data();
                    doc.footer.push(line.to_string());
                }
            }
        }
    }

    tracing::debug!(isotopes = doc.records.len(), "decoded TKE model file");
    Ok(doc)
}

/// Render the file with per-parameter factors applied to the target record.
///
/// The rewritten line uses a 15-wide scientific field chosen to keep the 27
/// tokens separated; the encoder re-tokenizes its own output and fails
/// rather than emit a line the reader would misparse.
pub fn encode(doc: &TkeDocument, target: TargetNuclide, scales: &TkeScales) -> Result<String> {
    let compound = target.compound();
    if doc.record(compound).is_none() {
        return Err(CodecError::target_not_found(
            compound.value(),
            doc.records.iter().map(|r| r.zaid.value()).collect::<Vec<_>>(),
        ));
    }
    let factors = scales.flat();

    doc.try_render_with(|record| {
        if record.zaid != compound {
            return Ok(record.original.clone());
        }
        let mut scaled = record.values;
        for (value, factor) in scaled.iter_mut().zip(factors) {
            *value *= factor;
        }
        let unchanged = scaled
            .iter()
            .zip(record.values)
            .all(|(s, o)| is_unchanged(o, *s));
        if unchanged {
            return Ok(record.original.clone());
        }

        let mut line = record.zaid.value().to_string();
        for value in scaled {
            line.push_str(&format!("{:>15}", sci_upper(value, 6)));
        }
        let tokens = line.split_whitespace().count();
        if tokens != TOKENS_PER_LINE {
            return Err(CodecError::TokenCountViolation {
                expected: TOKENS_PER_LINE,
                actual: tokens,
            });
        }
        Ok(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(zaid: i32, base: f64) -> String {
        let values: Vec<String> = (0..26)
            .map(|i| format!("{:>15}", sci_upper(base + f64::from(i), 6)))
            .collect();
        format!("{zaid}{}", values.join(""))
    }

    fn sample() -> String {
        format!(
            "# TKE model parameters\n{}\n{}\n",
            row(92236, 170.0),
            row(-98252, 180.0)
        )
    }

    #[test]
    fn identity_round_trip() {
        let text = sample();
        let doc = decode(&text).expect("decode");
        assert_eq!(doc.records.len(), 2);
        let out =
            encode(&doc, TargetNuclide::new(92235), &TkeScales::default()).expect("encode");
        assert_eq!(out, text);
    }

    #[test]
    fn groups_split_4_11_11() {
        let doc = decode(&sample()).expect("decode");
        let record = doc.record(Zaid(92236)).expect("record");
        assert_eq!(record.tke_en().len(), 4);
        assert_eq!(record.tke_ah().len(), 11);
        assert_eq!(record.sigma_tke().len(), 11);
        assert_eq!(record.tke_en()[0], 170.0);
        assert_eq!(record.sigma_tke()[10], 195.0);
    }

    #[test]
    fn scaled_line_retokenizes_to_27_fields() {
        let doc = decode(&sample()).expect("decode");
        let mut scales = TkeScales::default();
        scales.tke_en[0] = 1.05;
        let out = encode(&doc, TargetNuclide::new(92235), &scales).expect("encode");

        let line = out.lines().nth(1).expect("target line");
        assert_eq!(line.split_whitespace().count(), 27);

        let reread = decode(&out).expect("reread");
        let record = reread.record(Zaid(92236)).expect("record");
        assert!((record.tke_en()[0] - 178.5).abs() < 1e-6);
        assert_eq!(record.tke_en()[1], 171.0);

        // The spontaneous-fission sibling keeps its original bytes.
        assert_eq!(out.lines().nth(2), sample().lines().nth(2));
    }

    #[test]
    fn wrong_token_count_is_not_data() {
        let text = "# header\n92236 1.0 2.0\n";
        let doc = decode(text).expect("decode");
        assert!(doc.records.is_empty());
        assert_eq!(doc.header.len(), 2);
    }

    #[test]
    fn missing_compound_enumerates_available_keys() {
        let doc = decode(&sample()).expect("decode");
        let err = encode(&doc, TargetNuclide::new(94239), &TkeScales::default())
            .expect_err("must fail");
        assert_eq!(
            format!("{err}"),
            "target ZAID 94240 not found; available ZAIDs: [-98252, 92236]"
        );
    }
}
