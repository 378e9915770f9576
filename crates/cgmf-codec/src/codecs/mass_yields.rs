//! Multi-record Gaussian codec for the pre-neutron mass-yield model
//! (`yamodel.dat`).
//!
//! Each line carries a compound ZAID and the 14 parameters of the
//! energy-dependent 3-Gaussian Y(A) fit, plus an optional `#` comment. The
//! file also holds daughter records (compound-1..-3) used by multi-chance
//! fission; they are located for diagnostics but never perturbed.

use cgmf_model::{ScaleSet, TargetNuclide, Zaid, is_unchanged};

use crate::document::{Document, split_lines};
use crate::error::{CodecError, Result};
use crate::section::Section;

/// The 14 Gaussian-fit parameters, in token order.
pub const PARAM_NAMES: [&str; 14] = [
    "MY_AS1_Wa",
    "MY_AS1_Wb",
    "MY_AS1_Mua",
    "MY_AS1_Mub",
    "MY_AS1_Siga",
    "MY_AS1_Sigb",
    "MY_AS2_Wa",
    "MY_AS2_Wb",
    "MY_AS2_Mua",
    "MY_AS2_Mub",
    "MY_AS2_Siga",
    "MY_AS2_Sigb",
    "MY_S_Siga",
    "MY_S_Sigb",
];

/// One compound nucleus row of the mass-yield model.
#[derive(Debug, Clone, PartialEq)]
pub struct MassYieldRecord {
    pub zaid: Zaid,
    /// Parameter values in [`PARAM_NAMES`] order.
    pub params: [f64; 14],
    comment: String,
    original: String,
}

impl MassYieldRecord {
    pub fn param(&self, name: &str) -> Option<f64> {
        PARAM_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.params[i])
    }
}

pub type MassYieldDocument = Document<MassYieldRecord>;

impl MassYieldDocument {
    pub fn record(&self, zaid: Zaid) -> Option<&MassYieldRecord> {
        self.records.iter().find(|r| r.zaid == zaid)
    }
}

fn parse_record(line: &str) -> Option<MassYieldRecord> {
    let (data, comment) = match line.find('#') {
        Some(i) => (&line[..i], line[i..].to_string()),
        None => (line, String::new()),
    };
    let tokens: Vec<&str> = data.split_whitespace().collect();
    if tokens.len() < 15 {
        return None;
    }
    let zaid: i32 = tokens[0].parse().ok()?;
    let mut params = [0.0; 14];
    for (value, token) in params.iter_mut().zip(&tokens[1..15]) {
        *value = token.parse().ok()?;
    }
    Some(MassYieldRecord {
        zaid: Zaid(zaid),
        params,
        comment,
        original: line.to_string(),
    })
}

/// Parse the mass-yield model file.
pub fn decode(text: &str) -> Result<MassYieldDocument> {
    let (lines, trailing_newline) = split_lines(text);
    let mut doc = MassYieldDocument::new(trailing_newline);
    let mut section = Section::default();

    for line in lines {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            if section.is_before_data() {
                doc.header.push(line.to_string());
            } else {
                doc.footer.push(line.to_string());
            }
            continue;
        }
        if section.is_after_data() {
            doc.footer.push(line.to_string());
            continue;
        }

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

    tracing::debug!(isotopes = doc.records.len(), "decoded mass-yield model");
    Ok(doc)
}

/// Render the file with independent per-parameter factors on the target.
///
/// Daughter records for multi-chance fission are reported at debug level
/// and left untouched, like every other sibling record.
pub fn encode(
    doc: &MassYieldDocument,
    target: TargetNuclide,
    scales: &ScaleSet,
) -> Result<String> {
    let compound = target.compound();
    if doc.record(compound).is_none() {
        return Err(CodecError::target_not_found(
            compound.value(),
            doc.records.iter().map(|r| r.zaid.value()).collect::<Vec<_>>(),
        ));
    }
    for daughter in target.daughters(3) {
        if doc.record(daughter).is_some() {
            tracing::debug!(zaid = daughter.value(), "multi-chance daughter present");
        }
    }

    doc.try_render_with(|record| {
        if record.zaid != compound {
            return Ok(record.original.clone());
        }
        let mut scaled = record.params;
        for (value, name) in scaled.iter_mut().zip(PARAM_NAMES) {
            *value *= scales.factor(name);
        }
        let unchanged = scaled
            .iter()
            .zip(record.params)
            .all(|(s, o)| is_unchanged(o, *s));
        if unchanged {
            return Ok(record.original.clone());
        }

        let mut line = format!("{:6}", record.zaid.value());
        for value in scaled {
            line.push_str(&format!(" {value:>12.6}"));
        }
        if !record.comment.is_empty() {
            line.push(' ');
            line.push_str(&record.comment);
        }
        Ok(line)
    })
}
