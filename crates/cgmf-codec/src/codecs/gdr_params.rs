//! Key=value codec for the global radiative-strength parameters
//! (`gstrength_gdr_params.dat`).
//!
//! One `name = value;` assignment per line, flexible whitespace, optional
//! `#`/`//` comment lines. The exact whitespace and the original numeric
//! literal are captured per assignment so unchanged values are re-emitted
//! verbatim, keeping e.g. `1.0e-3` from silently becoming `0.001`.

use regex::Regex;

use cgmf_model::{ScaleSet, is_unchanged};

use crate::document::{join_lines, split_lines};
use crate::error::{CodecError, Result};

/// Canonical assignment order used by the external reader.
pub const CANONICAL_NAMES: [&str; 26] = [
    "global_PSF_norm",
    "E1_DArigo_E_const1",
    "E1_DArigo_E_const2",
    "E1_DArigo_E_exp",
    "E1_DArigo_W_factor",
    "E1_DArigo_S_coef",
    "E1_DH0_E_const",
    "E1_DH0_E_exp_mass",
    "E1_DH0_E_exp_beta",
    "E1_DH0_W_const",
    "E1_DH0_W_beta_coef",
    "E1_DH0_S_coef",
    "E1_DH1_E_const",
    "E1_DH1_E_exp_mass",
    "E1_DH1_W_const",
    "E1_DH1_W_beta_coef",
    "E1_DH1_S_coef",
    "M1_E_const",
    "M1_E_exp",
    "M1_W_val",
    "M1_S_val",
    "E2_E_const",
    "E2_E_exp",
    "E2_W_const",
    "E2_W_mass_coef",
    "E2_S_coef",
];

/// One parsed `name = value;` assignment with its exact surrounding text.
#[derive(Debug, Clone, PartialEq)]
pub struct GdrEntry {
    pub name: String,
    pub value: f64,
    original_line: String,
    leading: String,
    equals: String,
    literal: String,
    trailing: String,
}

/// A decoded radiative-strength parameter file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GdrDocument {
    pub entries: Vec<GdrEntry>,
    pub trailing_newline: bool,
}

impl GdrDocument {
    /// Look up an assignment by parameter name.
    pub fn get(&self, name: &str) -> Option<&GdrEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

/// Parse a radiative-strength parameter file.
///
/// Blank and comment lines are skipped; any other line must match the
/// assignment pattern and carry a parseable float.
pub fn decode(text: &str) -> Result<GdrDocument> {
    let pattern = Regex::new(r"^(\s*)(\w+)(\s*=\s*)([^;]+);(.*)$")
        .map_err(|e| CodecError::invalid_format(0, e.to_string()))?;

    let (lines, trailing_newline) = split_lines(text);
    let mut entries = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line_num = index + 1;
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with("//") {
            continue;
        }

        let captures = pattern
            .captures(line)
            .ok_or_else(|| CodecError::invalid_format(line_num, stripped.to_string()))?;
        let literal = captures[4].trim().to_string();
        let value: f64 = literal
            .parse()
            .map_err(|_| CodecError::invalid_number(line_num, literal.clone()))?;

        entries.push(GdrEntry {
            name: captures[2].to_string(),
            value,
            original_line: (*line).to_string(),
            leading: captures[1].to_string(),
            equals: captures[3].to_string(),
            literal,
            trailing: captures[5].to_string(),
        });
    }

    tracing::debug!(parameters = entries.len(), "decoded radiative-strength file");
    Ok(GdrDocument {
        entries,
        trailing_newline,
    })
}

/// Render the file with scale factors applied.
///
/// Assignments are written in canonical order, unchanged values verbatim;
/// names outside the canonical set are appended at the end, sorted.
pub fn encode(doc: &GdrDocument, scales: &ScaleSet) -> Result<String> {
    let mut lines = Vec::with_capacity(doc.entries.len());

    for name in CANONICAL_NAMES {
        if let Some(entry) = doc.get(name) {
            lines.push(render_entry(entry, scales.factor(name)));
        }
    }

    let mut extra: Vec<&GdrEntry> = doc
        .entries
        .iter()
        .filter(|entry| !CANONICAL_NAMES.contains(&entry.name.as_str()))
        .collect();
    extra.sort_by(|a, b| a.name.cmp(&b.name));
    for entry in extra {
        tracing::warn!(name = %entry.name, "parameter outside canonical order");
        lines.push(render_entry(entry, scales.factor(&entry.name)));
    }

    Ok(join_lines(&lines, doc.trailing_newline))
}

fn render_entry(entry: &GdrEntry, factor: f64) -> String {
    let scaled = entry.value * factor;
    if is_unchanged(entry.value, scaled) {
        return entry.original_line.clone();
    }
    // Keep the notation style of the original literal.
    let literal = if entry.literal.contains(['e', 'E']) {
        format!("{scaled:e}")
    } else {
        format!("{scaled}")
    };
    format!(
        "{}{}{}{};{}",
        entry.leading, entry.name, entry.equals, literal, entry.trailing
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SAMPLE: &str = "global_PSF_norm         = 1.0;\n\
                          E1_DArigo_E_const1      = 18.0;\n\
                          M1_E_const              = 41.0;\n\
                          E2_E_const              = 64.5;\n";

    #[test]
    fn identity_round_trip() {
        let doc = decode(SAMPLE).expect("decode");
        let out = encode(&doc, &ScaleSet::new()).expect("encode");
        assert_eq!(out, SAMPLE);
    }

    #[test]
    fn identity_without_trailing_newline() {
        let text = SAMPLE.trim_end_matches('\n');
        let doc = decode(text).expect("decode");
        assert!(!doc.trailing_newline);
        let out = encode(&doc, &ScaleSet::new()).expect("encode");
        assert_eq!(out, text);
    }

    #[test]
    fn scaling_rewrites_only_the_touched_assignment() {
        let doc = decode(SAMPLE).expect("decode");
        let scales = ScaleSet::new().with("M1_E_const", 1.1);
        let out = encode(&doc, &scales).expect("encode");

        let reread = decode(&out).expect("reread");
        let entry = reread.get("M1_E_const").expect("entry");
        assert!((entry.value - 45.1).abs() < 1e-9);
        for name in ["global_PSF_norm", "E1_DArigo_E_const1", "E2_E_const"] {
            let before = doc.get(name).expect("before");
            let after = reread.get(name).expect("after");
            assert_eq!(before.original_line, after.original_line);
        }
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        let text = "# header\n\nglobal_PSF_norm = 1.0;\n// note\nM1_E_const = 41.0;\n";
        let doc = decode(text).expect("decode");
        assert_eq!(doc.entries.len(), 2);
    }

    #[test]
    fn unmatched_line_is_invalid_format() {
        let err = decode("global_PSF_norm 1.0\n").expect_err("must fail");
        assert!(matches!(err, CodecError::InvalidFormat { line: 1, .. }));
    }

    #[test]
    fn bad_literal_is_invalid_number() {
        let err = decode("global_PSF_norm = abc;\n").expect_err("must fail");
        assert!(matches!(err, CodecError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn extra_names_are_appended_sorted() {
        let text = "zz_extra = 2.0;\nglobal_PSF_norm = 1.0;\naa_extra = 3.0;\n";
        let doc = decode(text).expect("decode");
        let out = encode(&doc, &ScaleSet::new()).expect("encode");
        assert_eq!(out, "global_PSF_norm = 1.0;\naa_extra = 3.0;\nzz_extra = 2.0;\n");
    }

    proptest! {
        #[test]
        fn arbitrary_whitespace_layouts_round_trip(
            leading in "[ \t]{0,3}",
            pre_eq in "[ ]{0,4}",
            post_eq in "[ ]{1,4}",
            trailing in "( *| +# note)",
        ) {
            let text = format!(
                "{leading}global_PSF_norm{pre_eq}={post_eq}1.0e-3;{trailing}\n"
            );
            let doc = decode(&text).expect("decode");
            let out = encode(&doc, &ScaleSet::new()).expect("encode");
            prop_assert_eq!(out, text);
        }
    }
}
