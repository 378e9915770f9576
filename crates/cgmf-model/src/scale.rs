//! Named multiplicative scale factors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stability::Stability;

/// Tolerance below which a scaled value counts as numerically unchanged.
///
/// Encoders fall back to the verbatim original line when every scaled field
/// is within this tolerance of its original, which is what guarantees
/// byte-identical output for identity perturbations.
pub const SCALE_TOLERANCE: f64 = 1e-15;

/// True when `scaled` is indistinguishable from `original`.
pub fn is_unchanged(original: f64, scaled: f64) -> bool {
    (scaled - original).abs() < SCALE_TOLERANCE
}

/// A set of named multiplicative factors; anything not present is 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleSet {
    factors: BTreeMap<String, f64>,
}

impl ScaleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, factor: f64) {
        self.factors.insert(name.into(), factor);
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, factor: f64) -> Self {
        self.set(name, factor);
        self
    }

    /// Factor for a named field, defaulting to 1.0.
    pub fn factor(&self, name: &str) -> f64 {
        self.factors.get(name).copied().unwrap_or(1.0)
    }

    /// Factor for a stability-grouped field, e.g. `STAB_Ematch`.
    pub fn factor_for(&self, stability: Stability, name: &str) -> f64 {
        self.factor(&format!("{}_{}", stability.prefix(), name))
    }

    /// True when every stored factor is an effective no-op.
    pub fn is_identity(&self) -> bool {
        self.factors.values().all(|f| is_unchanged(1.0, *f))
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.factors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_factor_defaults_to_identity() {
        let scales = ScaleSet::new();
        assert_eq!(scales.factor("Ematch"), 1.0);
        assert!(scales.is_identity());
    }

    #[test]
    fn stability_lookup_uses_prefix() {
        let scales = ScaleSet::new()
            .with("STAB_Ematch", 1.1)
            .with("UNSTAB_Ematch", 0.9);
        assert_eq!(scales.factor_for(Stability::Stable, "Ematch"), 1.1);
        assert_eq!(scales.factor_for(Stability::Unstable, "Ematch"), 0.9);
        assert_eq!(scales.factor_for(Stability::Stable, "Pairing"), 1.0);
        assert!(!scales.is_identity());
    }

    #[test]
    fn deserializes_from_flat_json_map() {
        let scales: ScaleSet =
            serde_json::from_str(r#"{"global_PSF_norm": 1.1, "M1_E_const": 0.95}"#)
                .expect("deserialize scale set");
        assert_eq!(scales.factor("global_PSF_norm"), 1.1);
        assert_eq!(scales.factor("M1_E_const"), 0.95);
    }

    #[test]
    fn unchanged_tolerance_boundary() {
        assert!(is_unchanged(1.0, 1.0));
        assert!(is_unchanged(1.0, 1.0 + 1e-16));
        assert!(!is_unchanged(1.0, 1.0 + 1e-14));
    }
}
