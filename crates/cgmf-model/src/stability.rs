//! Empirical valley-of-stability classification.
//!
//! Two codecs apply scale factors per record based on whether the nuclide
//! sits near the valley of stability; the split selects between the
//! `STAB_*` and `UNSTAB_*` factor groups.

use serde::{Deserialize, Serialize};

/// STABLE/UNSTABLE label for a nuclide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stability {
    Stable,
    Unstable,
}

impl Stability {
    /// Scale-factor key prefix for this classification.
    pub fn prefix(self) -> &'static str {
        match self {
            Stability::Stable => "STAB",
            Stability::Unstable => "UNSTAB",
        }
    }
}

/// Predicted proton count at the valley of stability for mass number `a`.
///
/// `Z_stable = A / (2 + 0.015 * A^(2/3))`
pub fn z_stable(a: u32) -> f64 {
    let a = f64::from(a);
    a / (2.0 + 0.015 * a.powf(2.0 / 3.0))
}

/// Classify a nuclide from its proton and nucleon counts.
///
/// Stable iff `|Z - Z_stable| < 2` or `|Z - Z_stable| < 0.05 * Z_stable`.
pub fn classify(z: u32, a: u32) -> Stability {
    let z_stable = z_stable(a);
    let delta = (f64::from(z) - z_stable).abs();
    if delta < 2.0 || delta < 0.05 * z_stable {
        Stability::Stable
    } else {
        Stability::Unstable
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn u235_is_stable() {
        assert_eq!(classify(92, 235), Stability::Stable);
    }

    #[test]
    fn cf252_matches_threshold_logic() {
        // Recompute from the documented formula rather than hardcoding the
        // label, so a threshold regression is caught directly.
        let zs = z_stable(252);
        let delta = (98.0 - zs).abs();
        let expected = if delta < 2.0 || delta < 0.05 * zs {
            Stability::Stable
        } else {
            Stability::Unstable
        };
        assert_eq!(classify(98, 252), expected);
    }

    #[test]
    fn light_neutron_rich_nuclide_is_unstable() {
        // Z far below the valley for A=100.
        assert_eq!(classify(30, 100), Stability::Unstable);
        assert_eq!(z_stable(100).round(), 43.0);
    }

    proptest! {
        #[test]
        fn classify_is_total_and_deterministic(z in 1u32..120, a in 1u32..300) {
            let first = classify(z, a);
            let second = classify(z, a);
            prop_assert_eq!(first, second);
        }
    }
}
