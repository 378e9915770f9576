//! Nuclide identifiers and target-to-compound resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer nuclide identifier: `Z * 1000 + A`.
///
/// Negative values denote a spontaneously fissioning nuclide by file
/// convention (e.g. `-98252` for Cf-252(sf)).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Zaid(pub i32);

impl Zaid {
    /// Build a ZAID from proton and nucleon counts.
    pub fn from_za(z: u32, a: u32) -> Self {
        Zaid((z * 1000 + a) as i32)
    }

    /// Proton count, ignoring the spontaneous-fission sign.
    pub fn z(self) -> u32 {
        self.0.unsigned_abs() / 1000
    }

    /// Nucleon count, ignoring the spontaneous-fission sign.
    pub fn a(self) -> u32 {
        self.0.unsigned_abs() % 1000
    }

    /// The raw signed identifier as stored in parameter files.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Zaid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width/alignment flags apply to the raw identifier.
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for Zaid {
    fn from(value: i32) -> Self {
        Zaid(value)
    }
}

/// How the fission reaction is initiated, derived from the target sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FissionMode {
    /// Positive target: the file stores the compound nucleus (target + n).
    NeutronInduced,
    /// Non-positive target: the stored identifier is the target itself.
    Spontaneous,
}

/// The user-facing target nuclide selecting which records a perturbation
/// touches.
///
/// Compound-keyed files store `target + 1` for neutron-induced fission (the
/// captured neutron joins the nucleus before fission); spontaneous-fission
/// identifiers are stored unchanged, sign included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetNuclide {
    zaid: Zaid,
}

impl TargetNuclide {
    pub fn new(zaid: impl Into<Zaid>) -> Self {
        TargetNuclide { zaid: zaid.into() }
    }

    /// The identifier as the caller supplied it.
    pub fn zaid(&self) -> Zaid {
        self.zaid
    }

    pub fn mode(&self) -> FissionMode {
        if self.zaid.0 > 0 {
            FissionMode::NeutronInduced
        } else {
            FissionMode::Spontaneous
        }
    }

    /// The identifier actually stored in compound-keyed parameter files.
    pub fn compound(&self) -> Zaid {
        match self.mode() {
            FissionMode::NeutronInduced => Zaid(self.zaid.0 + 1),
            FissionMode::Spontaneous => self.zaid,
        }
    }

    /// Lighter daughter compounds `compound-1 ..= compound-n`, looked up for
    /// multi-chance fission but never perturbed.
    pub fn daughters(&self, n: u32) -> Vec<Zaid> {
        let compound = self.compound().0;
        (1..=n as i32).map(|k| Zaid(compound - k)).collect()
    }
}
