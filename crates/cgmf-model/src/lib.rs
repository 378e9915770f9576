//! Core domain types for CGMF parameter-file perturbation.
//!
//! This crate holds the pieces shared by every codec: nuclide identifiers
//! (ZAID), the target-to-compound-nucleus resolution, the empirical
//! stability classifier, and multiplicative scale-factor sets.

pub mod error;
pub mod nuclide;
pub mod scale;
pub mod stability;

pub use error::{ModelError, Result};
pub use nuclide::{FissionMode, TargetNuclide, Zaid};
pub use scale::{SCALE_TOLERANCE, ScaleSet, is_unchanged};
pub use stability::{Stability, classify, z_stable};
