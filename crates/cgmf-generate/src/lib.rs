//! Directory-level generation of perturbed CGMF input decks.
//!
//! A generation request copies a baseline input directory verbatim, then
//! decodes, scales, and re-encodes the parameter files covered by a codec.
//! Each request is stateless and owns its output directory; perturbed files
//! are written atomically (write-then-rename) so a reader never observes a
//! partially written fixed-width file.

pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;

pub use config::ScaleConfig;
pub use error::{GenerateError, Result};
pub use generator::{GenerationReport, generate};
pub use manifest::{ManifestRow, read_manifest, validate_manifest, write_manifest};
