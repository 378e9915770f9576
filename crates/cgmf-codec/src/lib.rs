//! Byte-exact codecs for the CGMF parameter-file formats.
//!
//! Each codec parses one on-disk layout into a [`Document`], applies
//! multiplicative scale factors to the targeted records, and re-renders the
//! file so that everything not semantically changed is reproduced
//! byte-for-byte. The downstream reader extracts fields by position with no
//! bounds checking, so every fixed-width and fixed-token-count contract here
//! is load-bearing: a mis-sized field silently misparses instead of failing.

pub mod codecs;
pub mod document;
pub mod error;
pub mod fmt;
pub mod registry;
pub mod section;

pub use document::{Document, join_lines, split_lines};
pub use error::{CodecError, Result};
pub use registry::FileKind;
pub use section::Section;
