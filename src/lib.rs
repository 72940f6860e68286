//! Rewrite-rule grid synthesis for procedural content generation
//!
//! A synthesizer threads a grid of symbol ids through an ordered pipeline of
//! transformations: uniform random fills and wildcard search-and-replace rules
//! with weighted outcomes. Every stage reads the previous stage's output and
//! writes a fresh buffer. Complete configurations persist as versioned JSON.

#![forbid(unsafe_code)]

/// Transformations and the synthesis pipeline
pub mod algorithm;
/// Input/output operations, persistence and error handling
pub mod io;
/// Probability selection and palette utilities
pub mod math;
/// Grid storage
pub mod spatial;
/// Symbol alphabet and reserved ids
pub mod symbols;

pub use algorithm::{Replacement, RuleBased, Synthesizer, Transformation, TransformationKind};
pub use io::error::{AlgorithmError, ErrorKind, Result};
pub use spatial::Grid;
pub use symbols::{Alphabet, EMPTY_ID, Symbol, WILDCARD_ID};
