//! Mathematical utilities for selection and rendering

/// HSV palette generation for symbol ids
pub mod color;
/// Cumulative probability selection
pub mod probability;
