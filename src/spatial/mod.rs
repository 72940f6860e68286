//! Spatial data structures
//!
//! This module contains the grid type shared by the synthesizer and the
//! pattern buffers of rule-based transformations.

/// Fixed-size symbol grid
pub mod grid;

pub use grid::Grid;
