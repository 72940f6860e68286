/// Command-line interface and batch processing
pub mod cli;
/// Versioned JSON document codec
pub mod codec;
/// Format constants and defaults
pub mod configuration;
/// Error types and classification
pub mod error;
/// PNG export of grids
pub mod image;
/// Progress display for batch runs
pub mod progress;
/// Stock demo configuration
pub mod preset;
