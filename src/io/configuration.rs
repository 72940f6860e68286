//! Format constants and runtime configuration defaults

/// Version written to and accepted from persisted documents
pub const FORMAT_VERSION: i64 = 1;

/// Side length of the demo preset grid
pub const PRESET_GRID_SIZE: usize = 16;

// Rendering
/// Default pixel size of one cell in exported images
pub const DEFAULT_CELL_SIZE: u32 = 8;
/// Largest accepted cell size, keeps exported images to a sane size
pub const MAX_CELL_SIZE: u32 = 64;
/// Saturation of symbol colours
pub const PALETTE_SATURATION: f32 = 0.8;
/// Brightness of symbol colours
pub const PALETTE_VALUE: f32 = 0.6;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of synthesizer documents
pub const DOCUMENT_EXTENSION: &str = "json";
