//! Error types and classification for synthesis operations

use std::fmt;
use std::path::PathBuf;

/// Broad category of a failure, used by hosts to decide how to report it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid construction parameters or a pipeline that cannot run
    Config,
    /// A persisted document could not be understood
    Format,
    /// A lookup by id or index found nothing
    Lookup,
    /// Host-side file system or image encoding failure
    Io,
}

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Grid dimensions must both be positive
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// A random fill was requested over an alphabet with no symbols
    EmptyAlphabet {
        /// Name of the transformation that needed symbols
        transformation: String,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Document declares a format version this build cannot read
    UnsupportedVersion {
        /// Version found in the document
        found: i64,
    },

    /// Document is not valid JSON or a field is missing or mistyped
    MalformedDocument {
        /// Underlying deserialization error
        source: serde_json::Error,
    },

    /// Document parsed but its contents are inconsistent
    InvalidDocument {
        /// Description of what's wrong with the document
        reason: String,
    },

    /// Symbol id is not registered in the alphabet
    UnknownSymbol {
        /// The id that was looked up
        id: i32,
    },

    /// Checked cell write landed outside the grid
    CellOutOfBounds {
        /// Column of the attempted write
        x: usize,
        /// Row of the attempted write
        y: usize,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Index into an ordered list (transformations, replacements) is out of range
    InvalidIndex {
        /// The invalid index
        index: usize,
        /// Length of the list
        len: usize,
    },

    /// Failed to save a rendered grid to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl AlgorithmError {
    /// Classify the error into its broad category
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimensions { .. }
            | Self::EmptyAlphabet { .. }
            | Self::InvalidParameter { .. } => ErrorKind::Config,
            Self::UnsupportedVersion { .. }
            | Self::MalformedDocument { .. }
            | Self::InvalidDocument { .. } => ErrorKind::Format,
            Self::UnknownSymbol { .. } | Self::CellOutOfBounds { .. } | Self::InvalidIndex { .. } => {
                ErrorKind::Lookup
            }
            Self::ImageExport { .. } | Self::FileSystem { .. } => ErrorKind::Io,
        }
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid grid dimensions {width}x{height}: both must be positive"
                )
            }
            Self::EmptyAlphabet { transformation } => {
                write!(
                    f,
                    "Transformation '{transformation}' needs at least one symbol in the alphabet"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "Unsupported document version {found}")
            }
            Self::MalformedDocument { source } => {
                write!(f, "Unparsable synthesizer document: {source}")
            }
            Self::InvalidDocument { reason } => {
                write!(f, "Invalid synthesizer document: {reason}")
            }
            Self::UnknownSymbol { id } => {
                write!(f, "Symbol {id} is not in the alphabet")
            }
            Self::CellOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is out of bounds (grid size {width}x{height})"
                )
            }
            Self::InvalidIndex { index, len } => {
                write!(f, "Index {index} is out of bounds (len: {len})")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedDocument { source } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<serde_json::Error> for AlgorithmError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid document error
pub fn invalid_document(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidDocument {
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
