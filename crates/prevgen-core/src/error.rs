//! Error types for prevgen

use thiserror::Error;

/// Result type for prevgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in prevgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Hex text or color keyword could not be parsed
    #[error("Malformed color: {0}")]
    MalformedColor(String),

    /// Space components must be a 3-tuple or a 4-tuple with alpha
    #[error("Invalid component count: expected 3 or 4, got {0}")]
    InvalidComponentCount(usize),

    /// Color space name is not one of the implemented spaces
    #[error("Unsupported color space: {0}")]
    UnsupportedSpace(String),

    /// Per-tile text blob did not decode into name, left and right descriptions
    #[error("Metadata decode error: {0}")]
    MetadataDecode(String),

    /// The artifact carries no embedded settings entry
    #[error("Missing settings metadata in {artifact}")]
    MissingSettingsMetadata { artifact: String },

    /// The embedded settings entry exists but is not valid
    #[error("Invalid settings metadata: {0}")]
    InvalidSettingsMetadata(String),

    /// The artifact is neither a known raster nor a role-tagged vector document
    #[error("Unrecognized artifact: {0}")]
    UnrecognizedArtifact(String),

    /// A per-tile text entry was present but malformed; the color is kept
    #[error("Partial metadata decode error for tile {index}: {reason}")]
    PartialMetadataDecode { index: usize, reason: String },

    /// PNG decoding failed
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    /// PNG encoding failed
    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    /// SVG markup could not be parsed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Settings JSON could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
