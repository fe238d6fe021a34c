//! Error types for beaconscore.

use thiserror::Error;

/// Result alias for beaconscore operations.
pub type BoardResult<T> = std::result::Result<T, BoardError>;

/// Low-level faults raised while preparing images and templates.
///
/// Pipeline stages never surface these directly; they are folded into a
/// [`Rejection`](crate::report::Rejection) at the stage boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Width or height is zero or overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Template has no intensity variation and cannot be correlated.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// Image bytes or file could not be decoded.
    #[error("could not decode image: {reason}")]
    Decode { reason: String },
    /// A template asset is missing or unreadable.
    #[error("template asset `{name}`: {reason}")]
    TemplateAsset { name: String, reason: String },
}
