//! Cursor error types

use thiserror::Error;

use crate::cursor::surface::SurfaceError;

/// Result type for directed cursor operations
pub type Result<T> = std::result::Result<T, CursorError>;

/// Failures surfaced by directed operations
///
/// Dispatch failures are absorbed while tracing a path and never appear here
/// unless they come from a geometry or selector query.
#[derive(Error, Debug)]
pub enum CursorError {
    /// A selector matched nothing, even after waiting
    #[error("No element matches selector {0:?}")]
    SelectorNotFound(String),

    /// The target kept moving while the pointer travelled to it
    #[error("Element did not settle within {tries} attempts")]
    ElementUnsettled { tries: u32 },

    /// The target exists but has no layout box
    #[error("Element has no bounding box: {0}")]
    ElementHidden(String),

    /// A query against the surface failed
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}
