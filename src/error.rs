//! Error types for keypoint region operations.

use thiserror::Error;

use crate::model::RegionId;

/// Errors that can occur while operating on keypoint regions.
#[derive(Error, Debug)]
pub enum RegionError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No region with this id is attached to the image
    #[error("Region not found: {id}")]
    RegionNotFound {
        /// The id that was looked up
        id: RegionId,
    },

    /// Stage or natural dimensions required but not known yet
    #[error("Dimensions required but not available: {what}")]
    MissingDimensions {
        /// Which dimensions were missing
        what: String,
    },

    /// Invalid coordinate values
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates {
        /// Description of the coordinate error
        message: String,
    },
}

impl RegionError {
    /// Create a region-not-found error.
    pub fn not_found(id: &RegionId) -> Self {
        Self::RegionNotFound { id: id.clone() }
    }

    /// Create a missing dimensions error.
    pub fn missing_dimensions(what: impl Into<String>) -> Self {
        Self::MissingDimensions { what: what.into() }
    }

    /// Create an invalid coordinates error.
    pub fn invalid_coordinates(message: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            message: message.into(),
        }
    }
}
