//! Error types for image transforms.

use pnm_core::PnmFormat;
use thiserror::Error;

/// Error type for transform operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// The transform does not accept images of this format class.
    #[error("transform {transform:?} is not applicable to {format} images")]
    NotApplicable {
        /// Transform that was requested.
        transform: String,
        /// Format of the offered image.
        format: PnmFormat,
    },

    /// No transform with this name exists in the registry.
    #[error("unknown transform {0:?}")]
    UnknownTransform(String),

    /// Parameter missing or outside the transform's option list.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The image failed its invariant check before the transform ran.
    ///
    /// This signals an internal invariant breach, not bad input data.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A core operation failed while the transform was rebuilding the image.
    #[error(transparent)]
    Core(#[from] pnm_core::Error),
}

/// Result type for transform operations.
pub type OpsResult<T> = Result<T, OpsError>;
