//! Errors raised while setting up or finishing a render.

use kdtrace_math::BoundsError;
use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("bucket size must be at least 1")]
    InvalidBucketSize,

    #[error("cannot bound geometry: {0}")]
    Bounds(#[from] BoundsError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
