use thiserror::Error;

/// Errors from noise texture generation, upload and export.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// Coordinates are normalized by `width - 1` and `height - 1`, so both must be at least 2.
    #[error("invalid texture dimension {width}x{height}: width and height must be at least 2")]
    InvalidDimension { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("texture upload failed: {0}")]
    UploadFailure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}
