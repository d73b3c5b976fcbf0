use std::path::PathBuf;

/// Errors raised while turning an image source into a frame sequence.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// The source decoded successfully but produced no frames.
    #[error("image source contains no frames")]
    Empty,
    #[error("frame {index} is {found:?}, expected {expected:?}")]
    InconsistentFrame {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },
    #[error("scale factor must be a positive number, got {0}")]
    InvalidScale(f64),
    #[error("scaling {width}x{height} by {scale} leaves an empty frame")]
    ScaledToNothing { width: u32, height: u32, scale: f64 },
}
