use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, Frames, ImageFormat, RgbaImage};

use crate::error::AssetError;

/// Decoded frames of one animated source, all RGBA and all the same size.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<RgbaImage>,
    native_duration: Option<Duration>,
}

impl FrameSet {
    /// Builds a frame set, rejecting empty sequences and mixed frame sizes.
    pub fn new(frames: Vec<RgbaImage>, native_duration: Option<Duration>) -> Result<Self, AssetError> {
        let first = frames.first().ok_or(AssetError::Empty)?;
        let expected = first.dimensions();

        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, frame)| frame.dimensions() != expected)
        {
            return Err(AssetError::InconsistentFrame {
                index,
                expected,
                found: frame.dimensions(),
            });
        }

        Ok(Self {
            frames,
            native_duration,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Decodes every frame of an encoded image.
    ///
    /// Animated GIF and APNG sources yield one entry per animation frame, fully
    /// composed onto the canvas. Any other format the image library reads is
    /// treated as a single still frame.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        match image::guess_format(bytes)? {
            ImageFormat::Gif => {
                let decoder = GifDecoder::new(Cursor::new(bytes))?;
                Self::from_animation(decoder.into_frames())
            }
            ImageFormat::Png => {
                let decoder = PngDecoder::new(Cursor::new(bytes))?;
                if decoder.is_apng()? {
                    Self::from_animation(decoder.apng()?.into_frames())
                } else {
                    Self::still(bytes, ImageFormat::Png)
                }
            }
            format => Self::still(bytes, format),
        }
    }

    fn from_animation(decoded: Frames<'_>) -> Result<Self, AssetError> {
        let mut frames = Vec::new();
        let mut native_duration = None;

        for frame in decoded {
            let frame = frame?;
            if frames.is_empty() {
                // A zero delay means the source left the duration unspecified
                native_duration = Some(Duration::from(frame.delay())).filter(|d| !d.is_zero());
            }
            frames.push(frame.into_buffer());
        }

        Self::new(frames, native_duration)
    }

    fn still(bytes: &[u8], format: ImageFormat) -> Result<Self, AssetError> {
        let image = image::load_from_memory_with_format(bytes, format)?;
        Self::new(vec![image.into_rgba8()], None)
    }

    /// Returns a copy with every frame resized by `scale` using Lanczos resampling.
    pub fn scaled(&self, scale: f64) -> Result<Self, AssetError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AssetError::InvalidScale(scale));
        }

        let (width, height) = self.dimensions();
        let (new_width, new_height) = scaled_dimensions(width, height, scale);
        if new_width == 0 || new_height == 0 {
            return Err(AssetError::ScaledToNothing { width, height, scale });
        }

        let frames = self
            .frames
            .iter()
            .map(|frame| imageops::resize(frame, new_width, new_height, FilterType::Lanczos3))
            .collect();

        Self::new(frames, self.native_duration)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.frames
            .first()
            .map(|frame| frame.dimensions())
            .unwrap_or((0, 0))
    }

    /// Per-frame display duration declared by the source, if any.
    pub fn native_duration(&self) -> Option<Duration> {
        self.native_duration
    }
}

/// `(floor(width * scale), floor(height * scale))`
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (
        (width as f64 * scale).floor() as u32,
        (height as f64 * scale).floor() as u32,
    )
}
