//! Shared types for the recast conversion core.

use std::fmt;
use std::sync::Arc;

use crate::data_uri::DataUriError;
use crate::format::TargetFormat;

/// Re-export `RgbaImage` so downstream crates can reference decoded
/// rasters without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of a decoded raster.
    #[must_use]
    pub fn of(raster: &RgbaImage) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Identifies one selected-file lifetime.
///
/// Bumped on every accepted upload and on reset. Asynchronous work
/// (file reads, conversions) carries the generation it started under so
/// completions belonging to a replaced file can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    /// The generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The output of a successful conversion.
///
/// The encoded payload is shared so the state record stays cheap to
/// clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Encoded image bytes.
    pub bytes: Arc<[u8]>,
    /// Container the bytes were encoded as.
    pub format: TargetFormat,
    /// Pixel dimensions of the encoded image.
    pub dimensions: Dimensions,
    /// Generation of the source file this result was produced from.
    pub generation: Generation,
}

impl ConversionResult {
    /// Filename to offer for download (`converted-image.<ext>`).
    #[must_use]
    pub fn download_name(&self) -> String {
        self.format.download_name()
    }

    /// MIME type of the payload.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Errors that can occur while converting an image.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The source payload was empty.
    #[error("image data is empty")]
    EmptyInput,

    /// The preview could not be turned back into bytes.
    #[error("preview is not a valid data URI: {0}")]
    InvalidPreview(#[from] DataUriError),

    /// The codec could not interpret the bytes as an image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The codec failed while writing the target container.
    #[error("failed to encode {format}: {source}")]
    Encode {
        /// Requested container.
        format: TargetFormat,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The encoder produced no output for the requested container.
    #[error("encoding to {format} is not supported")]
    UnsupportedFormat {
        /// Requested container.
        format: TargetFormat,
    },
}

impl ConvertError {
    /// Whether the failure happened while reading the source image (as
    /// opposed to while producing the output).
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::InvalidPreview(_) | Self::Decode(_)
        )
    }
}
