//! Decoding into rasters and encoding rasters into containers.
//!
//! [`RasterCodec`] is the seam between conversion orchestration and the
//! actual image codecs. [`ImageCodec`] implements it with the `image`
//! crate, which compiles to WASM and runs in the page.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use crate::format::{Quality, TargetFormat};
use crate::types::{ConvertError, RgbaImage};

/// Decoder/encoder pair used by [`crate::convert`].
pub trait RasterCodec {
    /// Decode encoded image bytes into an RGBA raster at the image's
    /// intrinsic size.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::EmptyInput`] for empty input and
    /// [`ConvertError::Decode`] if the bytes are not a decodable image.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, ConvertError>;

    /// Serialize a raster into `format`.
    ///
    /// `quality` is `Some` only for formats that support lossy
    /// compression; implementations ignore it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Encode`] if the encoder fails.
    fn encode(
        &self,
        raster: &RgbaImage,
        format: TargetFormat,
        quality: Option<Quality>,
    ) -> Result<Vec<u8>, ConvertError>;
}

/// [`RasterCodec`] backed by the `image` crate.
///
/// - JPEG drops the alpha channel and honours the quality fraction.
/// - WebP output is lossless; the quality fraction has no effect.
/// - PNG, GIF and BMP are written from RGBA8 unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl RasterCodec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, ConvertError> {
        if bytes.is_empty() {
            return Err(ConvertError::EmptyInput);
        }
        let image = image::load_from_memory(bytes).map_err(ConvertError::Decode)?;
        Ok(image.into_rgba8())
    }

    fn encode(
        &self,
        raster: &RgbaImage,
        format: TargetFormat,
        quality: Option<Quality>,
    ) -> Result<Vec<u8>, ConvertError> {
        let encode_err = |source| ConvertError::Encode { format, source };
        let mut buf = Vec::new();

        match format {
            TargetFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(raster.clone()).into_rgb8();
                let percent = quality.unwrap_or_default().percent().clamp(1, 100);
                JpegEncoder::new_with_quality(&mut buf, percent)
                    .encode_image(&rgb)
                    .map_err(encode_err)?;
            }
            TargetFormat::Png | TargetFormat::Webp | TargetFormat::Gif | TargetFormat::Bmp => {
                raster
                    .write_to(&mut Cursor::new(&mut buf), image_format(format))
                    .map_err(encode_err)?;
            }
        }

        Ok(buf)
    }
}

/// The `image` crate's identifier for a target container.
const fn image_format(format: TargetFormat) -> ImageFormat {
    match format {
        TargetFormat::Jpeg => ImageFormat::Jpeg,
        TargetFormat::Png => ImageFormat::Png,
        TargetFormat::Webp => ImageFormat::WebP,
        TargetFormat::Gif => ImageFormat::Gif,
        TargetFormat::Bmp => ImageFormat::Bmp,
    }
}
