//! Conversion orchestration: preview in, encoded result out.

use crate::codec::RasterCodec;
use crate::data_uri::DataUri;
use crate::format::OutputConfig;
use crate::types::{ConversionResult, ConvertError, Dimensions, Generation};

/// Everything needed to run one conversion, captured when it starts.
///
/// Holding a snapshot (rather than reading live state on completion)
/// keeps the result consistent with what the user asked for even if
/// they change settings while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Generation of the source the job was started for.
    pub generation: Generation,
    /// Preview to convert.
    pub preview: DataUri,
    /// Output settings at the time the job started.
    pub config: OutputConfig,
}

/// Run a conversion.
///
/// 1. Decode the preview data URI back into bytes
/// 2. Decode the bytes into a raster at intrinsic size (no scaling)
/// 3. Encode the raster into `job.config.format`, passing the quality
///    only for formats that support it
///
/// # Errors
///
/// Returns [`ConvertError::InvalidPreview`] if the preview is not a
/// valid base64 data URI, [`ConvertError::EmptyInput`] or
/// [`ConvertError::Decode`] if the bytes are not an image,
/// [`ConvertError::Encode`] if encoding fails, and
/// [`ConvertError::UnsupportedFormat`] if the encoder produced nothing.
pub fn convert<C>(codec: &C, job: &ConversionJob) -> Result<ConversionResult, ConvertError>
where
    C: RasterCodec + ?Sized,
{
    let format = job.config.format;
    let bytes = job.preview.decode()?;
    let raster = codec.decode(&bytes)?;
    let dimensions = Dimensions::of(&raster);

    let encoded = codec.encode(&raster, format, job.config.effective_quality())?;
    if encoded.is_empty() {
        return Err(ConvertError::UnsupportedFormat { format });
    }

    tracing::debug!(
        generation = %job.generation,
        %format,
        %dimensions,
        bytes = encoded.len(),
        "conversion finished"
    );

    Ok(ConversionResult {
        bytes: encoded.into(),
        format,
        dimensions,
        generation: job.generation,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::codec::ImageCodec;
    use crate::format::{Quality, TargetFormat};
    use crate::types::RgbaImage;

    fn png_preview(width: u32, height: u32) -> DataUri {
        let raster = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        });
        let png = ImageCodec.encode(&raster, TargetFormat::Png, None).unwrap();
        DataUri::encode("image/png", &png)
    }

    fn job(preview: DataUri, format: TargetFormat, quality: f64) -> ConversionJob {
        ConversionJob {
            generation: Generation::default().next(),
            preview,
            config: OutputConfig {
                format,
                quality: Quality::from_fraction(quality),
            },
        }
    }

    /// Records what the orchestrator asks of the codec.
    #[derive(Default)]
    struct RecordingCodec {
        encoded_with: RefCell<Vec<(TargetFormat, Option<Quality>)>>,
        output: Vec<u8>,
    }

    impl RasterCodec for RecordingCodec {
        fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, ConvertError> {
            ImageCodec.decode(bytes)
        }

        fn encode(
            &self,
            _raster: &RgbaImage,
            format: TargetFormat,
            quality: Option<Quality>,
        ) -> Result<Vec<u8>, ConvertError> {
            self.encoded_with.borrow_mut().push((format, quality));
            Ok(self.output.clone())
        }
    }

    #[test]
    fn converts_to_requested_format() {
        let result = convert(&ImageCodec, &job(png_preview(30, 20), TargetFormat::Bmp, 0.9)).unwrap();
        assert_eq!(result.format, TargetFormat::Bmp);
        assert_eq!(
            result.dimensions,
            Dimensions {
                width: 30,
                height: 20
            }
        );
        assert_eq!(
            image::guess_format(&result.bytes).unwrap(),
            image::ImageFormat::Bmp
        );
        assert_eq!(result.download_name(), "converted-image.bmp");
    }

    #[test]
    fn quality_passed_only_for_lossy_formats() {
        let codec = RecordingCodec {
            output: vec![1],
            ..RecordingCodec::default()
        };
        for format in TargetFormat::ALL {
            convert(&codec, &job(png_preview(4, 4), format, 0.3)).unwrap();
        }
        let q = Some(Quality::from_fraction(0.3));
        assert_eq!(
            *codec.encoded_with.borrow(),
            vec![
                (TargetFormat::Jpeg, q),
                (TargetFormat::Png, None),
                (TargetFormat::Webp, q),
                (TargetFormat::Gif, None),
                (TargetFormat::Bmp, None),
            ]
        );
    }

    #[test]
    fn empty_encoder_output_is_unsupported_format() {
        let codec = RecordingCodec::default();
        let err = convert(&codec, &job(png_preview(4, 4), TargetFormat::Gif, 0.9)).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedFormat {
                format: TargetFormat::Gif
            }
        ));
        assert!(!err.is_decode_failure());
    }

    #[test]
    fn non_image_preview_is_a_decode_failure() {
        let preview = DataUri::encode("image/png", b"definitely not a png");
        let err = convert(&ImageCodec, &job(preview, TargetFormat::Png, 0.9)).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
        assert!(err.is_decode_failure());
    }

    #[test]
    fn empty_preview_is_a_decode_failure() {
        let preview = DataUri::encode("image/png", &[]);
        let err = convert(&ImageCodec, &job(preview, TargetFormat::Png, 0.9)).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput));
    }

    #[test]
    fn corrupt_base64_is_invalid_preview() {
        let preview = DataUri::parse("data:image/png;base64,***").unwrap();
        let err = convert(&ImageCodec, &job(preview, TargetFormat::Png, 0.9)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidPreview(_)));
    }

    #[test]
    fn result_carries_job_generation() {
        let mut later = job(png_preview(4, 4), TargetFormat::Png, 0.9);
        later.generation = later.generation.next().next();
        let result = convert(&ImageCodec, &later).unwrap();
        assert_eq!(result.generation, later.generation);
    }
}
