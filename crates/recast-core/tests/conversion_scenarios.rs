//! Integration test: drive the converter state through complete
//! upload → convert → download flows with the real `image` codec.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Cursor;

use proptest::prelude::*;
use recast_core::{
    ConversionStatus, ConverterState, Event, ImageCodec, Notice, Quality, RasterCodec, RgbaImage,
    TargetFormat, View, convert,
};

/// An opaque PNG with a diagonal gradient so lossy encoders have
/// something to work with.
#[allow(clippy::cast_possible_truncation)]
fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let raster = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            255,
        ])
    });
    ImageCodec.encode(&raster, TargetFormat::Png, None).unwrap()
}

/// `gradient_png`'s raster written in a container recast only reads.
fn gradient_in(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let raster = image::load_from_memory(&gradient_png(width, height))
        .unwrap()
        .into_rgba8();
    let mut buf = Vec::new();
    raster.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn upload(state: ConverterState, name: &str, media_type: &str, bytes: Vec<u8>) -> ConverterState {
    let state = state.apply(Event::FileOffered {
        name: name.into(),
        media_type: media_type.into(),
        size: bytes.len() as u64,
    });
    match state.pending_preview() {
        Some(generation) => state.apply(Event::PreviewLoaded { generation, bytes }),
        None => state,
    }
}

fn configure(state: ConverterState, format: TargetFormat, quality: f64) -> ConverterState {
    state
        .apply(Event::FormatSelected(format))
        .apply(Event::QualitySelected(Quality::from_fraction(quality)))
}

fn convert_now(state: ConverterState) -> ConverterState {
    let job = state.conversion_job().expect("a preview is loaded");
    let state = state.apply(Event::ConversionStarted);
    assert_eq!(state.status(), ConversionStatus::Converting);
    let outcome = convert(&ImageCodec, &job);
    state.apply(Event::ConversionFinished {
        generation: job.generation,
        outcome,
    })
}

fn result_bytes(state: &ConverterState) -> Vec<u8> {
    state.result().expect("conversion succeeded").bytes.to_vec()
}

#[test]
fn png_to_jpeg_at_half_quality() {
    let state = upload(
        ConverterState::default(),
        "square.png",
        "image/png",
        gradient_png(100, 100),
    );
    let state = convert_now(configure(state, TargetFormat::Jpeg, 0.5));

    let result = state.result().unwrap();
    assert_eq!(result.download_name(), "converted-image.jpeg");
    assert_eq!(result.mime_type(), "image/jpeg");
    assert_eq!(
        image::guess_format(&result.bytes).unwrap(),
        image::ImageFormat::Jpeg
    );
    let decoded = image::load_from_memory(&result.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (100, 100));
}

#[test]
fn icon_and_tiff_sources_convert() {
    let sources = [
        ("favicon.ico", "image/x-icon", image::ImageFormat::Ico),
        ("scan.tiff", "image/tiff", image::ImageFormat::Tiff),
    ];
    for (name, media_type, container) in sources {
        let state = upload(
            ConverterState::default(),
            name,
            media_type,
            gradient_in(16, 16, container),
        );
        assert_eq!(state.view(), View::Preview, "{name}");

        let state = convert_now(configure(state, TargetFormat::Png, 0.9));
        assert!(state.notice().is_none(), "{name}: {:?}", state.notice());
        let result = state.result().unwrap();
        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16), "{name}");
    }
}

#[test]
fn svg_is_refused_before_preview() {
    let state = upload(
        ConverterState::default(),
        "logo.svg",
        "image/svg+xml",
        b"<svg xmlns='http://www.w3.org/2000/svg'/>".to_vec(),
    );
    assert_eq!(state.view(), View::Empty);
    assert!(state.source().is_none());
    assert!(matches!(
        state.notice(),
        Some(Notice::UnsupportedImage { .. })
    ));
}

#[test]
fn text_file_is_refused() {
    let state = upload(
        ConverterState::default(),
        "notes.txt",
        "text/plain",
        b"hello".to_vec(),
    );
    assert_eq!(state.view(), View::Empty);
    assert!(state.source().is_none());
    assert!(state.preview().is_none());
    assert!(matches!(state.notice(), Some(Notice::InvalidFile { .. })));
    assert_eq!(
        state.notice().unwrap().to_string(),
        "Please select a valid image file"
    );
}

#[test]
fn new_upload_before_download_clears_result() {
    let state = upload(
        ConverterState::default(),
        "first.png",
        "image/png",
        gradient_png(20, 20),
    );
    let state = convert_now(state);
    assert!(state.result().is_some());

    let state = upload(state, "second.png", "image/png", gradient_png(30, 10));
    assert!(state.result().is_none());
    assert_eq!(state.source().unwrap().name, "second.png");

    let state = convert_now(state);
    assert_eq!(state.result().unwrap().dimensions.width, 30);
}

#[test]
fn lossless_formats_ignore_quality() {
    for format in [TargetFormat::Png, TargetFormat::Gif, TargetFormat::Bmp] {
        let base = upload(
            ConverterState::default(),
            "g.png",
            "image/png",
            gradient_png(16, 12),
        );
        let low = result_bytes(&convert_now(configure(base.clone(), format, 0.1)));
        let high = result_bytes(&convert_now(configure(base, format, 1.0)));
        assert_eq!(low, high, "{format}");
    }
}

#[test]
fn converting_twice_is_idempotent() {
    for format in TargetFormat::ALL {
        let state = configure(
            upload(
                ConverterState::default(),
                "g.png",
                "image/png",
                gradient_png(16, 16),
            ),
            format,
            0.7,
        );
        let state = convert_now(state);
        let first = result_bytes(&state);
        let state = convert_now(state);
        assert_eq!(first, result_bytes(&state), "{format}");
    }
}

#[test]
fn reset_from_any_status_returns_to_empty() {
    let loaded = upload(
        ConverterState::default(),
        "g.png",
        "image/png",
        gradient_png(8, 8),
    );
    let candidates = [
        ConverterState::default(),
        loaded.clone(),
        loaded.clone().apply(Event::ConversionStarted),
        convert_now(loaded),
    ];
    for state in candidates {
        let config = state.config();
        let state = state.apply(Event::Reset);
        assert_eq!(state.view(), View::Empty);
        assert_eq!(state.status(), ConversionStatus::Idle);
        assert!(state.result().is_none());
        assert_eq!(state.config(), config);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn lossy_output_keeps_source_dimensions(
        width in 1u32..48,
        height in 1u32..48,
        tenths in 1u8..=10,
        webp in any::<bool>(),
    ) {
        let format = if webp { TargetFormat::Webp } else { TargetFormat::Jpeg };
        let state = upload(
            ConverterState::default(),
            "p.png",
            "image/png",
            gradient_png(width, height),
        );
        let state = convert_now(configure(state, format, f64::from(tenths) / 10.0));
        let result = state.result().unwrap();
        let decoded = image::load_from_memory(&result.bytes).unwrap();
        prop_assert_eq!((decoded.width(), decoded.height()), (width, height));
    }

    #[test]
    fn non_image_uploads_never_change_the_file(media_type in "(text|application|video|audio)/[a-z]{1,8}") {
        let before = upload(
            ConverterState::default(),
            "g.png",
            "image/png",
            gradient_png(4, 4),
        );
        let after = upload(before.clone(), "other", &media_type, vec![1, 2, 3]);
        prop_assert_eq!(after.source(), before.source());
        prop_assert_eq!(after.preview(), before.preview());
        prop_assert_eq!(after.result(), before.result());
        prop_assert!(
            matches!(after.notice(), Some(Notice::InvalidFile { .. })),
            "expected an invalid-file notice"
        );
    }
}
