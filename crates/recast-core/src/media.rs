//! Media-type validation for file intake.
//!
//! A file is accepted when its declared media type begins with
//! `image/`. Browsers sometimes report an empty type (for example for
//! files dragged out of some file managers), in which case the type is
//! inferred from the filename extension.
//!
//! Image types the bundled decoders cannot read (SVG, AVIF, HEIC, ...)
//! are turned away at intake rather than failing later at conversion.

/// Fallback media type for files with no recognisable extension.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Extension to media type table used when the browser reports no type.
const EXTENSION_MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
];

/// Image media types [`crate::ImageCodec`] can decode, matched against
/// the normalised type with any parameters removed.
const DECODABLE_MEDIA_TYPES: &[&str] = &[
    "image/png",
    "image/apng",
    "image/jpeg",
    "image/jpg",
    "image/pjpeg",
    "image/webp",
    "image/gif",
    "image/bmp",
    "image/x-bmp",
    "image/x-ms-bmp",
    "image/x-icon",
    "image/vnd.microsoft.icon",
    "image/tiff",
];

/// Errors raised while taking in a user-provided file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// The declared media type is not an image type.
    #[error("Please select a valid image file (got {media_type:?})")]
    NotAnImage {
        /// The rejected media type, as declared.
        media_type: String,
    },

    /// An image type none of the bundled decoders can read.
    #[error("Images of type {media_type} cannot be converted")]
    UnsupportedImage {
        /// The rejected media type, normalised.
        media_type: String,
    },

    /// The browser failed to read the file contents.
    #[error("Failed to read file: {0}")]
    Read(String),
}

/// Returns `true` if `media_type` denotes an image (`image/...`).
///
/// Matching ignores surrounding whitespace and ASCII case of the
/// `image/` prefix.
#[must_use]
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Returns `true` if `media_type` is an image type the codec can read.
///
/// Parameters (`;charset=...`) are ignored.
#[must_use]
pub fn is_decodable_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    DECODABLE_MEDIA_TYPES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(essence))
}

/// Validate a declared media type, returning it normalised (trimmed,
/// lower-cased) when it is a decodable image type.
///
/// # Errors
///
/// Returns [`IntakeError::NotAnImage`] if the type does not start with
/// `image/`, and [`IntakeError::UnsupportedImage`] for image types the
/// codec cannot decode.
pub fn validate_image_media_type(media_type: &str) -> Result<String, IntakeError> {
    if !is_image_media_type(media_type) {
        return Err(IntakeError::NotAnImage {
            media_type: media_type.to_owned(),
        });
    }
    let normalised = media_type.trim().to_ascii_lowercase();
    if is_decodable_media_type(&normalised) {
        Ok(normalised)
    } else {
        Err(IntakeError::UnsupportedImage {
            media_type: normalised,
        })
    }
}

/// Infer a media type from a filename's extension.
///
/// Returns [`UNKNOWN_MEDIA_TYPE`] when the name has no extension or an
/// unrecognised one.
#[must_use]
pub fn media_type_from_name(name: &str) -> &'static str {
    name.rsplit_once('.')
        .and_then(|(_, ext)| {
            EXTENSION_MEDIA_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|&(_, media_type)| media_type)
        })
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// The media type to validate for a file: the declared one if the
/// browser supplied it, otherwise one inferred from the name.
#[must_use]
pub fn declared_media_type(reported: Option<&str>, name: &str) -> String {
    match reported.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_owned(),
        _ => media_type_from_name(name).to_owned(),
    }
}
