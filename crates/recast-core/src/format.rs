//! Output container formats, quality fractions, and the combined
//! output configuration.

use std::fmt;
use std::str::FromStr;

/// Base filename (without extension) of every downloaded result.
pub const DOWNLOAD_BASE_NAME: &str = "converted-image";

/// Raster container format a conversion can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    /// JPEG (lossy, no alpha).
    #[default]
    Jpeg,
    /// PNG (lossless).
    Png,
    /// WebP.
    Webp,
    /// GIF (palette based).
    Gif,
    /// Windows bitmap.
    Bmp,
}

impl TargetFormat {
    /// All formats in the order they are offered to the user.
    pub const ALL: [Self; 5] = [Self::Jpeg, Self::Png, Self::Webp, Self::Gif, Self::Bmp];

    /// File extension, also used as the format's identifier
    /// (`"jpeg"`, `"png"`, ...).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    /// Upper-case label for format pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Webp => "WEBP",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
        }
    }

    /// MIME type of the container, always `image/<extension>`.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    /// Whether the quality fraction influences encoding.
    #[must_use]
    pub const fn supports_quality(self) -> bool {
        matches!(self, Self::Jpeg | Self::Webp)
    }

    /// Caveat to show next to the quality slider, if the encoder treats
    /// quality differently from what the slider suggests.
    #[must_use]
    pub const fn quality_hint(self) -> Option<&'static str> {
        match self {
            Self::Webp => Some("WebP is saved losslessly, so quality does not change the output."),
            Self::Jpeg | Self::Png | Self::Gif | Self::Bmp => None,
        }
    }

    /// Filename offered when downloading a result in this format.
    #[must_use]
    pub fn download_name(self) -> String {
        format!("{DOWNLOAD_BASE_NAME}.{}", self.extension())
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when parsing an unknown format identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output format: {0:?}")]
pub struct UnknownFormat(pub String);

impl FromStr for TargetFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(s))
            .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Self::Jpeg))
            .ok_or_else(|| UnknownFormat(s.to_owned()))
    }
}

/// Lossy compression quality, a fraction in `[0.1, 1.0]` on a 0.1 grid.
///
/// Stored as tenths so equality is exact and every value the slider can
/// produce is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    /// Lowest selectable quality (0.1).
    pub const MIN: Self = Self(1);
    /// Highest selectable quality (1.0).
    pub const MAX: Self = Self(10);
    /// Slider step as a fraction.
    pub const STEP: f64 = 0.1;

    /// Snap an arbitrary fraction onto the quality grid.
    ///
    /// Values are rounded to the nearest tenth and clamped to
    /// `[0.1, 1.0]`. `NaN` maps to the default quality.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::default();
        }
        let tenths = (fraction * 10.0).round().clamp(1.0, 10.0);
        Self(tenths as u8)
    }

    /// The quality as a fraction in `[0.1, 1.0]`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// The quality on a 1..=100 percentage scale (JPEG encoders).
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0 * 10
    }

    /// The quality as a percentage label (`"90%"`).
    #[must_use]
    pub fn percent_label(self) -> String {
        format!("{}%", self.percent())
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(9)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.fraction())
    }
}

/// User-selected output settings.
///
/// Independent of the selected file: the configuration survives both
/// new uploads and resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    /// Container to encode into.
    pub format: TargetFormat,
    /// Quality fraction, only consulted for formats where
    /// [`TargetFormat::supports_quality`] is true.
    pub quality: Quality,
}

impl OutputConfig {
    /// The quality to hand to the encoder, `None` when the format
    /// ignores it.
    #[must_use]
    pub const fn effective_quality(&self) -> Option<Quality> {
        if self.format.supports_quality() {
            Some(self.quality)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_is_image_slash_extension() {
        for format in TargetFormat::ALL {
            assert_eq!(format.mime_type(), format!("image/{}", format.extension()));
        }
    }

    #[test]
    fn only_jpeg_and_webp_support_quality() {
        let lossy: Vec<_> = TargetFormat::ALL
            .into_iter()
            .filter(|f| f.supports_quality())
            .collect();
        assert_eq!(lossy, vec![TargetFormat::Jpeg, TargetFormat::Webp]);
    }

    #[test]
    fn download_name_uses_extension() {
        assert_eq!(TargetFormat::Webp.download_name(), "converted-image.webp");
        assert_eq!(TargetFormat::Jpeg.download_name(), "converted-image.jpeg");
    }

    #[test]
    fn parse_round_trips_through_display() {
        for format in TargetFormat::ALL {
            assert_eq!(format.to_string().parse::<TargetFormat>().unwrap(), format);
        }
        assert_eq!("JPG".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
        assert!("tiff".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn quality_snaps_to_grid() {
        assert_eq!(Quality::from_fraction(0.54), Quality::from_fraction(0.5));
        assert_eq!(Quality::from_fraction(0.0), Quality::MIN);
        assert_eq!(Quality::from_fraction(-3.0), Quality::MIN);
        assert_eq!(Quality::from_fraction(7.0), Quality::MAX);
        assert_eq!(Quality::from_fraction(f64::NAN), Quality::default());
        assert!((Quality::from_fraction(0.3).fraction() - 0.3).abs() < 1e-9);
        assert_eq!(Quality::from_fraction(0.5).percent(), 50);
        assert_eq!(Quality::from_fraction(0.5).to_string(), "0.5");
    }

    #[test]
    fn default_config_is_jpeg_at_0_9() {
        let config = OutputConfig::default();
        assert_eq!(config.format, TargetFormat::Jpeg);
        assert_eq!(config.quality.percent(), 90);
    }

    #[test]
    fn effective_quality_omitted_for_lossless_formats() {
        let quality = Quality::from_fraction(0.4);
        for format in TargetFormat::ALL {
            let config = OutputConfig { format, quality };
            assert_eq!(
                config.effective_quality().is_some(),
                format.supports_quality(),
                "{format}"
            );
        }
    }

    #[test]
    fn only_webp_carries_a_quality_hint() {
        for format in TargetFormat::ALL {
            assert_eq!(
                format.quality_hint().is_some(),
                format == TargetFormat::Webp,
                "{format}"
            );
        }
    }

    #[test]
    fn percent_labels() {
        assert_eq!(Quality::default().percent_label(), "90%");
        assert_eq!(Quality::MIN.percent_label(), "10%");
        assert_eq!(Quality::from_fraction(0.5).percent_label(), "50%");
        assert_eq!(Quality::MAX.percent_label(), "100%");
    }
}
