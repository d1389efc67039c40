//! Converter state record and its transition function.
//!
//! The whole UI state lives in one [`ConverterState`] value. Every user
//! or platform event is an [`Event`], and [`ConverterState::apply`]
//! consumes the current state and returns the next one. Nothing here
//! touches the browser, so every transition is unit-testable.
//!
//! ```text
//!            FileOffered (image/*)            PreviewLoaded
//!   Empty ───────────────────────▶ Loading ─────────────────▶ Preview
//!     ▲                                                       │   ▲
//!     │ Reset                              ConversionStarted  │   │ ConversionFinished
//!     └───────────────────────────────────────────────────────┤   │
//!                                                             ▼   │
//!                                                          Converting
//! ```
//!
//! Asynchronous completions carry the [`Generation`] they were started
//! under; a completion for an older generation is dropped.

use std::fmt;

use crate::convert::ConversionJob;
use crate::data_uri::DataUri;
use crate::format::{OutputConfig, Quality, TargetFormat};
use crate::media::{self, IntakeError};
use crate::types::{ConversionResult, ConvertError, Generation};

/// A file the user selected or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Filename as reported by the browser.
    pub name: String,
    /// Normalised declared media type (always `image/...`).
    pub media_type: String,
    /// Size in bytes as reported by the browser.
    pub size: u64,
}

/// Whether a conversion is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionStatus {
    /// Nothing running.
    #[default]
    Idle,
    /// A conversion has been started and has not completed.
    Converting,
}

/// Which top-level view the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Drop zone, no preview yet.
    Empty,
    /// Preview with output controls.
    Preview,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The offered file is not an image.
    InvalidFile {
        /// Media type that was rejected.
        media_type: String,
    },
    /// The offered file is an image the codec cannot decode.
    UnsupportedImage {
        /// Media type that was rejected.
        media_type: String,
    },
    /// The file could not be read for preview.
    PreviewFailed(String),
    /// The preview could not be decoded as an image.
    DecodeFailed(String),
    /// Any other conversion failure.
    ConversionFailed(String),
    /// The browser refused to start the download.
    DownloadFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFile { .. } => f.write_str("Please select a valid image file"),
            Self::UnsupportedImage { media_type } => {
                write!(f, "Images of type {media_type} cannot be converted")
            }
            Self::PreviewFailed(msg) => write!(f, "Could not read the file: {msg}"),
            Self::DecodeFailed(msg) => write!(f, "Error loading image: {msg}"),
            Self::ConversionFailed(msg) => write!(f, "Error converting image: {msg}"),
            Self::DownloadFailed(msg) => write!(f, "Download failed: {msg}"),
        }
    }
}

impl From<IntakeError> for Notice {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::NotAnImage { media_type } => Self::InvalidFile { media_type },
            IntakeError::UnsupportedImage { media_type } => Self::UnsupportedImage { media_type },
            IntakeError::Read(msg) => Self::PreviewFailed(msg),
        }
    }
}

impl From<&ConvertError> for Notice {
    fn from(err: &ConvertError) -> Self {
        if err.is_decode_failure() {
            Self::DecodeFailed(err.to_string())
        } else {
            Self::ConversionFailed(err.to_string())
        }
    }
}

/// Everything that can happen to the converter.
#[derive(Debug)]
pub enum Event {
    /// A file was chosen in the picker or dropped on the drop zone.
    FileOffered {
        /// Filename.
        name: String,
        /// Declared media type (see [`media::declared_media_type`]).
        media_type: String,
        /// Size in bytes.
        size: u64,
    },
    /// The bytes of the current file finished reading.
    PreviewLoaded {
        /// Generation the read was started under.
        generation: Generation,
        /// File contents.
        bytes: Vec<u8>,
    },
    /// Reading the current file failed.
    PreviewFailed {
        /// Generation the read was started under.
        generation: Generation,
        /// Why the read failed.
        error: IntakeError,
    },
    /// The output format was changed.
    FormatSelected(TargetFormat),
    /// The quality slider moved.
    QualitySelected(Quality),
    /// The user asked for a conversion.
    ConversionStarted,
    /// A conversion completed.
    ConversionFinished {
        /// Generation the conversion was started under.
        generation: Generation,
        /// What the codec produced.
        outcome: Result<ConversionResult, ConvertError>,
    },
    /// Starting a download failed.
    DownloadFailed(String),
    /// The user closed the notice banner.
    NoticeDismissed,
    /// Start over.
    Reset,
}

/// The complete converter UI state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConverterState {
    source: Option<SourceFile>,
    preview: Option<DataUri>,
    config: OutputConfig,
    status: ConversionStatus,
    result: Option<ConversionResult>,
    generation: Generation,
    notice: Option<Notice>,
}

impl ConverterState {
    /// A fresh state with the given output settings.
    #[must_use]
    pub fn with_config(config: OutputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The selected file, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&SourceFile> {
        self.source.as_ref()
    }

    /// The preview of the selected file, once read.
    #[must_use]
    pub const fn preview(&self) -> Option<&DataUri> {
        self.preview.as_ref()
    }

    /// Current output settings.
    #[must_use]
    pub const fn config(&self) -> OutputConfig {
        self.config
    }

    /// Whether a conversion is running.
    #[must_use]
    pub const fn status(&self) -> ConversionStatus {
        self.status
    }

    /// Shorthand for `status() == Converting`.
    #[must_use]
    pub const fn is_converting(&self) -> bool {
        matches!(self.status, ConversionStatus::Converting)
    }

    /// The latest conversion result, available for download.
    #[must_use]
    pub const fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    /// Whether the current file has a finished conversion and nothing is
    /// running.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.result.is_some() && !self.is_converting()
    }

    /// The current file generation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// The notification to show, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Which view to render.
    #[must_use]
    pub const fn view(&self) -> View {
        if self.preview.is_some() {
            View::Preview
        } else {
            View::Empty
        }
    }

    /// The generation whose file bytes are still being read, if a
    /// preview is pending.
    #[must_use]
    pub const fn pending_preview(&self) -> Option<Generation> {
        if self.source.is_some() && self.preview.is_none() {
            Some(self.generation)
        } else {
            None
        }
    }

    /// The job a conversion started now would run, or `None` when there
    /// is no preview or a conversion is already running.
    #[must_use]
    pub fn conversion_job(&self) -> Option<ConversionJob> {
        if self.is_converting() {
            return None;
        }
        self.preview.as_ref().map(|preview| ConversionJob {
            generation: self.generation,
            preview: preview.clone(),
            config: self.config,
        })
    }

    /// Apply an event, producing the next state.
    #[must_use]
    pub fn apply(self, event: Event) -> Self {
        match event {
            Event::FileOffered {
                name,
                media_type,
                size,
            } => self.offer_file(name, &media_type, size),
            Event::PreviewLoaded { generation, bytes } => self.preview_loaded(generation, &bytes),
            Event::PreviewFailed { generation, error } => self.preview_failed(generation, error),
            Event::FormatSelected(format) => Self {
                config: OutputConfig {
                    format,
                    ..self.config
                },
                ..self
            },
            Event::QualitySelected(quality) => Self {
                config: OutputConfig {
                    quality,
                    ..self.config
                },
                ..self
            },
            Event::ConversionStarted => {
                if self.is_converting() || self.preview.is_none() {
                    return self;
                }
                Self {
                    status: ConversionStatus::Converting,
                    notice: None,
                    ..self
                }
            }
            Event::ConversionFinished {
                generation,
                outcome,
            } => self.conversion_finished(generation, outcome),
            Event::DownloadFailed(msg) => Self {
                notice: Some(Notice::DownloadFailed(msg)),
                ..self
            },
            Event::NoticeDismissed => Self {
                notice: None,
                ..self
            },
            Event::Reset => {
                tracing::debug!(generation = %self.generation.next(), "converter reset");
                Self {
                    source: None,
                    preview: None,
                    status: ConversionStatus::Idle,
                    result: None,
                    generation: self.generation.next(),
                    notice: None,
                    ..self
                }
            }
        }
    }

    fn offer_file(self, name: String, media_type: &str, size: u64) -> Self {
        match media::validate_image_media_type(media_type) {
            Ok(media_type) => {
                let generation = self.generation.next();
                tracing::debug!(%generation, %name, %media_type, size, "file accepted");
                Self {
                    source: Some(SourceFile {
                        name,
                        media_type,
                        size,
                    }),
                    preview: None,
                    status: ConversionStatus::Idle,
                    result: None,
                    generation,
                    notice: None,
                    ..self
                }
            }
            Err(err) => {
                tracing::warn!(%name, "{err}");
                Self {
                    notice: Some(err.into()),
                    ..self
                }
            }
        }
    }

    fn preview_loaded(self, generation: Generation, bytes: &[u8]) -> Self {
        if generation != self.generation || self.preview.is_some() {
            tracing::debug!(%generation, current = %self.generation, "stale preview dropped");
            return self;
        }
        let Some(source) = &self.source else {
            return self;
        };
        let preview = DataUri::encode(&source.media_type, bytes);
        Self {
            preview: Some(preview),
            ..self
        }
    }

    fn preview_failed(self, generation: Generation, error: IntakeError) -> Self {
        if generation != self.generation || self.source.is_none() {
            return self;
        }
        tracing::warn!(%generation, "{error}");
        Self {
            source: None,
            preview: None,
            notice: Some(error.into()),
            ..self
        }
    }

    fn conversion_finished(
        self,
        generation: Generation,
        outcome: Result<ConversionResult, ConvertError>,
    ) -> Self {
        if generation != self.generation || !self.is_converting() || self.preview.is_none() {
            tracing::debug!(%generation, current = %self.generation, "stale conversion dropped");
            return self;
        }
        match outcome {
            Ok(result) => {
                tracing::info!(
                    format = %result.format,
                    dimensions = %result.dimensions,
                    bytes = result.size(),
                    "conversion ready"
                );
                Self {
                    status: ConversionStatus::Idle,
                    result: Some(result),
                    notice: None,
                    ..self
                }
            }
            Err(err) => {
                tracing::warn!("conversion failed: {err}");
                Self {
                    status: ConversionStatus::Idle,
                    notice: Some(Notice::from(&err)),
                    ..self
                }
            }
        }
    }
}
