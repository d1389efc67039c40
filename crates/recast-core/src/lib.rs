//! recast-core: Pure image conversion core (sans-IO).
//!
//! Holds everything about converting an uploaded image that does not
//! need a browser: output formats and quality, media-type validation,
//! data URI previews, the codec seam and its `image`-backed
//! implementation, conversion orchestration, and the converter state
//! record with its event-driven transitions.
//!
//! All browser interaction (file reading, Blob downloads, rendering)
//! lives in `recast-io` and the `recast` app.

pub mod codec;
pub mod convert;
pub mod data_uri;
pub mod format;
pub mod media;
pub mod state;
pub mod types;

pub use codec::{ImageCodec, RasterCodec};
pub use convert::{ConversionJob, convert};
pub use data_uri::{DataUri, DataUriError};
pub use format::{OutputConfig, Quality, TargetFormat};
pub use media::IntakeError;
pub use state::{ConversionStatus, ConverterState, Event, Notice, SourceFile, View};
pub use types::{ConversionResult, ConvertError, Dimensions, Generation, RgbaImage};
