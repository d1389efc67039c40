//! Dioxus UI components for recast.
//!
//! Provides the upload drop zone, image preview, output format and
//! quality controls, the convert/download/reset action bar, and the
//! notice banner.

mod actions;
mod notice;
mod output_controls;
mod preview;
mod upload;

pub use actions::ActionBar;
pub use notice::NoticeBanner;
pub use output_controls::OutputControls;
pub use preview::{Preview, format_size};
pub use upload::{FileUpload, SelectedFile};
