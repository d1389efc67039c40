//! recast-io: Browser I/O and Dioxus component library.
//!
//! Handles file selection (picker and drag-and-drop), Blob downloads,
//! and provides the UI components for the recast web application.

pub mod components;
pub mod download;

pub use components::{
    ActionBar, FileUpload, NoticeBanner, OutputControls, Preview, SelectedFile,
};
pub use download::DownloadError;
