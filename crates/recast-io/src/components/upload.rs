//! File upload component with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use recast_core::IntakeError;
use recast_core::media::declared_media_type;

/// A file chosen in the picker or dropped on the drop zone.
///
/// The contents are not read until [`read_bytes`](Self::read_bytes) is
/// awaited, so a file rejected by media type is never read.
#[derive(Clone)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    size: u64,
    data: FileData,
}

impl SelectedFile {
    fn new(data: FileData) -> Self {
        let name = data.name();
        let media_type = declared_media_type(data.content_type().as_deref(), &name);
        Self {
            name,
            media_type,
            size: data.size(),
            data,
        }
    }

    /// Filename as reported by the browser.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type, inferred from the extension when the
    /// browser reports none.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Read`] if the browser fails to read it.
    pub async fn read_bytes(&self) -> Result<Vec<u8>, IntakeError> {
        self.data
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| IntakeError::Read(e.to_string()))
    }
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the first selected or dropped file.
    on_select: EventHandler<SelectedFile>,
    /// Whether a file is currently being read.
    #[props(default)]
    loading: bool,
    /// Render a single "choose another" button instead of the full
    /// drop zone (used next to an existing preview).
    #[props(default)]
    compact: bool,
}

/// A drag-and-drop zone with a file picker button.
///
/// Forwards the first file of a selection or drop to `on_select`
/// without validating it; media-type checks happen in the converter
/// state so both paths report rejections the same way.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);

    let forward_first = move |files: Vec<FileData>| {
        if let Some(file) = files.into_iter().next() {
            props.on_select.call(SelectedFile::new(file));
        }
    };

    let handle_files = move |evt: FormEvent| {
        forward_first(evt.files());
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        forward_first(evt.files());
    };

    let zone_class = match (props.compact, dragging()) {
        (true, true) => "drop-zone drop-zone--compact drop-zone--active",
        (true, false) => "drop-zone drop-zone--compact",
        (false, true) => "drop-zone drop-zone--active",
        (false, false) => "drop-zone",
    };

    if props.compact {
        return rsx! {
            div {
                class: "{zone_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: handle_drop,

                label { class: "btn btn-secondary",
                    input {
                        r#type: "file",
                        accept: "image/*",
                        class: "hidden",
                        onchange: handle_files,
                    }
                    "Choose Another Image"
                }
            }
        };
    }

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            Icon { class: "upload-icon", width: 48, height: 48, icon: LdUpload }

            if props.loading {
                p { class: "drop-zone-text", "Reading file…" }
            } else {
                p { class: "drop-zone-text", "Drag & drop your image here" }
                p { class: "drop-zone-subtext", "or" }
                label { class: "btn btn-primary",
                    input {
                        r#type: "file",
                        accept: "image/*",
                        class: "hidden",
                        onchange: handle_files,
                    }
                    "Choose File"
                }
                p { class: "drop-zone-hint", "PNG, JPEG, WEBP, GIF, BMP, ICO or TIFF" }
            }
        }
    }
}
