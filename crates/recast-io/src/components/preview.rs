//! Preview of the selected image.

use dioxus::prelude::*;
use recast_core::{DataUri, SourceFile};

/// Props for the [`Preview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewProps {
    /// Data URI of the selected file.
    preview: DataUri,
    /// The selected file.
    source: SourceFile,
    /// Overlay a "Conversion Complete!" badge.
    #[props(default)]
    complete: bool,
}

/// Renders the selected image straight from its data URI, with the
/// filename and size underneath. A badge covers the image once a
/// conversion of it has finished.
#[component]
pub fn Preview(props: PreviewProps) -> Element {
    let name = &props.source.name;
    let size = format_size(props.source.size);
    let media_type = &props.source.media_type;
    let src = props.preview.as_str();

    rsx! {
        figure { class: "preview",
            div { class: "preview-frame",
                img {
                    class: "preview-image",
                    src: "{src}",
                    alt: "Preview of {name}",
                }
                if props.complete {
                    div { class: "preview-overlay", role: "status",
                        span { class: "preview-overlay-badge", "✓ Conversion Complete!" }
                    }
                }
            }
            figcaption { class: "preview-caption",
                span { class: "preview-name", "{name}" }
                span { class: "preview-meta", "{media_type} · {size}" }
            }
        }
    }
}

/// Human-readable byte count (`"512 B"`, `"1.5 KB"`, `"2.0 MB"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_pick_sensible_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0 MB");
    }
}
