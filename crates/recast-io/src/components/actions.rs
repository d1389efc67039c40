//! Convert, download, and reset buttons.

use dioxus::prelude::*;
use recast_core::ConversionResult;
use tracing::{info, warn};

use crate::components::preview::format_size;
use crate::download;

/// Props for the [`ActionBar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ActionBarProps {
    /// Whether a conversion is running.
    converting: bool,
    /// The result to offer for download. `None` hides the download
    /// button.
    result: Option<ConversionResult>,
    /// Called when the user asks for a conversion.
    on_convert: EventHandler<()>,
    /// Called when the user asks to start over.
    on_reset: EventHandler<()>,
    /// Called with a message when the download could not be started.
    on_download_error: EventHandler<String>,
}

/// Which action buttons are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ButtonStates {
    convert_enabled: bool,
    download_shown: bool,
    reset_enabled: bool,
}

impl ButtonStates {
    /// Convert and reset are locked while a conversion runs; download
    /// needs a result.
    const fn new(converting: bool, has_result: bool) -> Self {
        Self {
            convert_enabled: !converting,
            download_shown: has_result,
            reset_enabled: !converting,
        }
    }
}

/// Action buttons for the preview view.
///
/// Convert and reset are disabled while a conversion runs. Once a
/// result exists, a download button offers it as
/// `converted-image.<ext>`.
#[component]
pub fn ActionBar(props: ActionBarProps) -> Element {
    let converting = props.converting;
    let buttons = ButtonStates::new(converting, props.result.is_some());
    let on_convert = props.on_convert;
    let on_reset = props.on_reset;
    let on_download_error = props.on_download_error;
    let download_label = props.result.as_ref().map(|res| {
        format!(
            "Download {} ({})",
            res.format.label(),
            format_size(res.size() as u64)
        )
    });

    let download_click = {
        let result = props.result.clone();
        move |_| {
            if let Some(ref res) = result {
                match download::download_result(res) {
                    Ok(()) => info!(name = %res.download_name(), "download started"),
                    Err(e) => {
                        warn!("{e}");
                        on_download_error.call(e.to_string());
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "actions",
            button {
                class: "btn btn-primary",
                disabled: !buttons.convert_enabled,
                onclick: move |_| on_convert.call(()),
                if converting { "Converting…" } else { "Convert Image" }
            }

            if let Some(label) = download_label.filter(|_| buttons.download_shown) {
                button {
                    class: "btn btn-success",
                    onclick: download_click,
                    "{label}"
                }
            }

            button {
                class: "btn btn-secondary",
                disabled: !buttons.reset_enabled,
                onclick: move |_| on_reset.call(()),
                "Convert Another"
            }
        }
    }
}
