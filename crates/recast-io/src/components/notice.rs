//! Notification banner for rejected files and failed conversions.

use dioxus::prelude::*;
use recast_core::Notice;

/// Props for the [`NoticeBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct NoticeBannerProps {
    /// The notice to show.
    notice: Notice,
    /// Called when the user dismisses the banner.
    on_dismiss: EventHandler<()>,
}

/// An `role="alert"` banner; screen readers announce it immediately.
#[component]
pub fn NoticeBanner(props: NoticeBannerProps) -> Element {
    let message = props.notice.to_string();
    let detail = match &props.notice {
        Notice::InvalidFile { media_type } if !media_type.is_empty() => {
            Some(format!("Files of type {media_type} cannot be converted."))
        }
        Notice::UnsupportedImage { .. } => {
            Some("Supported inputs are PNG, JPEG, WEBP, GIF, BMP, ICO and TIFF.".to_owned())
        }
        _ => None,
    };
    let on_dismiss = props.on_dismiss;

    rsx! {
        div { class: "notice", role: "alert",
            div { class: "notice-body",
                p { class: "notice-message", "{message}" }
                if let Some(detail) = detail {
                    p { class: "notice-detail", "{detail}" }
                }
            }
            button {
                class: "notice-dismiss",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
