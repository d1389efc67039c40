//! Output format and quality controls.
//!
//! The quality slider is only rendered for formats where quality
//! affects the encoder (JPEG, WebP). The slider's range and step are
//! the only constraint on the value; [`Quality::from_fraction`] snaps
//! whatever the input reports onto the same grid.

use dioxus::prelude::*;
use recast_core::{OutputConfig, Quality, TargetFormat};
use tracing::warn;

/// Props for the [`OutputControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct OutputControlsProps {
    /// Current output configuration (read-only).
    config: OutputConfig,
    /// Disable inputs, e.g. while a conversion runs.
    #[props(default)]
    disabled: bool,
    /// Callback fired when the format or quality changes.
    on_change: EventHandler<OutputConfig>,
}

/// Format select plus, for lossy formats, a quality slider.
#[component]
pub fn OutputControls(props: OutputControlsProps) -> Element {
    let config = props.config;
    let on_change = props.on_change;

    let options: Vec<(&'static str, &'static str)> = TargetFormat::ALL
        .into_iter()
        .map(|f| (f.extension(), f.label()))
        .collect();

    rsx! {
        div { class: "controls",
            {render_select(
                "target_format",
                "Convert to",
                &options,
                config.format.extension(),
                props.disabled,
                move |v: String| match v.parse::<TargetFormat>() {
                    Ok(format) => on_change.call(OutputConfig { format, ..config }),
                    Err(err) => warn!("format select: {err}"),
                },
            )}

            if config.format.supports_quality() {
                {render_slider(
                    "quality",
                    "Quality",
                    &config.quality.percent_label(),
                    config.format.quality_hint(),
                    config.quality.fraction(),
                    Quality::MIN.fraction(),
                    Quality::MAX.fraction(),
                    Quality::STEP,
                    props.disabled,
                    move |v: f64| {
                        on_change.call(OutputConfig {
                            quality: Quality::from_fraction(v),
                            ..config
                        });
                    },
                )}
            }
        }
    }
}

/// Render a labeled range slider with its value displayed, and an
/// optional hint underneath.
#[allow(clippy::too_many_arguments)]
fn render_slider(
    id: &str,
    label: &str,
    display: &str,
    hint: Option<&str>,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    disabled: bool,
    on_input: impl Fn(f64) + 'static,
) -> Element {
    let display = display.to_string();
    let hint = hint.map(str::to_string);
    let id = id.to_string();
    let label = label.to_string();

    rsx! {
        div { class: "field",
            div { class: "field-header",
                label { r#for: "{id}", class: "field-label", "{label}" }
                span { class: "field-value", "{display}" }
            }
            input {
                r#type: "range",
                id: "{id}",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                disabled,
                class: "slider",
                oninput: move |e| {
                    match e.value().parse::<f64>() {
                        Ok(v) => on_input(v),
                        Err(err) => warn!("slider parse failure: {err:?} from {:?}", e.value()),
                    }
                },
            }
            if let Some(hint) = hint {
                p { class: "field-hint", "{hint}" }
            }
        }
    }
}

/// Render a labeled `<select>` dropdown.
fn render_select(
    id: &str,
    label: &str,
    options: &[(&str, &str)],
    selected: &str,
    disabled: bool,
    on_change: impl Fn(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let options: Vec<(String, String)> = options
        .iter()
        .map(|(v, l)| ((*v).to_string(), (*l).to_string()))
        .collect();
    let selected = selected.to_string();

    rsx! {
        div { class: "field",
            label { r#for: "{id}", class: "field-label", "{label}" }
            select {
                id: "{id}",
                class: "select",
                value: "{selected}",
                disabled,
                onchange: move |e| {
                    on_change(e.value());
                },

                for (value, display) in options.iter() {
                    option {
                        value: "{value}",
                        selected: value == &selected,
                        "{display}"
                    }
                }
            }
        }
    }
}
