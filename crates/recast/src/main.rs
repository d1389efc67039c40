use dioxus::prelude::*;
use recast_core::{ConverterState, Event, ImageCodec, OutputConfig, View};
use recast_io::{ActionBar, FileUpload, NoticeBanner, OutputControls, Preview, SelectedFile};
use tracing::{debug, info};

fn main() {
    dioxus::launch(app);
}

/// Feed `event` through the converter state machine.
fn dispatch(mut state: Signal<ConverterState>, event: Event) {
    let mut current = state.write();
    let previous = std::mem::take(&mut *current);
    *current = previous.apply(event);
}

/// Root application component.
///
/// Owns the converter state as a single signal. Components report user
/// input as [`Event`]s; the two async steps (reading the selected file
/// and running the conversion) are spawned here and report back tagged
/// with the generation they started under, so the state can discard
/// anything a newer upload or a reset has superseded.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    let state = use_signal(ConverterState::default);

    // --- File intake ---
    let on_select = move |file: SelectedFile| {
        let before = state.peek().generation();
        dispatch(
            state,
            Event::FileOffered {
                name: file.name().to_owned(),
                media_type: file.media_type().to_owned(),
                size: file.size(),
            },
        );

        // A rejected file leaves the generation untouched and must not
        // be read, even if an earlier accepted file is still loading.
        let current = state.peek();
        if current.generation() == before {
            return;
        }
        let Some(generation) = current.pending_preview() else {
            return;
        };
        drop(current);

        spawn(async move {
            let event = match file.read_bytes().await {
                Ok(bytes) => Event::PreviewLoaded { generation, bytes },
                Err(error) => Event::PreviewFailed { generation, error },
            };
            dispatch(state, event);
        });
    };

    // --- Conversion ---
    let on_convert = move |()| {
        let Some(job) = state.peek().conversion_job() else {
            debug!("convert ignored: nothing to convert or already converting");
            return;
        };
        dispatch(state, Event::ConversionStarted);

        spawn(async move {
            // Yield to the browser event loop so it can paint the
            // "Converting…" state before the synchronous codec work.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let outcome = recast_core::convert(&ImageCodec, &job);
            dispatch(
                state,
                Event::ConversionFinished {
                    generation: job.generation,
                    outcome,
                },
            );
        });
    };

    let on_config = move |next: OutputConfig| {
        let config = state.peek().config();
        if next.format != config.format {
            dispatch(state, Event::FormatSelected(next.format));
        }
        if next.quality != config.quality {
            dispatch(state, Event::QualitySelected(next.quality));
        }
    };

    let on_reset = move |()| {
        info!("reset");
        dispatch(state, Event::Reset);
    };

    // --- Layout ---
    let current = state.read();
    let view = current.view();
    let generation = current.generation();
    let config = current.config();
    let converting = current.is_converting();
    let complete = current.is_complete();
    let loading = current.pending_preview().is_some();
    let notice = current.notice().cloned();
    let result = current.result().cloned();
    let shown = current.preview().cloned().zip(current.source().cloned());
    drop(current);

    rsx! {
        style { dangerous_inner_html: include_str!(env!("THEME_CSS_PATH")) }

        div { class: "app",
            header { class: "header",
                h1 { class: "title", "Image Converter" }
                p { class: "subtitle", "Transform your images with style" }
            }

            main { class: "card",
                if let Some(notice) = notice {
                    NoticeBanner {
                        notice,
                        on_dismiss: move |()| dispatch(state, Event::NoticeDismissed),
                    }
                }

                if let (View::Preview, Some((preview, source))) = (view, shown) {
                    div { class: "workspace",
                        Preview { preview, source, complete }

                        div { class: "panel",
                            OutputControls {
                                config,
                                disabled: converting,
                                on_change: on_config,
                            }

                            if converting {
                                p { class: "status", role: "status", "Converting…" }
                            }

                            ActionBar {
                                converting,
                                result,
                                on_convert,
                                on_reset,
                                on_download_error: move |message: String| {
                                    dispatch(state, Event::DownloadFailed(message));
                                },
                            }

                            FileUpload {
                                key: "{generation}",
                                on_select,
                                loading,
                                compact: true,
                            }
                        }
                    }
                } else {
                    // Keyed by generation so a reset remounts the input
                    // and the same file can be picked again.
                    FileUpload { key: "{generation}", on_select, loading }
                }
            }
        }
    }
}
