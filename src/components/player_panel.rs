use dioxus::prelude::*;
use uuid::Uuid;

use crate::constants::*;
use crate::state::Loop;
use crate::utils::{format_duration, format_time};

fn percent(time: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        0.0
    } else {
        (time / duration * 100.0).clamp(0.0, 100.0)
    }
}

#[component]
pub fn PlayerPanel(
    media_url: Option<String>,
    position: f64,
    duration: Option<f64>,
    playing: bool,
    pending_start: Option<f64>,
    pending_end: Option<f64>,
    loops: Vec<Loop>,
    active: Option<Uuid>,
    on_open: EventHandler<MouseEvent>,
    on_toggle_play: EventHandler<()>,
    on_seek: EventHandler<f64>,
    on_mark_start: EventHandler<()>,
    on_mark_end: EventHandler<()>,
    on_commit: EventHandler<()>,
) -> Element {
    let Some(url) = media_url else {
        return rsx! {
            div {
                style: "flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 12px; background-color: {BG_DEEPEST};",
                span { style: "font-size: 13px; color: {TEXT_MUTED};", "Open a video to start practicing" }
                button {
                    style: "padding: 10px 18px; background: {BORDER_ACCENT}; border: none; border-radius: 6px; color: white; font-size: 12px; cursor: pointer;",
                    onclick: move |e| on_open.call(e),
                    "Open Video"
                }
            }
        };
    };

    let total = duration.unwrap_or(0.0);
    let play_label = if playing { "Pause" } else { "Play" };
    let time_label = format!("{} / {}", format_time(position), format_duration(duration));
    let a_label = pending_start.map(format_time).unwrap_or_else(|| "—".to_string());
    let b_label = pending_end.map(format_time).unwrap_or_else(|| "—".to_string());
    let can_commit = pending_start.is_some() && pending_end.is_some();
    let commit_opacity = if can_commit { "1" } else { "0.4" };
    let playhead = percent(position, total);
    let a_pct = pending_start.map(|a| percent(a, total));
    let b_pct = pending_end.map(|b| percent(b, total));

    rsx! {
        div {
            style: "flex: 1; display: flex; flex-direction: column; min-width: 0; background-color: {BG_DEEPEST};",
            div {
                style: "flex: 1; display: flex; align-items: center; justify-content: center; min-height: 0; overflow: hidden;",
                video {
                    id: "player",
                    src: "{url}",
                    preload: "metadata",
                    style: "max-width: 100%; max-height: 100%; background: black;",
                    onclick: move |_| on_toggle_play.call(()),
                }
            }

            // Seek bar with loop ranges and pending markers
            div {
                style: "position: relative; height: 28px; margin: 8px 16px 0 16px;",
                div {
                    style: "position: absolute; left: 0; right: 0; top: 12px; height: 4px; border-radius: 2px; background: {BORDER_DEFAULT};",
                }
                for lp in loops {
                    {
                        let left = percent(lp.start, total);
                        let width = (percent(lp.end, total) - left).max(0.0);
                        let opacity = if active == Some(lp.id) { "0.9" } else { "0.35" };
                        rsx! {
                            div {
                                key: "{lp.id}",
                                style: "position: absolute; top: 10px; height: 8px; left: {left}%; width: {width}%; background: {lp.color}; opacity: {opacity}; border-radius: 2px; pointer-events: none;",
                            }
                        }
                    }
                }
                if let Some(a) = a_pct {
                    div {
                        style: "position: absolute; top: 4px; height: 20px; width: 2px; left: {a}%; background: {ACCENT_MARKER}; pointer-events: none;",
                    }
                }
                if let Some(b) = b_pct {
                    div {
                        style: "position: absolute; top: 4px; height: 20px; width: 2px; left: {b}%; background: {ACCENT_MARKER}; pointer-events: none;",
                    }
                }
                div {
                    style: "position: absolute; top: 6px; height: 16px; width: 2px; left: {playhead}%; background: {TEXT_PRIMARY}; pointer-events: none;",
                }
                input {
                    r#type: "range",
                    min: "0",
                    max: "{total}",
                    step: "0.01",
                    value: "{position}",
                    disabled: duration.is_none(),
                    style: "position: absolute; left: 0; right: 0; top: 0; width: 100%; height: 28px; margin: 0; opacity: 0; cursor: pointer;",
                    oninput: move |e| {
                        if let Ok(time) = e.value().parse::<f64>() {
                            on_seek.call(time);
                        }
                    },
                }
            }

            // Transport
            div {
                style: "display: flex; align-items: center; gap: 10px; height: 44px; padding: 0 16px;",
                button {
                    class: "collapse-btn",
                    style: "min-width: 64px; padding: 6px 12px; background: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_PRIMARY}; font-size: 12px; cursor: pointer;",
                    onclick: move |_| on_toggle_play.call(()),
                    "{play_label}"
                }
                span {
                    style: "font-size: 12px; color: {TEXT_SECONDARY}; font-family: 'SF Mono', Consolas, monospace; min-width: 130px;",
                    "{time_label}"
                }
                div { style: "flex: 1;" }
                button {
                    class: "collapse-btn",
                    style: "padding: 6px 10px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {ACCENT_MARKER}; font-size: 12px; cursor: pointer;",
                    onclick: move |_| on_mark_start.call(()),
                    "A {a_label}"
                }
                button {
                    class: "collapse-btn",
                    style: "padding: 6px 10px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {ACCENT_MARKER}; font-size: 12px; cursor: pointer;",
                    onclick: move |_| on_mark_end.call(()),
                    "B {b_label}"
                }
                button {
                    class: "collapse-btn",
                    disabled: !can_commit,
                    style: "padding: 6px 12px; background: {ACCENT_LOOP}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer; opacity: {commit_opacity};",
                    onclick: move |_| on_commit.call(()),
                    "Save Loop"
                }
            }
        }
    }
}
