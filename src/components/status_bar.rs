use dioxus::prelude::*;
use crate::constants::*;
use crate::utils::{format_duration, format_time};

#[component]
pub fn StatusBar(
    message: Option<String>,
    active_loop: Option<String>,
    position: f64,
    duration: Option<f64>,
    playing: bool,
) -> Element {
    let left = message.unwrap_or_else(|| "Space play/pause · A/B mark · N save loop · C switch tab · Esc cancel".to_string());
    let loop_label = active_loop.map(|name| format!("⟳ {name}"));
    let state = if playing { "Playing" } else { "Paused" };
    let time = format!("{} / {}", format_time(position), format_duration(duration));

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: 22px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_DIM};",
            span { "{left}" }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                if let Some(label) = loop_label {
                    span { style: "color: {ACCENT_LOOP};", "{label}" }
                }
                span { "{state}" }
                span { "{time}" }
            }
        }
    }
}
