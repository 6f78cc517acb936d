use dioxus::prelude::*;

use crate::constants::*;
use crate::utils::format_time;

/// Modal asking for a name before the pending A/B pair becomes a loop.
#[component]
pub fn NamingDialog(
    start: f64,
    end: f64,
    error: Option<String>,
    on_confirm: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut name = use_signal(String::new);
    let (lo, hi) = (start.min(end), start.max(end));
    let range = format!("{} – {}", format_time(lo), format_time(hi));

    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.5);
                display: flex; align-items: center; justify-content: center;
                z-index: 2000;
            ",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "
                    width: 360px; background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    padding: 24px; box-shadow: 0 10px 25px rgba(0,0,0,0.5);
                ",
                onclick: move |e| e.stop_propagation(),

                h3 { style: "margin: 0 0 4px 0; font-size: 16px; color: {TEXT_PRIMARY};", "Save Loop" }
                div { style: "margin-bottom: 16px; font-size: 11px; color: {TEXT_MUTED}; font-family: 'SF Mono', Consolas, monospace;", "{range}" }
                input {
                    r#type: "text",
                    placeholder: "Loop name",
                    value: "{name}",
                    autofocus: true,
                    style: "
                        width: 100%; box-sizing: border-box;
                        padding: 8px 10px; font-size: 13px;
                        background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                        border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                        outline: none; user-select: text;
                    ",
                    oninput: move |e| name.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        // Keep typing away from the global hotkeys.
                        e.stop_propagation();
                        if e.key() == Key::Enter {
                            on_confirm.call(name());
                        } else if e.key() == Key::Escape {
                            on_cancel.call(());
                        }
                    },
                }
                if let Some(error) = error {
                    div { style: "margin-top: 8px; font-size: 11px; color: {ACCENT_ERROR};", "{error}" }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 20px;",
                    button {
                        style: "padding: 8px 14px; background: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; cursor: pointer;",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        style: "padding: 8px 14px; background: {ACCENT_LOOP}; border: none; border-radius: 4px; color: white; cursor: pointer;",
                        onclick: move |_| on_confirm.call(name()),
                        "Save"
                    }
                }
            }
        }
    }
}
