use dioxus::prelude::*;
use uuid::Uuid;

use crate::constants::*;
use crate::state::Loop;
use crate::utils::format_time;

#[component]
pub fn LoopPanel(
    loops: Vec<Loop>,
    active: Option<Uuid>,
    looping: bool,
    on_activate: EventHandler<Uuid>,
    on_stop: EventHandler<()>,
    on_delete: EventHandler<Uuid>,
    on_rename: EventHandler<(Uuid, String)>,
) -> Element {
    let mut editing = use_signal(|| None::<Uuid>);
    let mut draft = use_signal(String::new);

    if loops.is_empty() {
        return rsx! {
            div {
                style: "padding: 16px; font-size: 12px; color: {TEXT_DIM}; line-height: 1.6;",
                "No loops yet. Press A at the start of a passage, B at its end, then N to name it."
            }
        };
    }

    rsx! {
        div {
            style: "display: flex; flex-direction: column; padding: 6px; gap: 4px;",
            if looping {
                button {
                    class: "collapse-btn",
                    style: "
                        margin: 2px 2px 6px 2px; padding: 6px; border-radius: 4px;
                        background: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT};
                        color: {TEXT_SECONDARY}; font-size: 11px; cursor: pointer;
                    ",
                    onclick: move |_| on_stop.call(()),
                    "Stop looping"
                }
            }
            for lp in loops {
                {
                    let id = lp.id;
                    let is_active = active == Some(id);
                    let border = if is_active { ACCENT_LOOP } else { BORDER_SUBTLE };
                    let range = format!("{} – {}", format_time(lp.start), format_time(lp.end));
                    let length = format!("{:.1}s", lp.length());
                    let is_editing = editing() == Some(id);
                    let current_name = lp.name.clone();
                    rsx! {
                        div {
                            key: "{id}",
                            style: "
                                display: flex; align-items: center; gap: 8px;
                                padding: 8px; border-radius: 6px;
                                background-color: {BG_SURFACE}; border: 1px solid {border};
                                cursor: pointer;
                            ",
                            onclick: move |_| on_activate.call(id),
                            div { style: "width: 10px; height: 10px; border-radius: 2px; background: {lp.color}; flex-shrink: 0;" }
                            div {
                                style: "display: flex; flex-direction: column; flex: 1; min-width: 0;",
                                if is_editing {
                                    input {
                                        r#type: "text",
                                        value: "{draft}",
                                        autofocus: true,
                                        style: "
                                            padding: 2px 4px; font-size: 12px;
                                            background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                                            border: 1px solid {BORDER_ACCENT}; border-radius: 3px;
                                            outline: none; user-select: text;
                                        ",
                                        onclick: move |e| e.stop_propagation(),
                                        oninput: move |e| draft.set(e.value()),
                                        onkeydown: move |e: KeyboardEvent| {
                                            e.stop_propagation();
                                            if e.key() == Key::Enter {
                                                on_rename.call((id, draft()));
                                                editing.set(None);
                                            } else if e.key() == Key::Escape {
                                                editing.set(None);
                                            }
                                        },
                                        onblur: move |_| editing.set(None),
                                    }
                                } else {
                                    span {
                                        style: "font-size: 12px; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                                        title: "Double-click to rename",
                                        ondoubleclick: move |e| {
                                            e.stop_propagation();
                                            draft.set(current_name.clone());
                                            editing.set(Some(id));
                                        },
                                        "{lp.name}"
                                    }
                                }
                                span {
                                    style: "font-size: 10px; color: {TEXT_MUTED}; font-family: 'SF Mono', Consolas, monospace;",
                                    "{range} · {length}"
                                }
                            }
                            button {
                                class: "collapse-btn",
                                style: "
                                    width: 22px; height: 22px; border: none; border-radius: 4px;
                                    background: transparent; color: {TEXT_MUTED}; font-size: 12px;
                                    cursor: pointer;
                                ",
                                title: "Delete loop",
                                onclick: move |e| {
                                    e.stop_propagation();
                                    on_delete.call(id);
                                },
                                "✕"
                            }
                        }
                    }
                }
            }
        }
    }
}
