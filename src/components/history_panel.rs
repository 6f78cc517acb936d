use dioxus::prelude::*;

use crate::constants::*;
use crate::core::media_server::media_url;
use crate::state::HistoryEntry;
use crate::utils::format_duration;

#[component]
pub fn HistoryPanel(
    entries: Vec<HistoryEntry>,
    current: Option<String>,
    on_open: EventHandler<HistoryEntry>,
    on_remove: EventHandler<String>,
) -> Element {
    if entries.is_empty() {
        return rsx! {
            div {
                style: "padding: 16px; font-size: 12px; color: {TEXT_DIM};",
                "Videos you open will show up here."
            }
        };
    }

    rsx! {
        div {
            style: "display: flex; flex-direction: column; padding: 6px; gap: 4px;",
            for entry in entries {
                {
                    let is_current = current.as_deref() == Some(entry.file_ref.as_str());
                    let border = if is_current { BORDER_ACCENT } else { BORDER_SUBTLE };
                    let opened = entry.last_opened.format("%Y-%m-%d %H:%M").to_string();
                    let mut details = vec![format_duration(entry.duration)];
                    if let Some(count) = entry.loop_count {
                        details.push(format!("{count} loops"));
                    }
                    if let Some(count) = entry.chapter_count {
                        details.push(format!("{count} chapters"));
                    }
                    let details = details.join(" · ");
                    let thumb = entry.thumbnail.as_deref().map(media_url);
                    let remove_ref = entry.file_ref.clone();
                    let open_entry = entry.clone();
                    rsx! {
                        div {
                            key: "{entry.file_ref}",
                            style: "
                                display: flex; align-items: center; gap: 8px;
                                padding: 6px; border-radius: 6px;
                                background-color: {BG_SURFACE}; border: 1px solid {border};
                                cursor: pointer;
                            ",
                            title: "{entry.file_ref}",
                            onclick: move |_| on_open.call(open_entry.clone()),
                            if let Some(src) = thumb {
                                img {
                                    src: "{src}",
                                    style: "width: 64px; height: 36px; object-fit: cover; border-radius: 3px; background: {BG_DEEPEST}; flex-shrink: 0;",
                                }
                            } else {
                                div { style: "width: 64px; height: 36px; border-radius: 3px; background: {BG_DEEPEST}; flex-shrink: 0;" }
                            }
                            div {
                                style: "display: flex; flex-direction: column; flex: 1; min-width: 0;",
                                span {
                                    style: "font-size: 12px; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                                    "{entry.display_name}"
                                }
                                span { style: "font-size: 10px; color: {TEXT_MUTED};", "{details}" }
                                span { style: "font-size: 10px; color: {TEXT_DIM};", "{opened}" }
                            }
                            button {
                                class: "collapse-btn",
                                style: "
                                    width: 22px; height: 22px; border: none; border-radius: 4px;
                                    background: transparent; color: {TEXT_MUTED}; font-size: 12px;
                                    cursor: pointer;
                                ",
                                title: "Remove from history",
                                onclick: move |e| {
                                    e.stop_propagation();
                                    on_remove.call(remove_ref.clone());
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
