use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(
    video_name: Option<String>,
    on_open_file: EventHandler<MouseEvent>,
    on_open_url: EventHandler<String>,
) -> Element {
    let mut url_text = use_signal(String::new);
    let title = video_name.unwrap_or_else(|| "No video loaded".to_string());

    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "Practice Looper" }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_open_file.call(e),
                    "Open Video"
                }
                input {
                    r#type: "text",
                    placeholder: "Paste a video URL and press Enter",
                    value: "{url_text}",
                    style: "
                        width: 260px; padding: 4px 8px; font-size: 11px;
                        background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                        border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                        outline: none; user-select: text;
                    ",
                    oninput: move |e| url_text.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        e.stop_propagation();
                        if e.key() == Key::Enter {
                            let url = url_text().trim().to_string();
                            if !url.is_empty() {
                                on_open_url.call(url);
                                url_text.set(String::new());
                            }
                        }
                    },
                }
            }
            span {
                style: "font-size: 13px; color: {TEXT_MUTED}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; max-width: 40%;",
                "{title}"
            }
        }
    }
}
