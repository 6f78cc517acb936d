use dioxus::prelude::*;

use crate::constants::*;
use crate::core::chapters::ChapterStatus;
use crate::state::Chapter;
use crate::utils::format_time;

fn status_line(status: &ChapterStatus, count: usize) -> (String, &'static str) {
    match status {
        ChapterStatus::Idle => ("Load a video to look for chapters".to_string(), TEXT_DIM),
        ChapterStatus::Loading => ("Scanning for chapters…".to_string(), TEXT_SECONDARY),
        ChapterStatus::Success if count == 0 => ("This video has no chapters".to_string(), TEXT_MUTED),
        ChapterStatus::Success => (format!("{count} chapters"), TEXT_MUTED),
        ChapterStatus::Error(message) => (format!("Chapter scan failed: {message}"), ACCENT_ERROR),
        ChapterStatus::Skipped(reason) => (format!("Chapter scan skipped: {reason}"), TEXT_DIM),
    }
}

#[component]
pub fn ChapterPanel(
    chapters: Vec<Chapter>,
    status: ChapterStatus,
    can_rescan: bool,
    ffprobe_info: Option<Result<String, String>>,
    on_jump: EventHandler<String>,
    on_promote: EventHandler<String>,
    on_rescan: EventHandler<()>,
    on_check_ffprobe: EventHandler<()>,
) -> Element {
    let (line, line_color) = status_line(&status, chapters.len());
    let loading = status == ChapterStatus::Loading;
    let (tool_line, tool_color) = match &ffprobe_info {
        None => (String::new(), TEXT_DIM),
        Some(Ok(version)) => (version.clone(), TEXT_MUTED),
        Some(Err(err)) => (err.clone(), ACCENT_ERROR),
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; padding: 8px; gap: 6px;",
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                span { style: "flex: 1; font-size: 11px; color: {line_color};", "{line}" }
                button {
                    class: "collapse-btn",
                    disabled: !can_rescan || loading,
                    style: "
                        padding: 4px 10px; border-radius: 4px;
                        background: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT};
                        color: {TEXT_SECONDARY}; font-size: 11px; cursor: pointer;
                    ",
                    onclick: move |_| on_rescan.call(()),
                    "Rescan"
                }
            }
            for chapter in chapters {
                {
                    let jump_id = chapter.id.clone();
                    let promote_id = chapter.id.clone();
                    let range = match chapter.end {
                        Some(end) => format!("{} – {}", format_time(chapter.start), format_time(end)),
                        None => format_time(chapter.start),
                    };
                    rsx! {
                        div {
                            key: "{chapter.id}",
                            style: "
                                display: flex; align-items: center; gap: 8px;
                                padding: 8px; border-radius: 6px;
                                background-color: {BG_SURFACE}; border: 1px solid {BORDER_SUBTLE};
                                cursor: pointer;
                            ",
                            onclick: move |_| on_jump.call(jump_id.clone()),
                            div {
                                style: "display: flex; flex-direction: column; flex: 1; min-width: 0;",
                                span { style: "font-size: 12px; color: {TEXT_PRIMARY};", "{chapter.title}" }
                                span {
                                    style: "font-size: 10px; color: {TEXT_MUTED}; font-family: 'SF Mono', Consolas, monospace;",
                                    "{range}"
                                }
                            }
                            button {
                                class: "collapse-btn",
                                style: "
                                    padding: 3px 8px; border-radius: 4px;
                                    background: transparent; border: 1px solid {BORDER_DEFAULT};
                                    color: {ACCENT_LOOP}; font-size: 11px; cursor: pointer;
                                ",
                                title: "Save this chapter as a loop",
                                onclick: move |e| {
                                    e.stop_propagation();
                                    on_promote.call(promote_id.clone());
                                },
                                "+ Loop"
                            }
                        }
                    }
                }
            }
            div {
                style: "display: flex; align-items: center; gap: 8px; margin-top: 8px; padding-top: 8px; border-top: 1px solid {BORDER_SUBTLE};",
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_MUTED};
                        font-size: 11px; cursor: pointer; padding: 2px 4px;
                    ",
                    onclick: move |_| on_check_ffprobe.call(()),
                    "Check ffprobe"
                }
                span {
                    style: "flex: 1; font-size: 10px; color: {tool_color}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{tool_line}"
                }
            }
        }
    }
}
