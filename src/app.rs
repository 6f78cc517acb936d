//! Root application component
//!
//! Owns the controller and history, hosts the media bridge, and turns
//! controller effects into webview messages and background work.

use dioxus::desktop::use_asset_handler;
use dioxus::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

use crate::components::{
    ChapterPanel, HistoryPanel, LoopPanel, NamingDialog, PlayerPanel, SidePanel, StatusBar, TitleBar,
};
use crate::config::Settings;
use crate::constants::*;
use crate::core::chapters::{check_ffprobe, extract_chapters};
use crate::core::controller::{Command, Effect, PracticeController};
use crate::core::history::HistoryStore;
use crate::core::media_bridge::{MediaCommand, MediaEvent};
use crate::core::media_server::{decode_media_path, media_url, serve_file, status_only, MEDIA_ROUTE};
use crate::core::paths;
use crate::core::store::{shared, JsonFileStore, MemoryStore};
use crate::core::thumbnailer::Thumbnailer;
use crate::hotkeys::{handle_hotkey, HotkeyContext, HotkeyResult, Modifiers};
use crate::state::{HistoryEntry, VideoSource, ViewTab};

/// Signal handles plus the collaborators effects need. Cheap to clone into
/// event handlers and spawned tasks.
#[derive(Clone)]
struct Shell {
    controller: Signal<PracticeController>,
    history: Signal<HistoryStore>,
    media: Signal<Option<document::Eval>>,
    notice: Signal<Option<String>>,
    thumbnailer: Thumbnailer,
    ffprobe: PathBuf,
    thumbnails_enabled: bool,
}

impl Shell {
    fn dispatch(&self, command: Command) {
        let mut controller = self.controller;
        let effects = controller.write().dispatch(command);
        self.apply(effects);
    }

    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            if let Some(message) = MediaCommand::from_effect(&effect) {
                self.send_media(message);
                continue;
            }
            match effect {
                Effect::DetectChapters(request) => {
                    let shell = self.clone();
                    spawn(async move {
                        let result = extract_chapters(shell.ffprobe.clone(), request.path).await;
                        shell.dispatch(Command::ChaptersDetected {
                            tag: request.tag,
                            result,
                        });
                    });
                }
                Effect::RecordHistory(update) => {
                    let mut history = self.history;
                    history.write().apply(&update);
                    if update.opened {
                        let url = self.controller.peek().video().map(|video| video.media_url.clone());
                        if let Some(url) = url {
                            history.write().set_media_url(&update.file_ref, &url);
                        }
                    }
                }
                Effect::GenerateThumbnail { key, path, duration } => {
                    if !self.thumbnails_enabled {
                        continue;
                    }
                    let shell = self.clone();
                    spawn(async move {
                        if let Some(thumbnail) = shell.thumbnailer.generate(&key, &path, duration).await {
                            let mut history = shell.history;
                            history.write().set_thumbnail(key.as_str(), thumbnail);
                        }
                    });
                }
                Effect::Seek(_) | Effect::SetPlaying(_) => {}
            }
        }
    }

    fn send_media(&self, message: MediaCommand) {
        if let Some(eval) = self.media.peek().as_ref() {
            if let Err(err) = eval.send(message) {
                tracing::warn!(error = ?err, "Media command not delivered");
            }
        }
    }

    /// Load `source`. Reopening the current media needs an explicit reload
    /// since the element's `src` does not change.
    fn load(&self, source: VideoSource) {
        let same_media = self
            .controller
            .peek()
            .video()
            .is_some_and(|video| video.media_url == source.media_url);
        let mut notice = self.notice;
        notice.set(None);
        self.dispatch(Command::LoadVideo(source));
        if same_media {
            self.send_media(MediaCommand::Reload);
        }
    }

    fn open_path(&self, path: PathBuf) {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Video file not found");
            let mut notice = self.notice;
            notice.set(Some(format!("File not found: {}", path.display())));
            return;
        }
        self.load(VideoSource::from_file(&path, media_url(&path)));
    }

    fn open_url(&self, url: String) {
        let name = url.rsplit('/').next().filter(|name| !name.is_empty()).unwrap_or(&url).to_string();
        self.load(VideoSource::from_handle(url.clone(), name));
    }

    fn pick_file(&self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open Video")
            .add_filter("Video", &VIDEO_EXTENSIONS)
            .pick_file()
        {
            self.open_path(path);
        }
    }
}

#[component]
pub fn App() -> Element {
    let settings = use_context::<Settings>();

    let store = use_hook(|| {
        let root = paths::store_root();
        match std::fs::create_dir_all(&root) {
            Ok(()) => shared(JsonFileStore::new(root)),
            Err(err) => {
                tracing::warn!(path = %root.display(), error = %err, "Data folder unavailable, loops will not be saved");
                shared(MemoryStore::default())
            }
        }
    });
    let controller = {
        let store = store.clone();
        let min_probe = settings.min_chapter_probe_seconds;
        use_signal(move || PracticeController::new(store, min_probe))
    };
    let history = {
        let store = store.clone();
        let limit = settings.history_limit;
        use_signal(move || HistoryStore::load(store, limit))
    };
    let mut media_eval = use_signal(|| None::<document::Eval>);
    let mut focus_eval = use_signal(|| None::<document::Eval>);
    let mut input_focused = use_signal(|| false);
    let notice = use_signal(|| None::<String>);
    let mut ffprobe_info = use_signal(|| None::<Result<String, String>>);

    let shell = use_hook(|| Shell {
        controller,
        history,
        media: media_eval,
        notice,
        thumbnailer: Thumbnailer::new(settings.ffmpeg_path.clone(), paths::app_cache_root()),
        ffprobe: settings.ffprobe_path.clone(),
        thumbnails_enabled: settings.generate_thumbnails,
    });

    // Local files (and thumbnails) are served to the webview from /media/...
    use_asset_handler(MEDIA_ROUTE, move |request, responder| {
        let Some(path) = decode_media_path(request.uri().path()) else {
            responder.respond(status_only(http::StatusCode::BAD_REQUEST));
            return;
        };
        let range = request
            .headers()
            .get(http::header::RANGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        responder.respond(serve_file(&path, range.as_deref()));
    });

    use_effect(move || {
        if media_eval().is_some() {
            return;
        }
        let eval = document::eval(MEDIA_BRIDGE_SCRIPT);
        media_eval.set(Some(eval));
    });

    use_effect(move || {
        if focus_eval().is_some() {
            return;
        }
        let eval = document::eval(FOCUS_TRACKER_SCRIPT);
        focus_eval.set(Some(eval));
    });

    use_future({
        let shell = shell.clone();
        move || {
            let shell = shell.clone();
            async move {
                loop {
                    let Some(eval) = media_eval() else {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        continue;
                    };
                    let mut eval = eval;
                    loop {
                        match eval.recv::<MediaEvent>().await {
                            Ok(event) => {
                                for command in event.into_commands() {
                                    shell.dispatch(command);
                                }
                            }
                            Err(err) => {
                                tracing::debug!(error = ?err, "Media bridge closed");
                                break;
                            }
                        }
                    }
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    });

    use_future(move || async move {
        loop {
            let Some(eval) = focus_eval() else {
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            };
            let mut eval = eval;
            while let Ok(focused) = eval.recv::<bool>().await {
                if input_focused() != focused {
                    input_focused.set(focused);
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    let ctl = controller.read();
    let has_video = ctl.has_video();
    let video_name = ctl.video().map(|video| video.display_name.clone());
    let video_url = ctl.video().map(|video| video.media_url.clone());
    let current_ref = ctl.video().map(|video| video.key.as_str().to_string());
    let can_rescan = ctl.video().is_some_and(|video| video.file_path.is_some());
    let time = ctl.time().clone();
    let markers = ctl.markers().clone();
    let loops = ctl.loops().to_vec();
    let active_id = ctl.active_loop().map(|lp| lp.id);
    let active_name = ctl.active_loop().map(|lp| lp.name.clone());
    let looping = ctl.is_looping();
    let chapters = ctl.chapters().to_vec();
    let chapter_status = ctl.chapter_status().clone();
    let tab = ctl.tab();
    drop(ctl);
    let history_entries = history.read().entries().to_vec();

    let naming = markers.is_naming();
    let naming_start = markers.pending_start.unwrap_or(0.0);
    let naming_end = markers.pending_end.unwrap_or(0.0);
    let naming_error = markers.message().map(str::to_string);

    let s = shell.clone();
    let on_keydown = move |e: KeyboardEvent| {
        let context = HotkeyContext {
            video_loaded: has_video,
            input_focused: input_focused(),
        };
        let mods = e.modifiers();
        let modifiers = Modifiers {
            ctrl: mods.ctrl(),
            alt: mods.alt(),
            meta: mods.meta(),
        };
        match handle_hotkey(&e.key(), modifiers, &context) {
            HotkeyResult::Action(action) => {
                e.prevent_default();
                s.dispatch(Command::Hotkey(action));
            }
            HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
        }
    };

    let side_content = match tab {
        ViewTab::Loops => {
            let (s1, s2, s3, s4) = (shell.clone(), shell.clone(), shell.clone(), shell.clone());
            rsx! {
                LoopPanel {
                    loops: loops.clone(),
                    active: active_id,
                    looping,
                    on_activate: move |id| s1.dispatch(Command::ActivateLoop(id)),
                    on_stop: move |_| s2.dispatch(Command::StopLoop),
                    on_delete: move |id| s3.dispatch(Command::DeleteLoop(id)),
                    on_rename: move |(id, name): (uuid::Uuid, String)| s4.dispatch(Command::RenameLoop(id, name)),
                }
            }
        }
        ViewTab::Chapters => {
            let (s1, s2, s3) = (shell.clone(), shell.clone(), shell.clone());
            let ffprobe = settings.ffprobe_path.clone();
            rsx! {
                ChapterPanel {
                    chapters,
                    status: chapter_status,
                    can_rescan,
                    ffprobe_info: ffprobe_info(),
                    on_jump: move |id| s1.dispatch(Command::JumpToChapter(id)),
                    on_promote: move |id| s2.dispatch(Command::PromoteChapter(id)),
                    on_rescan: move |_| s3.dispatch(Command::RescanChapters),
                    on_check_ffprobe: move |_| {
                        let ffprobe = ffprobe.clone();
                        spawn(async move {
                            let info = check_ffprobe(ffprobe).await.map_err(|err| err.to_string());
                            ffprobe_info.set(Some(info));
                        });
                    },
                }
            }
        }
        ViewTab::History => {
            let (s1, s2) = (shell.clone(), shell.clone());
            rsx! {
                HistoryPanel {
                    entries: history_entries,
                    current: current_ref,
                    on_open: move |entry: HistoryEntry| {
                        let file = PathBuf::from(&entry.file_ref);
                        let handle = entry
                            .media_url
                            .or_else(|| entry.file_ref.contains("://").then(|| entry.file_ref.clone()));
                        match handle {
                            Some(url) if !file.is_file() => s1.open_url(url),
                            _ => s1.open_path(file),
                        }
                    },
                    on_remove: move |file_ref: String| {
                        let mut history = s2.history;
                        history.write().remove(&file_ref);
                    },
                }
            }
        }
    };

    let (s_open, s_title_open, s_url, s_play, s_seek, s_a, s_b, s_commit, s_tab) = (
        shell.clone(),
        shell.clone(),
        shell.clone(),
        shell.clone(),
        shell.clone(),
        shell.clone(),
        shell.clone(),
        shell.clone(),
        shell.clone(),
    );
    let (s_confirm, s_cancel) = (shell.clone(), shell.clone());

    rsx! {
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.85; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            .collapse-btn:disabled {{ cursor: default; opacity: 0.4; }}
            "#
        }

        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
                outline: none;
            ",
            // Enable keyboard focus on this container for hotkeys
            tabindex: "0",
            autofocus: true,
            onkeydown: on_keydown,

            TitleBar {
                video_name: video_name.clone(),
                on_open_file: move |_| s_title_open.pick_file(),
                on_open_url: move |url: String| s_url.open_url(url),
            }

            div {
                style: "display: flex; flex: 1; min-height: 0;",
                PlayerPanel {
                    media_url: video_url,
                    position: time.position(),
                    duration: time.duration(),
                    playing: time.is_playing(),
                    pending_start: markers.pending_start,
                    pending_end: markers.pending_end,
                    loops,
                    active: active_id,
                    on_open: move |_| s_open.pick_file(),
                    on_toggle_play: move |_| s_play.dispatch(Command::TogglePlay),
                    on_seek: move |t| s_seek.dispatch(Command::SeekTo(t)),
                    on_mark_start: move |_| s_a.dispatch(Command::MarkStart),
                    on_mark_end: move |_| s_b.dispatch(Command::MarkEnd),
                    on_commit: move |_| s_commit.dispatch(Command::RequestCommit),
                }
                SidePanel {
                    active: tab,
                    width: SIDE_PANEL_WIDTH,
                    on_select: move |tab| s_tab.dispatch(Command::SelectTab(tab)),
                    {side_content}
                }
            }

            StatusBar {
                message: notice(),
                active_loop: active_name,
                position: time.position(),
                duration: time.duration(),
                playing: time.is_playing(),
            }

            if naming {
                NamingDialog {
                    start: naming_start,
                    end: naming_end,
                    error: naming_error,
                    on_confirm: move |name: String| s_confirm.dispatch(Command::ConfirmName(name)),
                    on_cancel: move |_| s_cancel.dispatch(Command::CancelAll),
                }
            }
        }
    }
}
