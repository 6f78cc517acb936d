//! Shared constants: UI colors, loop palette, timing and the media bridge script.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";
pub const BORDER_ACCENT: &str = "#3b82f6";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_MARKER: &str = "#f97316";
pub const ACCENT_LOOP: &str = "#22c55e";
pub const ACCENT_ERROR: &str = "#ef4444";

/// Colors handed out to new loops in creation order.
pub const LOOP_PALETTE: [&str; 8] = [
    "#3b82f6", "#22c55e", "#f97316", "#a855f7", "#ec4899", "#eab308", "#14b8a6", "#ef4444",
];

/// Span given to a promoted chapter that has no end time.
pub const DEFAULT_CHAPTER_LOOP_SPAN_SECONDS: f64 = 30.0;

pub const SIDE_PANEL_WIDTH: f64 = 300.0;

/// File extensions offered by the open dialog.
pub const VIDEO_EXTENSIONS: [&str; 8] = ["mp4", "m4v", "mov", "mkv", "webm", "avi", "ogv", "mpg"];

pub const MEDIA_BRIDGE_SCRIPT: &str = r#"
const playerId = "player";
let attached = null;

function post(kind, video) {
    const duration = isFinite(video.duration) ? video.duration : null;
    dioxus.send({
        kind: kind,
        position: video.currentTime || 0,
        duration: duration,
        playing: !video.paused
    });
}

function attach() {
    const video = document.getElementById(playerId);
    if (!video) {
        setTimeout(attach, 100);
        return;
    }
    if (attached === video) {
        return;
    }
    attached = video;
    video.addEventListener("loadedmetadata", () => post("duration", video));
    video.addEventListener("durationchange", () => post("duration", video));
    video.addEventListener("timeupdate", () => post("time", video));
    video.addEventListener("seeked", () => post("time", video));
    video.addEventListener("play", () => post("state", video));
    video.addEventListener("pause", () => post("state", video));
    video.addEventListener("ended", () => post("state", video));
    video.addEventListener("emptied", () => post("emptied", video));
}

setInterval(() => {
    const video = document.getElementById(playerId);
    if (!video) {
        return;
    }
    if (video !== attached) {
        attach();
    }
    if (!video.paused) {
        post("time", video);
    }
}, 50);

attach();

while (true) {
    const msg = await dioxus.recv();
    const video = document.getElementById(playerId);
    if (!msg || !video) {
        continue;
    }
    if (msg.kind === "seek") {
        video.currentTime = msg.position;
    } else if (msg.kind === "play") {
        video.play().catch(() => {});
    } else if (msg.kind === "pause") {
        video.pause();
    } else if (msg.kind === "reload") {
        video.load();
    }
}
"#;

/// Tracks whether a text field has focus so hotkeys can stand down.
pub const FOCUS_TRACKER_SCRIPT: &str = r#"
function isTextField(el) {
    if (!el) {
        return false;
    }
    const tag = (el.tagName || "").toLowerCase();
    return tag === "input" || tag === "textarea" || el.isContentEditable === true;
}

document.addEventListener("focusin", (e) => dioxus.send(isTextField(e.target)));
document.addEventListener("focusout", () => dioxus.send(false));
await new Promise(() => {});
"#;
