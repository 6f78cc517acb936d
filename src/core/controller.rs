//! The practice controller: one video's loops, markers, chapters and clock.
//!
//! Every input (media notifications, hotkeys, buttons, async completions) is a
//! [`Command`]. [`PracticeController::dispatch`] applies it and returns the
//! [`Effect`]s the shell must carry out: media element seeks and play/pause,
//! chapter probes and history updates. The controller never talks to the
//! webview or spawns work itself.

use std::path::PathBuf;
use uuid::Uuid;

use crate::core::chapters::{
    promote_chapter_to_loop, ChapterBridge, ChapterError, ChapterRequest, ChapterStatus,
};
use crate::core::loop_store::LoopStore;
use crate::core::playback::LoopPlayback;
use crate::core::store::SharedStore;
use crate::core::time_source::TimeSource;
use crate::hotkeys::HotkeyAction;
use crate::state::{
    Chapter, HistoryUpdate, Loop, TempMarkers, VideoKey, VideoSource, ViewTab,
};

#[derive(Debug)]
pub enum Command {
    /// A new current video from file selection or history.
    LoadVideo(VideoSource),
    UnloadVideo,
    PositionChanged(f64),
    DurationChanged(Option<f64>),
    PlayStateChanged(bool),
    TogglePlay,
    SeekTo(f64),
    MarkStart,
    MarkEnd,
    RequestCommit,
    ConfirmName(String),
    /// Escape: markers, active loop and naming dialog all go.
    CancelAll,
    ActivateLoop(Uuid),
    StopLoop,
    DeleteLoop(Uuid),
    RenameLoop(Uuid, String),
    PromoteChapter(String),
    JumpToChapter(String),
    RescanChapters,
    ChaptersDetected {
        tag: u64,
        result: Result<Vec<Chapter>, ChapterError>,
    },
    CycleTab,
    SelectTab(ViewTab),
    Hotkey(HotkeyAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Move the media element to this (already clamped) position.
    Seek(f64),
    SetPlaying(bool),
    DetectChapters(ChapterRequest),
    RecordHistory(HistoryUpdate),
    GenerateThumbnail {
        key: VideoKey,
        path: PathBuf,
        duration: Option<f64>,
    },
}

pub struct PracticeController {
    video: Option<VideoSource>,
    time: TimeSource,
    loops: LoopStore,
    markers: TempMarkers,
    playback: LoopPlayback,
    chapters: ChapterBridge,
    tab: ViewTab,
}

impl PracticeController {
    pub fn new(store: SharedStore, min_chapter_probe_seconds: f64) -> Self {
        Self {
            video: None,
            time: TimeSource::default(),
            loops: LoopStore::new(store),
            markers: TempMarkers::default(),
            playback: LoopPlayback::default(),
            chapters: ChapterBridge::new(min_chapter_probe_seconds),
            tab: ViewTab::default(),
        }
    }

    pub fn video(&self) -> Option<&VideoSource> {
        self.video.as_ref()
    }

    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }

    pub fn time(&self) -> &TimeSource {
        &self.time
    }

    pub fn loops(&self) -> &[Loop] {
        self.loops.loops()
    }

    pub fn markers(&self) -> &TempMarkers {
        &self.markers
    }

    pub fn active_loop(&self) -> Option<&Loop> {
        self.playback.active_loop().and_then(|id| self.loops.get(id))
    }

    pub fn is_looping(&self) -> bool {
        self.playback.is_looping()
    }

    pub fn chapters(&self) -> &[Chapter] {
        self.chapters.chapters()
    }

    pub fn chapter_status(&self) -> &ChapterStatus {
        self.chapters.status()
    }

    pub fn tab(&self) -> ViewTab {
        self.tab
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        let mut effects = Vec::new();

        // Only video lifecycle, tab and async completion commands work without a video.
        let needs_video = !matches!(
            command,
            Command::LoadVideo(_)
                | Command::UnloadVideo
                | Command::CycleTab
                | Command::SelectTab(_)
                | Command::ChaptersDetected { .. }
        );
        if needs_video && self.video.is_none() {
            tracing::debug!(?command, "Ignoring command without a video");
            return effects;
        }

        match command {
            Command::LoadVideo(source) => self.load_video(source, &mut effects),
            Command::UnloadVideo => {
                self.reset_for_new_video();
                self.loops.unload();
                self.video = None;
            }
            Command::PositionChanged(position) => {
                self.time.on_position(position);
                if let Some(start) = self.playback.on_position(self.time.position(), self.loops.loops()) {
                    // The element pauses itself at the end of the media.
                    let at_end = self.time.duration().is_some_and(|d| self.time.position() >= d);
                    effects.push(Effect::Seek(self.time.seek(start)));
                    if at_end {
                        self.time.on_play_state(true);
                        effects.push(Effect::SetPlaying(true));
                    }
                }
            }
            Command::DurationChanged(duration) => self.on_duration(duration, &mut effects),
            Command::PlayStateChanged(playing) => self.time.on_play_state(playing),
            Command::TogglePlay => effects.push(Effect::SetPlaying(self.time.toggle_play())),
            Command::SeekTo(time) => effects.push(Effect::Seek(self.time.seek(time))),
            Command::MarkStart => self.markers.mark_start(self.time.position()),
            Command::MarkEnd => self.markers.mark_end(self.time.position()),
            Command::RequestCommit => {
                self.markers.request_commit();
            }
            Command::ConfirmName(name) => self.confirm_name(&name, &mut effects),
            Command::CancelAll => {
                self.markers.cancel();
                self.playback.stop();
            }
            Command::ActivateLoop(id) => {
                if let Some(start) = self.playback.activate(id, self.loops.loops()) {
                    effects.push(Effect::Seek(self.time.seek(start)));
                }
            }
            Command::StopLoop => self.playback.stop(),
            Command::DeleteLoop(id) => {
                if self.loops.delete_loop(id).is_some() {
                    self.playback.forget(id);
                    self.push_history(&mut effects, false);
                }
            }
            Command::RenameLoop(id, name) => {
                self.loops.rename_loop(id, &name);
            }
            Command::PromoteChapter(chapter_id) => {
                if let Some(chapter) = self.chapters.get(&chapter_id) {
                    let lp = promote_chapter_to_loop(chapter, self.time.duration(), self.loops.next_color());
                    self.loops.add_loop(lp);
                    self.push_history(&mut effects, false);
                }
            }
            Command::JumpToChapter(chapter_id) => {
                if let Some(start) = self.chapters.get(&chapter_id).map(|chapter| chapter.start) {
                    effects.push(Effect::Seek(self.time.seek(start)));
                }
            }
            Command::RescanChapters => self.begin_chapter_scan(&mut effects),
            Command::ChaptersDetected { tag, result } => {
                if self.chapters.complete(tag, result) {
                    self.push_history(&mut effects, false);
                }
            }
            Command::CycleTab => self.tab = self.tab.next(),
            Command::SelectTab(tab) => self.tab = tab,
            Command::Hotkey(action) => {
                let command = match action {
                    HotkeyAction::PlayPause => Command::TogglePlay,
                    HotkeyAction::MarkStart => Command::MarkStart,
                    HotkeyAction::MarkEnd => Command::MarkEnd,
                    HotkeyAction::CommitLoop => Command::RequestCommit,
                    HotkeyAction::CycleView => Command::CycleTab,
                    HotkeyAction::CancelAll => Command::CancelAll,
                };
                effects.extend(self.dispatch(command));
            }
        }

        effects
    }

    fn reset_for_new_video(&mut self) {
        self.time.reset();
        self.markers.cancel();
        self.playback.stop();
        self.chapters.reset();
    }

    fn load_video(&mut self, source: VideoSource, effects: &mut Vec<Effect>) {
        tracing::info!(video = %source.key, name = %source.display_name, "Loading video");
        self.reset_for_new_video();
        self.loops.load_loops(&source.key);
        self.video = Some(source);
        self.push_history(effects, true);
    }

    fn on_duration(&mut self, duration: Option<f64>, effects: &mut Vec<Effect>) {
        let was_known = self.time.duration().is_some();
        self.time.on_duration(duration);
        if was_known || self.time.duration().is_none() {
            return;
        }

        // First time the length is known for this video.
        self.begin_chapter_scan(effects);
        self.push_history(effects, false);
        if let Some(video) = &self.video {
            if let Some(path) = &video.file_path {
                effects.push(Effect::GenerateThumbnail {
                    key: video.key.clone(),
                    path: path.clone(),
                    duration: self.time.duration(),
                });
            }
        }
    }

    fn begin_chapter_scan(&mut self, effects: &mut Vec<Effect>) {
        let Some(video) = &self.video else {
            return;
        };
        if let Some(request) = self.chapters.begin(video, self.time.duration()) {
            effects.push(Effect::DetectChapters(request));
        }
    }

    fn confirm_name(&mut self, name: &str, effects: &mut Vec<Effect>) {
        match self.markers.confirm_name(name) {
            Ok(pending) => {
                let lp = Loop::new(pending.name, pending.start, pending.end, self.loops.next_color());
                self.loops.add_loop(lp);
                self.push_history(effects, false);
            }
            Err(err) => tracing::debug!(error = %err, "Loop commit rejected"),
        }
    }

    fn push_history(&self, effects: &mut Vec<Effect>, opened: bool) {
        let Some(video) = &self.video else {
            return;
        };
        let chapter_count = matches!(self.chapters.status(), ChapterStatus::Success)
            .then(|| self.chapters.chapters().len());
        effects.push(Effect::RecordHistory(HistoryUpdate {
            file_ref: video.key.as_str().to_string(),
            display_name: video.display_name.clone(),
            duration: self.time.duration(),
            loop_count: Some(self.loops.len()),
            chapter_count,
            opened,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{shared, MemoryStore};
    use crate::state::MarkerPhase;
    use std::path::Path;

    fn source(path: &str) -> VideoSource {
        VideoSource::from_file(Path::new(path), format!("/media{path}"))
    }

    fn controller_with(store: SharedStore) -> PracticeController {
        let mut ctl = PracticeController::new(store, 10.0);
        ctl.dispatch(Command::LoadVideo(source("/videos/solo.mp4")));
        ctl
    }

    fn controller() -> PracticeController {
        controller_with(shared(MemoryStore::default()))
    }

    fn seeks(effects: &[Effect]) -> Vec<f64> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Seek(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    fn detect_request(effects: &[Effect]) -> Option<ChapterRequest> {
        effects.iter().find_map(|effect| match effect {
            Effect::DetectChapters(request) => Some(request.clone()),
            _ => None,
        })
    }

    fn commit(ctl: &mut PracticeController, a: f64, b: f64, name: &str) -> Uuid {
        ctl.dispatch(Command::PositionChanged(a));
        ctl.dispatch(Command::MarkStart);
        ctl.dispatch(Command::PositionChanged(b));
        ctl.dispatch(Command::MarkEnd);
        ctl.dispatch(Command::RequestCommit);
        ctl.dispatch(Command::ConfirmName(name.to_string()));
        ctl.loops().last().map(|lp| lp.id).unwrap()
    }

    #[test]
    fn mark_commit_and_loop_back() {
        let mut ctl = controller();
        ctl.dispatch(Command::DurationChanged(Some(180.0)));
        let id = commit(&mut ctl, 10.0, 40.0, "Solo");

        let lp = &ctl.loops()[0];
        assert_eq!((lp.name.as_str(), lp.start, lp.end), ("Solo", 10.0, 40.0));
        assert_eq!(ctl.markers().phase(), MarkerPhase::Empty);

        assert_eq!(seeks(&ctl.dispatch(Command::ActivateLoop(id))), vec![10.0]);
        assert!(seeks(&ctl.dispatch(Command::PositionChanged(39.9))).is_empty());
        assert_eq!(seeks(&ctl.dispatch(Command::PositionChanged(40.05))), vec![10.0]);
        assert_eq!(ctl.time().position(), 10.0);
    }

    #[test]
    fn loop_ending_at_video_end_resumes_playback() {
        let mut ctl = controller();
        ctl.dispatch(Command::DurationChanged(Some(60.0)));
        let id = commit(&mut ctl, 50.0, 60.0, "Outro");
        ctl.dispatch(Command::ActivateLoop(id));
        ctl.dispatch(Command::PlayStateChanged(true));
        assert_eq!(
            ctl.dispatch(Command::PositionChanged(59.5)),
            Vec::<Effect>::new()
        );

        ctl.dispatch(Command::PlayStateChanged(false));
        assert_eq!(
            ctl.dispatch(Command::PositionChanged(60.0)),
            vec![Effect::Seek(50.0), Effect::SetPlaying(true)]
        );
        assert!(ctl.time().is_playing());

        // Mid-video loop ends keep the element playing on their own.
        let mid = commit(&mut ctl, 10.0, 20.0, "Bridge");
        ctl.dispatch(Command::ActivateLoop(mid));
        assert_eq!(
            ctl.dispatch(Command::PositionChanged(20.05)),
            vec![Effect::Seek(10.0)]
        );
    }

    #[test]
    fn b_before_a_is_swapped() {
        let mut ctl = controller();
        commit(&mut ctl, 40.0, 10.0, "Backwards");
        let lp = &ctl.loops()[0];
        assert_eq!((lp.start, lp.end), (10.0, 40.0));
    }

    #[test]
    fn zero_length_commit_stays_naming() {
        let mut ctl = controller();
        ctl.dispatch(Command::PositionChanged(12.0));
        ctl.dispatch(Command::MarkStart);
        ctl.dispatch(Command::MarkEnd);
        ctl.dispatch(Command::RequestCommit);
        ctl.dispatch(Command::ConfirmName("Dot".into()));

        assert!(ctl.loops().is_empty());
        assert_eq!(ctl.markers().phase(), MarkerPhase::Naming);
        assert!(ctl.markers().message().is_some());
    }

    #[test]
    fn committed_loops_are_well_formed() {
        let mut ctl = controller();
        for (a, b) in [(0.0, 5.0), (9.0, 3.0), (7.0, 7.0), (1.5, 1.25)] {
            ctl.dispatch(Command::CancelAll);
            ctl.dispatch(Command::PositionChanged(a));
            ctl.dispatch(Command::MarkStart);
            ctl.dispatch(Command::PositionChanged(b));
            ctl.dispatch(Command::MarkEnd);
            ctl.dispatch(Command::RequestCommit);
            ctl.dispatch(Command::ConfirmName("x".into()));
        }
        assert_eq!(ctl.loops().len(), 3);
        assert!(ctl.loops().iter().all(|lp| 0.0 <= lp.start && lp.start < lp.end));
    }

    #[test]
    fn activation_is_idempotent() {
        let mut ctl = controller();
        let id = commit(&mut ctl, 10.0, 40.0, "Solo");
        ctl.dispatch(Command::PositionChanged(25.0));

        assert_eq!(seeks(&ctl.dispatch(Command::ActivateLoop(id))), vec![10.0]);
        ctl.dispatch(Command::PositionChanged(25.0));
        assert_eq!(seeks(&ctl.dispatch(Command::ActivateLoop(id))), vec![10.0]);
        assert_eq!(ctl.active_loop().map(|lp| lp.id), Some(id));
        assert!(ctl.is_looping());
    }

    #[test]
    fn activating_unknown_loop_is_noop() {
        let mut ctl = controller();
        assert!(ctl.dispatch(Command::ActivateLoop(Uuid::new_v4())).is_empty());
        assert!(!ctl.is_looping());
    }

    #[test]
    fn deleting_active_loop_disengages() {
        let mut ctl = controller();
        let keep = commit(&mut ctl, 0.0, 5.0, "Keep");
        let gone = commit(&mut ctl, 10.0, 40.0, "Gone");

        ctl.dispatch(Command::ActivateLoop(gone));
        ctl.dispatch(Command::DeleteLoop(gone));
        assert!(!ctl.is_looping());
        assert!(ctl.active_loop().is_none());

        ctl.dispatch(Command::ActivateLoop(keep));
        ctl.dispatch(Command::DeleteLoop(Uuid::new_v4()));
        assert!(ctl.is_looping());
    }

    #[test]
    fn stop_loop_keeps_position() {
        let mut ctl = controller();
        let id = commit(&mut ctl, 10.0, 40.0, "Solo");
        ctl.dispatch(Command::ActivateLoop(id));
        ctl.dispatch(Command::PositionChanged(22.0));
        assert!(ctl.dispatch(Command::StopLoop).is_empty());
        assert_eq!(ctl.time().position(), 22.0);
        assert!(seeks(&ctl.dispatch(Command::PositionChanged(45.0))).is_empty());
    }

    #[test]
    fn escape_clears_all_transient_state() {
        let mut ctl = controller();
        let id = commit(&mut ctl, 10.0, 40.0, "Solo");
        ctl.dispatch(Command::ActivateLoop(id));
        ctl.dispatch(Command::MarkStart);
        ctl.dispatch(Command::PositionChanged(30.0));
        ctl.dispatch(Command::MarkEnd);
        ctl.dispatch(Command::RequestCommit);

        ctl.dispatch(Command::Hotkey(HotkeyAction::CancelAll));
        assert_eq!(ctl.markers().phase(), MarkerPhase::Empty);
        assert!(!ctl.is_looping());
        assert!(ctl.active_loop().is_none());
        assert_eq!(ctl.loops().len(), 1);
    }

    #[test]
    fn changing_video_resets_transient_state() {
        let mut ctl = controller();
        ctl.dispatch(Command::DurationChanged(Some(300.0)));
        let id = commit(&mut ctl, 10.0, 40.0, "Solo");
        ctl.dispatch(Command::ActivateLoop(id));
        ctl.dispatch(Command::MarkStart);

        let request = ctl.chapter_status().clone();
        assert_eq!(request, ChapterStatus::Loading);

        ctl.dispatch(Command::LoadVideo(source("/videos/other.mp4")));
        assert_eq!(ctl.markers().phase(), MarkerPhase::Empty);
        assert!(!ctl.is_looping());
        assert!(ctl.active_loop().is_none());
        assert!(ctl.chapters().is_empty());
        assert_eq!(ctl.chapter_status(), &ChapterStatus::Idle);
        assert_eq!(ctl.time().position(), 0.0);
        assert_eq!(ctl.time().duration(), None);
        assert!(ctl.loops().is_empty());
    }

    #[test]
    fn loops_survive_a_fresh_session() {
        let store = shared(MemoryStore::default());
        let mut ctl = controller_with(store.clone());
        commit(&mut ctl, 10.0, 40.0, "Solo");
        commit(&mut ctl, 50.0, 60.0, "Outro");
        let saved = ctl.loops().to_vec();

        let reopened = controller_with(store);
        assert_eq!(reopened.loops(), saved.as_slice());
    }

    #[test]
    fn duration_triggers_one_chapter_scan() {
        let mut ctl = controller();
        let effects = ctl.dispatch(Command::DurationChanged(Some(300.0)));
        let request = detect_request(&effects).unwrap();
        assert_eq!(request.path, Path::new("/videos/solo.mp4"));
        assert!(effects
            .iter()
            .any(|effect| matches!(effect, Effect::GenerateThumbnail { .. })));

        let again = ctl.dispatch(Command::DurationChanged(Some(300.5)));
        assert!(detect_request(&again).is_none());
    }

    #[test]
    fn promote_detected_chapter() {
        let mut ctl = controller();
        let effects = ctl.dispatch(Command::DurationChanged(Some(300.0)));
        let request = detect_request(&effects).unwrap();
        ctl.dispatch(Command::ChaptersDetected {
            tag: request.tag,
            result: Ok(vec![Chapter {
                id: "c1".into(),
                title: "Intro".into(),
                start: 0.0,
                end: Some(30.0),
            }]),
        });

        ctl.dispatch(Command::PromoteChapter("c1".into()));
        let lp = &ctl.loops()[0];
        assert_eq!((lp.name.as_str(), lp.start, lp.end), ("Intro", 0.0, 30.0));

        ctl.dispatch(Command::PromoteChapter("missing".into()));
        assert_eq!(ctl.loops().len(), 1);
    }

    #[test]
    fn failed_scan_then_successful_rescan() {
        let mut ctl = controller();
        let effects = ctl.dispatch(Command::DurationChanged(Some(300.0)));
        let first = detect_request(&effects).unwrap();
        ctl.dispatch(Command::ChaptersDetected {
            tag: first.tag,
            result: Err(ChapterError::ToolMissing("ffprobe".into())),
        });
        assert!(ctl.chapters().is_empty());
        assert!(matches!(ctl.chapter_status(), ChapterStatus::Error(_)));

        let second = detect_request(&ctl.dispatch(Command::RescanChapters)).unwrap();
        ctl.dispatch(Command::ChaptersDetected {
            tag: second.tag,
            result: Ok(vec![Chapter {
                id: "chapter-0".into(),
                title: "Verse".into(),
                start: 12.0,
                end: None,
            }]),
        });
        assert_eq!(ctl.chapter_status(), &ChapterStatus::Success);
        assert_eq!(ctl.chapters().len(), 1);
    }

    #[test]
    fn results_for_previous_video_are_dropped() {
        let mut ctl = controller();
        let request = detect_request(&ctl.dispatch(Command::DurationChanged(Some(300.0)))).unwrap();
        ctl.dispatch(Command::LoadVideo(source("/videos/other.mp4")));
        ctl.dispatch(Command::ChaptersDetected {
            tag: request.tag,
            result: Ok(vec![Chapter {
                id: "c1".into(),
                title: "Old".into(),
                start: 0.0,
                end: None,
            }]),
        });
        assert!(ctl.chapters().is_empty());
    }

    #[test]
    fn commands_without_video_are_ignored() {
        let mut ctl = PracticeController::new(shared(MemoryStore::default()), 10.0);
        assert!(ctl.dispatch(Command::TogglePlay).is_empty());
        ctl.dispatch(Command::MarkStart);
        assert_eq!(ctl.markers().phase(), MarkerPhase::Empty);
        ctl.dispatch(Command::CycleTab);
        assert_eq!(ctl.tab(), ViewTab::Chapters);
    }

    #[test]
    fn hotkeys_route_to_commands() {
        let mut ctl = controller();
        ctl.dispatch(Command::PositionChanged(5.0));
        ctl.dispatch(Command::Hotkey(HotkeyAction::MarkStart));
        ctl.dispatch(Command::PositionChanged(9.0));
        ctl.dispatch(Command::Hotkey(HotkeyAction::MarkEnd));
        ctl.dispatch(Command::Hotkey(HotkeyAction::CommitLoop));
        assert_eq!(ctl.markers().phase(), MarkerPhase::Naming);

        assert_eq!(
            ctl.dispatch(Command::Hotkey(HotkeyAction::PlayPause)),
            vec![Effect::SetPlaying(true)]
        );
        ctl.dispatch(Command::Hotkey(HotkeyAction::CycleView));
        assert_eq!(ctl.tab(), ViewTab::Chapters);
    }

    #[test]
    fn seek_is_clamped() {
        let mut ctl = controller();
        ctl.dispatch(Command::DurationChanged(Some(60.0)));
        assert_eq!(seeks(&ctl.dispatch(Command::SeekTo(90.0))), vec![60.0]);
        assert_eq!(seeks(&ctl.dispatch(Command::SeekTo(-1.0))), vec![0.0]);
    }

    #[test]
    fn history_updates_follow_loop_changes() {
        let mut ctl = PracticeController::new(shared(MemoryStore::default()), 10.0);
        let opened = ctl.dispatch(Command::LoadVideo(source("/videos/solo.mp4")));
        assert!(matches!(
            opened.as_slice(),
            [Effect::RecordHistory(HistoryUpdate { opened: true, .. })]
        ));

        ctl.dispatch(Command::PositionChanged(1.0));
        ctl.dispatch(Command::MarkStart);
        ctl.dispatch(Command::PositionChanged(2.0));
        ctl.dispatch(Command::MarkEnd);
        ctl.dispatch(Command::RequestCommit);
        let effects = ctl.dispatch(Command::ConfirmName("One".into()));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::RecordHistory(HistoryUpdate { loop_count: Some(1), opened: false, .. })
        )));
    }
}
