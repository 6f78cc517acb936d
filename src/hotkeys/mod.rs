//! Hotkey system
//!
//! Fixed key bindings for the practice player.
//!
//! # Architecture
//!
//! - **HotkeyAction**: Enum of all possible actions that can be triggered by hotkeys
//! - **HotkeyContext**: Determines whether hotkeys are live at all
//! - **handle_hotkey()**: Pure mapping from a key event to an action
//!
//! The controller turns the resulting action into state changes and effects,
//! so nothing here touches application state.

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Toggle playback (Space).
    PlayPause,
    /// Set the pending loop start at the playhead (A).
    MarkStart,
    /// Set the pending loop end at the playhead (B).
    MarkEnd,
    /// Open the naming step for the pending loop (N).
    CommitLoop,
    /// Rotate the side panel tab (C).
    CycleView,
    /// Drop markers, stop looping, close the naming dialog (Escape).
    CancelAll,
}

/// Context information that affects whether hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a video is currently loaded
    pub video_loaded: bool,
    /// Whether an input field has focus (suppresses all hotkeys)
    pub input_focused: bool,
}

/// Modifier keys held during the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    fn any_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (no video, or input field focused)
    Suppressed,
}

fn key_to_action(key: &Key, modifiers: Modifiers) -> Option<HotkeyAction> {
    if *key == Key::Escape {
        return Some(HotkeyAction::CancelAll);
    }
    // Leave Ctrl/Alt/Cmd combinations to the OS and webview.
    if modifiers.any_command() {
        return None;
    }
    let Key::Character(c) = key else {
        return None;
    };
    match c.to_ascii_lowercase().as_str() {
        " " => Some(HotkeyAction::PlayPause),
        "a" => Some(HotkeyAction::MarkStart),
        "b" => Some(HotkeyAction::MarkEnd),
        "n" => Some(HotkeyAction::CommitLoop),
        "c" => Some(HotkeyAction::CycleView),
        _ => None,
    }
}

/// Maps a key event to an action, considering the current context.
///
/// # Returns
/// * `HotkeyResult::Action(action)` if a hotkey matched
/// * `HotkeyResult::NoMatch` if no binding exists
/// * `HotkeyResult::Suppressed` if the key is bound but hotkeys are inactive
pub fn handle_hotkey(key: &Key, modifiers: Modifiers, context: &HotkeyContext) -> HotkeyResult {
    let Some(action) = key_to_action(key, modifiers) else {
        return HotkeyResult::NoMatch;
    };

    // Never hijack typing, e.g. in the loop name field.
    if context.input_focused || !context.video_loaded {
        return HotkeyResult::Suppressed;
    }

    HotkeyResult::Action(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live() -> HotkeyContext {
        HotkeyContext {
            video_loaded: true,
            input_focused: false,
        }
    }

    fn press(c: &str) -> HotkeyResult {
        handle_hotkey(&Key::Character(c.to_string()), Modifiers::default(), &live())
    }

    #[test]
    fn test_bindings() {
        assert_eq!(press(" "), HotkeyResult::Action(HotkeyAction::PlayPause));
        assert_eq!(press("a"), HotkeyResult::Action(HotkeyAction::MarkStart));
        assert_eq!(press("b"), HotkeyResult::Action(HotkeyAction::MarkEnd));
        assert_eq!(press("n"), HotkeyResult::Action(HotkeyAction::CommitLoop));
        assert_eq!(press("c"), HotkeyResult::Action(HotkeyAction::CycleView));
        assert_eq!(
            handle_hotkey(&Key::Escape, Modifiers::default(), &live()),
            HotkeyResult::Action(HotkeyAction::CancelAll)
        );
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(press("A"), HotkeyResult::Action(HotkeyAction::MarkStart));
        assert_eq!(press("N"), HotkeyResult::Action(HotkeyAction::CommitLoop));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(press("z"), HotkeyResult::NoMatch);
        assert_eq!(
            handle_hotkey(&Key::Enter, Modifiers::default(), &live()),
            HotkeyResult::NoMatch
        );
    }

    #[test]
    fn test_suppressed_when_input_focused() {
        let ctx = HotkeyContext {
            input_focused: true,
            ..live()
        };
        let result = handle_hotkey(&Key::Character("a".to_string()), Modifiers::default(), &ctx);
        assert_eq!(result, HotkeyResult::Suppressed);
    }

    #[test]
    fn test_suppressed_without_video() {
        let result = handle_hotkey(&Key::Escape, Modifiers::default(), &HotkeyContext::default());
        assert_eq!(result, HotkeyResult::Suppressed);
    }

    #[test]
    fn test_command_combinations_pass_through() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let result = handle_hotkey(&Key::Character("c".to_string()), ctrl, &live());
        assert_eq!(result, HotkeyResult::NoMatch);
        assert_eq!(
            handle_hotkey(&Key::Escape, ctrl, &live()),
            HotkeyResult::Action(HotkeyAction::CancelAll)
        );
    }
}
